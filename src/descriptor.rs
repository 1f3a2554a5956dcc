//! Equipment descriptors and the parsing of their metadata.
//!
//! An [`EquipmentDescriptor`] is the visual description of one equip-able
//! item, read from the item's note tags:
//!
//! | tag        | format              | default  |
//! |------------|---------------------|----------|
//! | `graphic`  | `<file>, <index>`   | required |
//! | `offset`   | `<x>` or `<x>, <y>` | `0, 0`   |
//! | `priority` | `<integer>`         | `0`      |
//!
//! Events list the items they wear with an `equips` tag, see
//! [`parse_equips_tag`].
//!
//! All parsing here is total. Blank numeric fields read as `0`; malformed
//! ones also fall back to `0` and are reported with `log::warn!` so authors
//! can spot typos without the frame loop ever failing.

use glam::IVec2;
use log::warn;

use crate::metadata::Meta;
use crate::resources::database::{EquipRef, ItemKind};

/// Visual metadata of one item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EquipmentDescriptor {
    /// Image file name inside the equipment folder, without extension.
    pub file: String,
    /// Character index inside the sheet (0..8 on packed sheets).
    pub index: u32,
    /// Pixel offset relative to the owner sprite.
    pub offset: IVec2,
    /// Added to the owner's stacking value.
    pub priority: i32,
}

impl EquipmentDescriptor {
    /// Build a descriptor from note tags.
    ///
    /// Returns `None` when the `graphic` tag is missing or names no file.
    pub fn from_meta(meta: &Meta) -> Option<Self> {
        let (file, index) = parse_graphic(meta.get_non_empty("graphic")?)?;
        Some(Self {
            file,
            index,
            offset: parse_offset(meta.get("offset")),
            priority: parse_priority(meta.get("priority")),
        })
    }

    /// Whether the file follows the one-character-per-sheet convention.
    pub fn is_large_sheet(&self) -> bool {
        is_large_sheet(&self.file)
    }
}

/// Parse `"<file>, <index>"` into its file name and character index.
///
/// A missing index reads as `0`. Returns `None` for an empty file name.
pub fn parse_graphic(value: &str) -> Option<(String, u32)> {
    let mut parts = value.split(',');
    let file = parts.next().unwrap_or_default().trim();
    if file.is_empty() {
        return None;
    }
    let index = parse_int("graphic index", parts.next().unwrap_or_default());
    let index = u32::try_from(index).unwrap_or_else(|_| {
        warn!("Negative graphic index {} for '{}', using 0", index, file);
        0
    });
    Some((file.to_string(), index))
}

/// Parse `"<x>"` or `"<x>, <y>"`; a missing `y` reads as `0`.
pub fn parse_offset(value: Option<&str>) -> IVec2 {
    let Some(value) = value else {
        return IVec2::ZERO;
    };
    let mut parts = value.split(',');
    let x = parse_int("offset x", parts.next().unwrap_or_default());
    let y = parse_int("offset y", parts.next().unwrap_or_default());
    IVec2::new(x, y)
}

pub fn parse_priority(value: Option<&str>) -> i32 {
    value.map_or(0, |v| parse_int("priority", v))
}

/// Lenient integer parsing for note values.
///
/// Surrounding whitespace is ignored, a blank value is `0` and decimals are
/// truncated toward zero. Anything else is reported and read as `0`.
fn parse_int(field: &str, raw: &str) -> i32 {
    let raw = raw.trim();
    if raw.is_empty() {
        return 0;
    }
    if let Ok(n) = raw.parse::<i32>() {
        return n;
    }
    match raw.parse::<f64>() {
        Ok(n) if n.is_finite() => n as i32,
        _ => {
            warn!("Malformed {} '{}' in equipment metadata, using 0", field, raw);
            0
        }
    }
}

/// Whether `file` is a single-character sheet (3x4 cells) rather than a packed
/// sheet of 4x2 characters (12x8 cells).
///
/// Large sheets are marked by a `$` within the leading run of `!`/`$`
/// characters of the file name.
pub fn is_large_sheet(file: &str) -> bool {
    file.chars()
        .take_while(|c| matches!(c, '!' | '$'))
        .any(|c| c == '$')
}

/// Parse an event's `equips` tag into database references, in tag order.
///
/// The tag is a comma separated list of `"<kind> <id>"` entries. Each entry
/// is trimmed and split on single spaces; the first token selects the table
/// (`a` armor, `w` weapon) and the last token is the id. Entries with an
/// unknown kind or a non-numeric id are skipped.
pub fn parse_equips_tag(tag: &str) -> Vec<EquipRef> {
    tag.split(',')
        .filter_map(|entry| {
            let tokens: Vec<&str> = entry.trim().split(' ').collect();
            let kind = ItemKind::from_prefix(tokens.first()?)?;
            let id = tokens.last()?.parse::<u32>().ok()?;
            Some(EquipRef { kind, id })
        })
        .collect()
}
