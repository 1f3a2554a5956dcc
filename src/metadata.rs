//! Note-tag metadata.
//!
//! Items and events carry free-text notes in which authors embed tags such as
//! `<graphic:sword, 2>` or `<equips: a 1, w 2>`. [`Meta::from_note`] extracts
//! every tag into a key/value map. A tag without a colon (`<flag>`) is stored
//! with an empty value. Keys and values are kept verbatim; callers trim what
//! they need.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Parsed note tags of a single database record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meta {
    tags: FxHashMap<String, String>,
}

impl Meta {
    /// Scan a note and collect every `<key>` / `<key:value>` tag.
    ///
    /// A later tag with the same key replaces an earlier one. Keys may not
    /// contain `<`, `>` or `:`; a `<` that does not open a valid tag is skipped.
    pub fn from_note(note: &str) -> Self {
        let mut tags = FxHashMap::default();
        let mut rest = note;

        while let Some(open) = rest.find('<') {
            let body = &rest[open + 1..];
            let key_len = body
                .find(|c: char| matches!(c, '<' | '>' | ':'))
                .unwrap_or(body.len());
            let Some(close) = body.find('>') else {
                break;
            };
            if key_len == 0 {
                rest = body;
                continue;
            }

            let key = &body[..key_len];
            let value = if body[key_len..].starts_with(':') {
                &body[key_len + 1..close]
            } else {
                ""
            };
            tags.insert(key.to_string(), value.to_string());
            rest = &body[close + 1..];
        }

        Self { tags }
    }

    /// Raw value of a tag, if present.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }

    /// Value of a tag, treating a present-but-blank tag as absent.
    pub fn get_non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|v| !v.trim().is_empty())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.tags.contains_key(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.tags.insert(key.into(), value.into());
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_tags() {
        let meta = Meta::from_note("A fine blade.\n<graphic:sword, 2>\n<offset:3, -5>");
        assert_eq!(meta.get("graphic"), Some("sword, 2"));
        assert_eq!(meta.get("offset"), Some("3, -5"));
        assert_eq!(meta.get("priority"), None);
    }

    #[test]
    fn test_flag_tag_has_empty_value() {
        let meta = Meta::from_note("<cursed>");
        assert!(meta.contains("cursed"));
        assert_eq!(meta.get("cursed"), Some(""));
        assert_eq!(meta.get_non_empty("cursed"), None);
    }

    #[test]
    fn test_value_keeps_leading_space() {
        let meta = Meta::from_note("<equips: a 1, w 2>");
        assert_eq!(meta.get("equips"), Some(" a 1, w 2"));
    }

    #[test]
    fn test_later_tag_wins() {
        let meta = Meta::from_note("<priority:1><priority:-2>");
        assert_eq!(meta.get("priority"), Some("-2"));
    }

    #[test]
    fn test_unclosed_and_empty_tags_are_ignored() {
        let meta = Meta::from_note("x > y <:v> <graphic:hat, 0");
        assert!(meta.is_empty());
    }

    #[test]
    fn test_stray_angle_bracket_swallows_next_tag() {
        let meta = Meta::from_note("a<b <graphic:hat, 1>");
        assert_eq!(meta.get("b "), Some(""));
        assert_eq!(meta.get("graphic"), None);
    }
}
