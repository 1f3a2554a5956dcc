//! Weapon and armor databases.
//!
//! Two lookup tables mapping an integer id to an [`Item`] record. Records can
//! be inserted programmatically or loaded from the engine's JSON data files
//! (`Weapons.json`, `Armors.json`), which are arrays indexed by id whose first
//! entry is `null`.

use std::fs;
use std::path::Path;

use bevy_ecs::prelude::Resource;
use log::info;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::metadata::Meta;

/// Which database an equipment reference points into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    Weapon,
    Armor,
}

impl ItemKind {
    /// Kind for the one-letter prefix used in `equips` tags.
    pub fn from_prefix(prefix: &str) -> Option<Self> {
        match prefix {
            "w" => Some(ItemKind::Weapon),
            "a" => Some(ItemKind::Armor),
            _ => None,
        }
    }

    pub fn data_file(&self) -> &'static str {
        match self {
            ItemKind::Weapon => "Weapons.json",
            ItemKind::Armor => "Armors.json",
        }
    }
}

/// Reference to one database record, as held in an equip slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EquipRef {
    pub kind: ItemKind,
    pub id: u32,
}

impl EquipRef {
    pub fn weapon(id: u32) -> Self {
        Self {
            kind: ItemKind::Weapon,
            id,
        }
    }

    pub fn armor(id: u32) -> Self {
        Self {
            kind: ItemKind::Armor,
            id,
        }
    }
}

/// A weapon or armor record.
///
/// Only the fields this crate reads are modelled; anything else in the data
/// files is ignored on load. `meta` is derived from `note`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Item {
    pub id: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub note: String,
    #[serde(skip)]
    pub meta: Meta,
}

impl Item {
    pub fn new(id: u32, name: impl Into<String>, note: impl Into<String>) -> Self {
        let note = note.into();
        Self {
            id,
            name: name.into(),
            meta: Meta::from_note(&note),
            note,
        }
    }
}

#[derive(Resource, Debug, Default)]
pub struct ItemDatabase {
    weapons: FxHashMap<u32, Item>,
    armors: FxHashMap<u32, Item>,
}

impl ItemDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    fn table(&self, kind: ItemKind) -> &FxHashMap<u32, Item> {
        match kind {
            ItemKind::Weapon => &self.weapons,
            ItemKind::Armor => &self.armors,
        }
    }

    fn table_mut(&mut self, kind: ItemKind) -> &mut FxHashMap<u32, Item> {
        match kind {
            ItemKind::Weapon => &mut self.weapons,
            ItemKind::Armor => &mut self.armors,
        }
    }

    /// Insert or replace a record.
    pub fn insert(&mut self, kind: ItemKind, item: Item) {
        self.table_mut(kind).insert(item.id, item);
    }

    pub fn get(&self, kind: ItemKind, id: u32) -> Option<&Item> {
        self.table(kind).get(&id)
    }

    pub fn resolve(&self, equip: EquipRef) -> Option<&Item> {
        self.get(equip.kind, equip.id)
    }

    pub fn len(&self, kind: ItemKind) -> usize {
        self.table(kind).len()
    }

    /// Load one table from the engine's JSON array format.
    ///
    /// `null` entries are skipped. Returns the number of records loaded.
    pub fn load_json(&mut self, kind: ItemKind, json: &str) -> Result<usize, String> {
        let entries: Vec<Option<Item>> = serde_json::from_str(json)
            .map_err(|e| format!("Failed to parse {}: {}", kind.data_file(), e))?;

        let mut count = 0;
        for mut item in entries.into_iter().flatten() {
            item.meta = Meta::from_note(&item.note);
            self.insert(kind, item);
            count += 1;
        }
        Ok(count)
    }

    /// Load `Weapons.json` and `Armors.json` from a data directory.
    pub fn load_from_dir(&mut self, dir: impl AsRef<Path>) -> Result<(), String> {
        for kind in [ItemKind::Weapon, ItemKind::Armor] {
            let path = dir.as_ref().join(kind.data_file());
            let json = fs::read_to_string(&path)
                .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
            let count = self.load_json(kind, &json)?;
            info!("Loaded {} records from {}", count, path.display());
        }
        Ok(())
    }
}
