//! Static data of map events.
//!
//! Only the note metadata is kept; events wear the items listed in their
//! `equips` tag.

use bevy_ecs::prelude::Resource;
use rustc_hash::FxHashMap;

use crate::metadata::Meta;

#[derive(Debug, Clone, Default)]
pub struct EventData {
    pub id: u32,
    pub name: String,
    pub note: String,
    pub meta: Meta,
}

impl EventData {
    pub fn new(id: u32, name: impl Into<String>, note: impl Into<String>) -> Self {
        let note = note.into();
        Self {
            id,
            name: name.into(),
            meta: Meta::from_note(&note),
            note,
        }
    }

    /// Raw `equips` tag value, if the event has one.
    pub fn equips_tag(&self) -> Option<&str> {
        self.meta.get("equips")
    }
}

#[derive(Resource, Debug, Default)]
pub struct EventStore {
    events: FxHashMap<u32, EventData>,
}

impl EventStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, event: EventData) {
        self.events.insert(event.id, event);
    }

    pub fn get(&self, id: u32) -> Option<&EventData> {
        self.events.get(&id)
    }
}
