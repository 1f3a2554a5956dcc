//! Party and actor equipment.
//!
//! The party is an ordered list of actor ids; member 0 is the leader, whom the
//! player character depicts, and later members are shown by followers. Each
//! actor has a fixed list of equip slots, some of which may be empty.

use bevy_ecs::prelude::Resource;
use rustc_hash::FxHashMap;

use crate::resources::database::EquipRef;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Actor {
    pub id: u32,
    pub name: String,
    /// Equip slots in slot order; `None` is an empty slot.
    pub equips: Vec<Option<EquipRef>>,
}

impl Actor {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            equips: Vec::new(),
        }
    }

    pub fn with_equips(mut self, equips: impl IntoIterator<Item = Option<EquipRef>>) -> Self {
        self.equips = equips.into_iter().collect();
        self
    }

    /// Put `equip` in `slot`, growing the slot list if needed.
    pub fn equip(&mut self, slot: usize, equip: Option<EquipRef>) {
        if slot >= self.equips.len() {
            self.equips.resize(slot + 1, None);
        }
        self.equips[slot] = equip;
    }

    /// Occupied slots, in slot order.
    pub fn equipped(&self) -> impl Iterator<Item = EquipRef> + '_ {
        self.equips.iter().flatten().copied()
    }
}

#[derive(Resource, Debug, Default)]
pub struct Party {
    actors: FxHashMap<u32, Actor>,
    members: Vec<u32>,
}

impl Party {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register or replace an actor record.
    pub fn insert_actor(&mut self, actor: Actor) {
        self.actors.insert(actor.id, actor);
    }

    pub fn actor(&self, id: u32) -> Option<&Actor> {
        self.actors.get(&id)
    }

    pub fn actor_mut(&mut self, id: u32) -> Option<&mut Actor> {
        self.actors.get_mut(&id)
    }

    /// Append an actor to the member list. Already present members are ignored.
    pub fn add_member(&mut self, actor_id: u32) {
        if !self.members.contains(&actor_id) {
            self.members.push(actor_id);
        }
    }

    pub fn remove_member(&mut self, actor_id: u32) {
        self.members.retain(|id| *id != actor_id);
    }

    pub fn members(&self) -> &[u32] {
        &self.members
    }

    /// Actor at position `index` of the member list.
    pub fn member(&self, index: usize) -> Option<&Actor> {
        self.members.get(index).and_then(|id| self.actors.get(id))
    }

    pub fn leader(&self) -> Option<&Actor> {
        self.member(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leader_is_first_member() {
        let mut party = Party::new();
        party.insert_actor(Actor::new(1, "Harold"));
        party.insert_actor(Actor::new(2, "Therese"));
        assert!(party.leader().is_none());

        party.add_member(2);
        party.add_member(1);
        party.add_member(2);
        assert_eq!(party.members(), &[2, 1]);
        assert_eq!(party.leader().unwrap().name, "Therese");
        assert_eq!(party.member(1).unwrap().name, "Harold");
        assert!(party.member(2).is_none());

        party.remove_member(2);
        assert_eq!(party.leader().unwrap().name, "Harold");
    }

    #[test]
    fn test_member_without_actor_record() {
        let mut party = Party::new();
        party.add_member(9);
        assert!(party.leader().is_none());
    }

    #[test]
    fn test_equip_slots_keep_order_and_gaps() {
        let mut actor = Actor::new(1, "Harold");
        actor.equip(2, Some(EquipRef::armor(4)));
        actor.equip(0, Some(EquipRef::weapon(1)));
        assert_eq!(actor.equips.len(), 3);
        assert_eq!(
            actor.equipped().collect::<Vec<_>>(),
            vec![EquipRef::weapon(1), EquipRef::armor(4)]
        );

        actor.equip(0, None);
        assert_eq!(actor.equipped().collect::<Vec<_>>(), vec![EquipRef::armor(4)]);
    }
}
