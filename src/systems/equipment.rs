//! Equipment layer systems.
//!
//! - [`rebuild_equipment_layers`] runs whenever a sprite's
//!   [`CharacterIdentity`] is (re)assigned. It despawns the sprite's previous
//!   layers and spawns one [`EquipmentLayer`] child per graphic-bearing item of
//!   the new identity.
//! - [`sync_equipment_frames`] recomputes every layer's crop rectangle from
//!   its owner's [`CharacterPose`]. It must run after the host's pose update.
//!
//! # Layer Flow
//!
//! 1. [`select_descriptors`] picks the items an identity wears
//! 2. each descriptor becomes a layer entity with its own [`ZIndex`], a blank
//!    [`Sprite`] and a `ChildOf(owner)` relationship
//! 3. the owner records the new set in [`EquipmentLayers`]
//! 4. every frame the layer's sprite frame follows the owner's pose once its
//!    bitmap is ready
//!
//! # Related
//!
//! - [`crate::descriptor`] – metadata parsing
//! - [`crate::resources::bitmapstore::BitmapStore`] – bitmap cache
//! - [`crate::setup::add_equipment_systems`] – schedule wiring

use bevy_ecs::hierarchy::ChildOf;
use bevy_ecs::prelude::*;
use log::debug;
use smallvec::SmallVec;

use crate::components::character::{Anchor, CharacterIdentity, CharacterPose};
use crate::components::equipmentlayer::{EquipmentLayer, EquipmentLayers};
use crate::components::sprite::Sprite;
use crate::components::zindex::ZIndex;
use crate::descriptor::{EquipmentDescriptor, parse_equips_tag};
use crate::resources::bitmapstore::BitmapStore;
use crate::resources::database::{EquipRef, ItemDatabase};
use crate::resources::equipmentconfig::EquipmentConfig;
use crate::resources::eventstore::EventStore;
use crate::resources::party::Party;

/// Descriptors of the items `identity` wears, in layer order.
///
/// - Leader and followers wear their actor's equipped items, in slot order.
/// - Tagged events wear the items listed in their `equips` tag, in tag order.
/// - Anything else wears nothing.
///
/// References that do not resolve in the database and items without a
/// `graphic` tag are skipped.
pub fn select_descriptors(
    identity: &CharacterIdentity,
    party: &Party,
    events: &EventStore,
    db: &ItemDatabase,
) -> Vec<EquipmentDescriptor> {
    let equips: Vec<EquipRef> = match identity {
        CharacterIdentity::PlayerLeader => party
            .leader()
            .map(|actor| actor.equipped().collect())
            .unwrap_or_default(),
        CharacterIdentity::Follower { member_index } => party
            .member(*member_index)
            .map(|actor| actor.equipped().collect())
            .unwrap_or_default(),
        CharacterIdentity::TaggedEvent { event_id } => events
            .get(*event_id)
            .and_then(|event| event.equips_tag())
            .map(parse_equips_tag)
            .unwrap_or_default(),
        CharacterIdentity::Other => Vec::new(),
    };

    equips
        .into_iter()
        .filter_map(|equip| db.resolve(equip))
        .filter_map(|item| EquipmentDescriptor::from_meta(&item.meta))
        .collect()
}

/// Replace the equipment layers of every sprite whose identity was assigned.
///
/// Contract
/// - Runs only for owners whose [`CharacterIdentity`] was inserted or changed.
/// - Despawns all previous layers of the owner; nothing is diffed or reused.
/// - Each new layer gets `ZIndex(owner + priority)`, the owner's [`Anchor`]
///   (default if absent) and a bitmap requested from [`BitmapStore`].
/// - Missing party, event or database resources read as empty.
#[allow(clippy::too_many_arguments)]
pub fn rebuild_equipment_layers(
    mut commands: Commands,
    owners: Query<
        (
            Entity,
            &CharacterIdentity,
            Option<&ZIndex>,
            Option<&Anchor>,
            Option<&EquipmentLayers>,
        ),
        Changed<CharacterIdentity>,
    >,
    existing_layers: Query<(), With<EquipmentLayer>>,
    party: Option<Res<Party>>,
    events: Option<Res<EventStore>>,
    db: Option<Res<ItemDatabase>>,
    config: Res<EquipmentConfig>,
    mut bitmaps: ResMut<BitmapStore>,
) {
    if owners.is_empty() {
        return;
    }

    let no_party = Party::default();
    let no_events = EventStore::default();
    let no_items = ItemDatabase::default();
    let party = party.as_deref().unwrap_or(&no_party);
    let events = events.as_deref().unwrap_or(&no_events);
    let db = db.as_deref().unwrap_or(&no_items);

    for (owner, identity, base_z, anchor, old_layers) in owners.iter() {
        if let Some(old_layers) = old_layers {
            for layer in old_layers.iter() {
                if existing_layers.contains(layer) {
                    commands.entity(layer).despawn();
                }
            }
        }

        let base_z = base_z.copied().unwrap_or_default();
        let anchor = anchor.copied().unwrap_or_default();

        let mut layers: SmallVec<[Entity; 4]> = SmallVec::new();
        for descriptor in select_descriptors(identity, party, events, db) {
            let bitmap = bitmaps.load(
                &config.equipments_path,
                &descriptor.file,
                config.hue,
                config.smooth,
            );
            let z = base_z.offset_by(descriptor.priority);
            debug!(
                "Equipment layer '{}' #{} on {:?}: offset={}, z={}",
                descriptor.file, descriptor.index, owner, descriptor.offset, z.0
            );

            let layer = commands
                .spawn((
                    EquipmentLayer::new(owner, &descriptor),
                    z,
                    Sprite::blank(bitmap, anchor.0),
                    ChildOf(owner),
                ))
                .id();
            layers.push(layer);
        }

        commands.entity(owner).insert(EquipmentLayers(layers));
    }
}

/// Crop each layer's sprite to the owner's current walk-cycle frame.
///
/// Layers whose bitmap is pending or failed, or whose owner has no
/// [`CharacterPose`], show nothing.
pub fn sync_equipment_frames(
    mut layers: Query<(&EquipmentLayer, &mut Sprite)>,
    poses: Query<&CharacterPose>,
    bitmaps: Res<BitmapStore>,
) {
    for (layer, mut sprite) in layers.iter_mut() {
        let size = bitmaps.size(&sprite.bitmap);
        match (size, poses.get(layer.owner)) {
            (Some((width, height)), Ok(pose)) => {
                let frame = layer.frame_for(width, height, *pose);
                if sprite.frame() != frame {
                    sprite.set_frame(frame);
                }
            }
            _ => {
                if !sprite.is_blank() {
                    sprite.clear_frame();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::database::{Item, ItemKind};
    use crate::resources::eventstore::EventData;
    use crate::resources::party::Actor;

    fn db() -> ItemDatabase {
        let mut db = ItemDatabase::new();
        db.insert(ItemKind::Weapon, Item::new(1, "Sword", "<graphic:Weapons, 1>"));
        db.insert(ItemKind::Weapon, Item::new(2, "Spear", "<graphic:Weapons, 2>"));
        db.insert(ItemKind::Armor, Item::new(1, "Helm", "<graphic:Helmets, 0>\n<priority:1>"));
        db.insert(ItemKind::Armor, Item::new(2, "Ring", "plain ring"));
        db
    }

    fn party() -> Party {
        let mut party = Party::new();
        party.insert_actor(Actor::new(1, "Harold").with_equips([
            Some(EquipRef::weapon(1)),
            None,
            Some(EquipRef::armor(2)),
            Some(EquipRef::armor(1)),
        ]));
        party.insert_actor(Actor::new(2, "Therese").with_equips([Some(EquipRef::weapon(2))]));
        party.add_member(1);
        party.add_member(2);
        party
    }

    fn files(descriptors: &[EquipmentDescriptor]) -> Vec<&str> {
        descriptors.iter().map(|d| d.file.as_str()).collect()
    }

    #[test]
    fn test_leader_wears_graphic_items_in_slot_order() {
        let selected = select_descriptors(
            &CharacterIdentity::PlayerLeader,
            &party(),
            &EventStore::new(),
            &db(),
        );
        assert_eq!(files(&selected), vec!["Weapons", "Helmets"]);
        assert_eq!(selected[0].index, 1);
        assert_eq!(selected[1].priority, 1);
    }

    #[test]
    fn test_follower_wears_own_actor_items() {
        let selected = select_descriptors(
            &CharacterIdentity::Follower { member_index: 1 },
            &party(),
            &EventStore::new(),
            &db(),
        );
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].index, 2);
    }

    #[test]
    fn test_missing_follower_or_leader_is_empty() {
        let identity = CharacterIdentity::Follower { member_index: 5 };
        assert!(select_descriptors(&identity, &party(), &EventStore::new(), &db()).is_empty());
        assert!(
            select_descriptors(
                &CharacterIdentity::PlayerLeader,
                &Party::new(),
                &EventStore::new(),
                &db()
            )
            .is_empty()
        );
    }

    #[test]
    fn test_tagged_event_uses_tag_order_and_skips_unresolved() {
        let mut events = EventStore::new();
        events.insert(EventData::new(3, "Guard", "<equips:w 2, a 99, x 1, a 1, a 2>"));
        let selected = select_descriptors(
            &CharacterIdentity::TaggedEvent { event_id: 3 },
            &Party::new(),
            &events,
            &db(),
        );
        assert_eq!(files(&selected), vec!["Weapons", "Helmets"]);
        assert_eq!(selected[0].index, 2);
    }

    #[test]
    fn test_event_without_tag_or_record_is_empty() {
        let mut events = EventStore::new();
        events.insert(EventData::new(1, "Chest", "just a chest"));
        for event_id in [1, 2] {
            let identity = CharacterIdentity::TaggedEvent { event_id };
            assert!(select_descriptors(&identity, &party(), &events, &db()).is_empty());
        }
    }

    #[test]
    fn test_other_identity_wears_nothing() {
        assert!(
            select_descriptors(&CharacterIdentity::Other, &party(), &EventStore::new(), &db())
                .is_empty()
        );
    }
}
