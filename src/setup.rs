//! Wiring of the equipment resources and systems into a host world.
//!
//! The host keeps computing character poses itself; it only has to order its
//! pose systems before [`EquipmentSystems::FrameSync`]:
//!
//! ```ignore
//! init_equipment_resources(&mut world, EquipmentConfig::new());
//! add_equipment_systems(&mut update);
//! update.add_systems(update_character_poses.before(EquipmentSystems::FrameSync));
//! ```

use bevy_ecs::prelude::*;

use crate::events::bitmap::LoaderMessage;
use crate::resources::bitmapstore::BitmapStore;
use crate::resources::database::ItemDatabase;
use crate::resources::equipmentconfig::EquipmentConfig;
use crate::resources::eventstore::EventStore;
use crate::resources::party::Party;
use crate::systems::bitmaploader::{
    apply_bitmap_messages, forward_bitmap_requests, poll_bitmap_messages, update_bitmap_messages,
};
use crate::systems::equipment::{rebuild_equipment_layers, sync_equipment_frames};

/// Ordered stages of the equipment update, run in declaration order.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum EquipmentSystems {
    /// Rebuild layer sets of sprites whose identity was assigned.
    Rebuild,
    /// Exchange requests and results with the bitmap loader.
    Assets,
    /// Crop layer frames to the owners' poses.
    FrameSync,
}

/// Insert the resources the equipment systems need.
///
/// `config` replaces any existing [`EquipmentConfig`]. Party, database and
/// event resources already inserted by the host are kept.
pub fn init_equipment_resources(world: &mut World, config: EquipmentConfig) {
    world.insert_resource(config);
    world.init_resource::<BitmapStore>();
    world.init_resource::<Messages<LoaderMessage>>();
    world.init_resource::<Party>();
    world.init_resource::<ItemDatabase>();
    world.init_resource::<EventStore>();
}

/// Register the equipment systems and their ordering on `schedule`.
pub fn add_equipment_systems(schedule: &mut Schedule) {
    schedule.configure_sets(
        (
            EquipmentSystems::Rebuild,
            EquipmentSystems::Assets,
            EquipmentSystems::FrameSync,
        )
            .chain(),
    );
    schedule.add_systems(rebuild_equipment_layers.in_set(EquipmentSystems::Rebuild));
    schedule.add_systems(
        (
            forward_bitmap_requests,
            poll_bitmap_messages,
            apply_bitmap_messages,
            update_bitmap_messages,
        )
            .chain()
            .in_set(EquipmentSystems::Assets),
    );
    schedule.add_systems(sync_equipment_frames.in_set(EquipmentSystems::FrameSync));
}
