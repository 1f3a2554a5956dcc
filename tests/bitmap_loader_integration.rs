//! Integration tests for the background bitmap loader.
//!
//! These spawn the real loader thread and read PNG files written to a
//! temporary directory.

use std::time::{Duration, Instant};

use bevy_ecs::prelude::*;

use visualequip::components::character::{CharacterIdentity, CharacterPose};
use visualequip::components::equipmentlayer::EquipmentLayers;
use visualequip::components::sprite::Sprite;
use visualequip::components::zindex::ZIndex;
use visualequip::resources::bitmaploader::{setup_bitmap_loader, shutdown_bitmap_loader};
use visualequip::resources::bitmapstore::{BitmapState, BitmapStore};
use visualequip::resources::database::{Item, ItemDatabase, ItemKind};
use visualequip::resources::equipmentconfig::EquipmentConfig;
use visualequip::resources::eventstore::{EventData, EventStore};
use visualequip::setup::{add_equipment_systems, init_equipment_resources};

const TIMEOUT: Duration = Duration::from_secs(5);

fn write_png(dir: &std::path::Path, name: &str, width: u32, height: u32) {
    image::RgbaImage::new(width, height)
        .save(dir.join(format!("{}.png", name)))
        .unwrap();
}

fn run_until_loaded(world: &mut World, schedule: &mut Schedule) {
    let started = Instant::now();
    loop {
        schedule.run(world);
        if world.resource::<BitmapStore>().pending_count() == 0 {
            return;
        }
        assert!(started.elapsed() < TIMEOUT, "bitmap loader timed out");
        std::thread::sleep(Duration::from_millis(5));
    }
}

#[test]
fn loader_thread_resolves_and_reports_failures() {
    let dir = tempfile::tempdir().unwrap();
    write_png(dir.path(), "Helmets", 96, 64);
    write_png(dir.path(), "$Wings", 30, 40);

    let mut world = World::new();
    let mut config = EquipmentConfig::new();
    config.set_equipments_path(dir.path().to_string_lossy().into_owned());
    init_equipment_resources(&mut world, config);

    let mut db = ItemDatabase::new();
    db.insert(ItemKind::Armor, Item::new(1, "Cap", "<graphic:Helmets, 5>"));
    db.insert(ItemKind::Armor, Item::new(2, "Wings", "<graphic:$Wings, 0>"));
    db.insert(ItemKind::Weapon, Item::new(1, "Lost", "<graphic:Missing, 0>"));
    world.insert_resource(db);

    let mut events = EventStore::new();
    events.insert(EventData::new(7, "Angel", "<equips:a 1, a 2, w 1>"));
    world.insert_resource(events);

    setup_bitmap_loader(&mut world);

    let angel = world
        .spawn((
            CharacterIdentity::TaggedEvent { event_id: 7 },
            CharacterPose::new(2, 1),
            ZIndex(0),
        ))
        .id();

    let mut schedule = Schedule::default();
    add_equipment_systems(&mut schedule);
    run_until_loaded(&mut world, &mut schedule);
    shutdown_bitmap_loader(&mut world);

    let layers: Vec<Entity> = world
        .get::<EquipmentLayers>(angel)
        .unwrap()
        .iter()
        .collect();
    assert_eq!(layers.len(), 3);

    let store = world.resource::<BitmapStore>();

    // Packed sheet 96x64: 8x8 cells; index 5 -> block (3, 4), pose (2, 1)
    let cap = world.get::<Sprite>(layers[0]).unwrap();
    assert_eq!(
        store.state(&cap.bitmap),
        Some(BitmapState::Ready {
            width: 96,
            height: 64
        })
    );
    assert_eq!(cap.width, 8.0);
    assert_eq!(cap.height, 8.0);
    assert_eq!(cap.offset.x, (3 + 2) as f32 * 8.0);
    assert_eq!(cap.offset.y, (4 + 1) as f32 * 8.0);

    // Large sheet 30x40: 10x10 cells
    let wings = world.get::<Sprite>(layers[1]).unwrap();
    assert_eq!(wings.width, 10.0);
    assert_eq!(wings.offset.x, 20.0);
    assert_eq!(wings.offset.y, 10.0);

    let lost = world.get::<Sprite>(layers[2]).unwrap();
    assert_eq!(store.state(&lost.bitmap), Some(BitmapState::Failed));
    assert!(lost.is_blank());
}

#[test]
fn shutdown_without_loader_is_a_no_op() {
    let mut world = World::new();
    shutdown_bitmap_loader(&mut world);
    assert!(world.get_resource::<BitmapStore>().is_none());
}
