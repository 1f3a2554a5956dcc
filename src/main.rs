//! Visual equipment inspector.
//!
//! A headless tool that builds the equipment layers of one character and
//! prints them, so authors can check their note tags without starting the
//! game:
//!
//! ```sh
//! visualequip --data ./data leader --equips "w 1, a 3"
//! visualequip --data ./data --pattern 1 --direction 2 event --equips "a 1, w 2"
//! ```
//!
//! `--data` must contain `Weapons.json` and `Armors.json`. Equipment images
//! are read from the folder configured in `config.ini` (`[equipment] path`),
//! or `--path` when given.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use bevy_ecs::prelude::*;
use clap::{Parser, Subcommand};
use log::{info, warn};

use visualequip::components::character::{Anchor, CharacterIdentity, CharacterPose};
use visualequip::components::equipmentlayer::{EquipmentLayer, EquipmentLayers};
use visualequip::components::sprite::Sprite;
use visualequip::components::zindex::ZIndex;
use visualequip::descriptor::parse_equips_tag;
use visualequip::resources::bitmaploader::{setup_bitmap_loader, shutdown_bitmap_loader};
use visualequip::resources::bitmapstore::{BitmapState, BitmapStore};
use visualequip::resources::database::ItemDatabase;
use visualequip::resources::equipmentconfig::EquipmentConfig;
use visualequip::resources::eventstore::{EventData, EventStore};
use visualequip::resources::party::{Actor, Party};
use visualequip::setup::{add_equipment_systems, init_equipment_resources};

const LOAD_TIMEOUT: Duration = Duration::from_secs(5);
const TICK: Duration = Duration::from_millis(16);

/// Print the equipment layers a character would wear.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Directory holding Weapons.json and Armors.json.
    #[arg(long, value_name = "DIR")]
    data: PathBuf,

    /// INI configuration file.
    #[arg(long, value_name = "PATH", default_value = "./config.ini")]
    config: PathBuf,

    /// Equipment image folder; overrides the configuration file.
    #[arg(long, value_name = "DIR")]
    path: Option<String>,

    /// Walk-cycle step column of the character.
    #[arg(long, default_value_t = 1)]
    pattern: u32,

    /// Direction row of the character.
    #[arg(long, default_value_t = 0)]
    direction: u32,

    /// Base stacking value of the character sprite.
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    z: i32,

    #[command(subcommand)]
    character: CharacterArg,
}

#[derive(Subcommand)]
enum CharacterArg {
    /// The party leader, wearing the given items in slot order.
    Leader {
        /// Items as in an event tag, e.g. "w 1, a 3".
        #[arg(long, default_value = "")]
        equips: String,
    },
    /// A map event carrying an `<equips:...>` tag.
    Event {
        /// Value of the event's equips tag, e.g. "a 1, w 2".
        #[arg(long)]
        equips: String,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = EquipmentConfig::with_path(&cli.config);
    if let Err(e) = config.load_from_file() {
        warn!("Config file not found or invalid, using defaults: {}", e);
    }
    if let Some(path) = cli.path {
        config.set_equipments_path(path);
    }

    let mut db = ItemDatabase::new();
    if let Err(e) = db.load_from_dir(&cli.data) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    let mut world = World::new();
    init_equipment_resources(&mut world, config);
    world.insert_resource(db);

    let identity = match cli.character {
        CharacterArg::Leader { equips } => {
            let mut party = Party::new();
            party.insert_actor(
                Actor::new(1, "Leader").with_equips(parse_equips_tag(&equips).into_iter().map(Some)),
            );
            party.add_member(1);
            world.insert_resource(party);
            CharacterIdentity::PlayerLeader
        }
        CharacterArg::Event { equips } => {
            let mut events = EventStore::new();
            events.insert(EventData::new(1, "Event", format!("<equips:{}>", equips)));
            world.insert_resource(events);
            CharacterIdentity::TaggedEvent { event_id: 1 }
        }
    };

    setup_bitmap_loader(&mut world);

    let character = world
        .spawn((
            identity,
            CharacterPose::new(cli.pattern, cli.direction),
            ZIndex(cli.z),
            Anchor::default(),
        ))
        .id();

    let mut update = Schedule::default();
    add_equipment_systems(&mut update);

    // Tick until every requested bitmap has resolved
    let started = Instant::now();
    loop {
        update.run(&mut world);
        if world.resource::<BitmapStore>().pending_count() == 0 {
            break;
        }
        if started.elapsed() > LOAD_TIMEOUT {
            warn!("Gave up waiting for bitmaps after {:?}", LOAD_TIMEOUT);
            break;
        }
        std::thread::sleep(TICK);
    }

    shutdown_bitmap_loader(&mut world);
    print_layers(&world, character);
}

fn print_layers(world: &World, character: Entity) {
    let layers: Vec<Entity> = world
        .get::<EquipmentLayers>(character)
        .map(|layers| layers.iter().collect())
        .unwrap_or_default();
    info!("{} equipment layer(s)", layers.len());

    let store = world.resource::<BitmapStore>();
    for (n, entity) in layers.iter().enumerate() {
        let (Some(layer), Some(sprite), Some(z)) = (
            world.get::<EquipmentLayer>(*entity),
            world.get::<Sprite>(*entity),
            world.get::<ZIndex>(*entity),
        ) else {
            continue;
        };
        let state = match store.state(&sprite.bitmap) {
            Some(BitmapState::Ready { width, height }) => format!("{}x{}", width, height),
            Some(BitmapState::Failed) => "failed".to_string(),
            Some(BitmapState::Pending) | None => "pending".to_string(),
        };
        println!(
            "#{} {} [{}] index={} offset=({}, {}) z={} bitmap={} frame=({}, {}, {}, {})",
            n,
            layer.file,
            sprite.bitmap.path().display(),
            layer.index,
            layer.offset.x,
            layer.offset.y,
            z.0,
            state,
            sprite.offset.x,
            sprite.offset.y,
            sprite.width,
            sprite.height
        );
    }
}
