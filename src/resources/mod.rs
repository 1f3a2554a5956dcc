//! ECS resources made available to systems.
//!
//! The long-lived data this crate reads while building and animating
//! equipment layers. Most of it belongs to the host game (party, databases,
//! events) and is simply inserted into the world by it.
//!
//! Overview
//! - `bitmaploader` – bridge and channels for the background bitmap loader
//! - `bitmapstore` – shared, asynchronously resolved equipment bitmaps
//! - `database` – weapon and armor records with their note metadata
//! - `equipmentconfig` – image folder and load options, from an INI file
//! - `eventstore` – static metadata of map events
//! - `party` – party members and their equip slots
pub mod bitmaploader;
pub mod bitmapstore;
pub mod database;
pub mod equipmentconfig;
pub mod eventstore;
pub mod party;
