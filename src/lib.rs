//! Visual equipment layers for 2D character sprites.
//!
//! Every character sprite can wear one overlay sprite per equipped item. An
//! item opts in through note tags (`<graphic:file, index>`, `<offset:x, y>`,
//! `<priority:z>`); map events list what they wear with `<equips:a 1, w 2>`.
//! Layers are children of the character sprite, stacked by their own
//! [`ZIndex`](components::zindex::ZIndex) and cropped every frame to the
//! character's current walk-cycle cell.
//!
//! This module exposes the ECS components, resources, systems and events, and
//! [`setup`] to wire them into a host schedule.

pub mod components;
pub mod descriptor;
pub mod events;
pub mod metadata;
pub mod resources;
pub mod setup;
pub mod systems;
