//! Equipment systems.
//!
//! Submodules overview
//! - [`bitmaploader`] – bridge with the bitmap loader thread (forward requests, poll results)
//! - [`equipment`] – rebuild layer sets on identity assignment and crop layer frames every tick

pub mod bitmaploader;
pub mod equipment;
