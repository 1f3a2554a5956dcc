//! ECS components for character sprites and their equipment layers.
//!
//! Submodules overview:
//! - [`character`] – identity, walk-cycle pose and anchor of an owner sprite
//! - [`equipmentlayer`] – one overlay per equipped item and the owner's layer list
//! - [`sprite`] – bitmap handle plus the frame rectangle cropped from it
//! - [`zindex`] – rendering order hint for 2D drawing

pub mod character;
pub mod equipmentlayer;
pub mod sprite;
pub mod zindex;
