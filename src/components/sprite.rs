use bevy_ecs::prelude::Component;
use glam::Vec2;

use crate::resources::bitmapstore::BitmapHandle;

/// Sprite is identified by a bitmap handle and the frame rectangle cropped out of it.
/// The offset is the top-left corner of the frame inside the sheet, width and height its size.
/// The anchor is the normalised pivot used for placement, copied from the owner sprite.
/// A zero-sized frame draws nothing.
#[derive(Component, Clone, Debug, PartialEq)]
pub struct Sprite {
    pub bitmap: BitmapHandle,
    pub width: f32,
    pub height: f32,
    pub offset: Vec2,
    pub anchor: Vec2,
}

impl Sprite {
    /// A sprite that shows nothing until its frame is computed.
    pub fn blank(bitmap: BitmapHandle, anchor: Vec2) -> Self {
        Self {
            bitmap,
            width: 0.0,
            height: 0.0,
            offset: Vec2::ZERO,
            anchor,
        }
    }

    pub fn is_blank(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    pub fn clear_frame(&mut self) {
        self.width = 0.0;
        self.height = 0.0;
        self.offset = Vec2::ZERO;
    }

    pub fn set_frame(&mut self, frame: FrameRect) {
        self.offset = Vec2::new(frame.x, frame.y);
        self.width = frame.width;
        self.height = frame.height;
    }

    pub fn frame(&self) -> FrameRect {
        FrameRect {
            x: self.offset.x,
            y: self.offset.y,
            width: self.width,
            height: self.height,
        }
    }
}

/// Source rectangle inside a sheet, in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}
