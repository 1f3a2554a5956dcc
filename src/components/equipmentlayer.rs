//! Equipment layer components.
//!
//! Each equipped, graphic-bearing item of a character becomes one layer
//! entity spawned as a [`ChildOf`](bevy_ecs::hierarchy::ChildOf) the owner
//! sprite. A layer is built once from its descriptor and never re-pointed at
//! another item: changing the owner's identity despawns the whole set and
//! builds a new one.
//!
//! The owner keeps the ordered list of its layers in [`EquipmentLayers`].

use bevy_ecs::prelude::{Component, Entity};
use glam::IVec2;
use smallvec::SmallVec;

use crate::components::character::CharacterPose;
use crate::components::sprite::FrameRect;
use crate::descriptor::EquipmentDescriptor;

/// One equipment overlay on a character sprite.
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct EquipmentLayer {
    /// Sprite this layer is drawn over. Read-only back-reference.
    pub owner: Entity,
    /// Source image file name.
    pub file: String,
    /// Character index inside the source image.
    pub index: u32,
    /// Pixel offset relative to the owner.
    pub offset: IVec2,
    /// Single-character sheet (3x4 cells) instead of a packed one (12x8 cells).
    pub large_sheet: bool,
}

impl EquipmentLayer {
    pub fn new(owner: Entity, descriptor: &EquipmentDescriptor) -> Self {
        Self {
            owner,
            file: descriptor.file.clone(),
            index: descriptor.index,
            offset: descriptor.offset,
            large_sheet: descriptor.is_large_sheet(),
        }
    }

    /// Frame to crop out of a `width` x `height` sheet for the owner's pose.
    ///
    /// Uses the same cell layout as character sheets, so the layer always
    /// shows the owner's current walk-cycle step and direction.
    pub fn frame_for(&self, width: u32, height: u32, pose: CharacterPose) -> FrameRect {
        let (columns, rows) = if self.large_sheet { (3.0, 4.0) } else { (12.0, 8.0) };
        let pw = width as f32 / columns;
        let ph = height as f32 / rows;

        let (block_x, block_y) = if self.large_sheet {
            (0, 0)
        } else {
            ((self.index % 4) * 3, (self.index / 4) * 4)
        };

        FrameRect {
            x: (block_x + pose.pattern_x) as f32 * pw,
            y: (block_y + pose.pattern_y) as f32 * ph,
            width: pw,
            height: ph,
        }
    }
}

/// Ordered equipment layers owned by a character sprite.
#[derive(Component, Debug, Clone, Default, PartialEq, Eq)]
pub struct EquipmentLayers(pub SmallVec<[Entity; 4]>);

impl EquipmentLayers {
    pub fn iter(&self) -> impl Iterator<Item = Entity> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layer(file: &str, index: u32) -> EquipmentLayer {
        let owner = Entity::PLACEHOLDER;
        let descriptor = EquipmentDescriptor {
            file: file.to_string(),
            index,
            offset: IVec2::ZERO,
            priority: 0,
        };
        EquipmentLayer::new(owner, &descriptor)
    }

    #[test]
    fn test_large_sheet_ignores_index() {
        let pose = CharacterPose::new(2, 3);
        for index in [0, 5, 7] {
            let frame = layer("$Cape", index).frame_for(144, 192, pose);
            assert_eq!(
                frame,
                FrameRect {
                    x: 96.0,
                    y: 144.0,
                    width: 48.0,
                    height: 48.0
                }
            );
        }
    }

    #[test]
    fn test_packed_sheet_first_character() {
        let frame = layer("Helmets", 0).frame_for(576, 384, CharacterPose::new(1, 0));
        assert_eq!(
            frame,
            FrameRect {
                x: 48.0,
                y: 0.0,
                width: 48.0,
                height: 48.0
            }
        );
    }

    #[test]
    fn test_packed_sheet_second_row_character() {
        // index 6: column block 2, row block 1
        let frame = layer("Helmets", 6).frame_for(576, 384, CharacterPose::new(2, 1));
        assert_eq!(frame.x, ((6 % 4) * 3 + 2) as f32 * 48.0);
        assert_eq!(frame.y, ((6 / 4) * 4 + 1) as f32 * 48.0);
        assert_eq!(frame.width, 48.0);
        assert_eq!(frame.height, 48.0);
    }

    #[test]
    fn test_non_divisible_sheet_keeps_fractional_cells() {
        let frame = layer("Odd", 0).frame_for(100, 100, CharacterPose::new(1, 1));
        assert!((frame.width - 100.0 / 12.0).abs() < 1e-4);
        assert!((frame.height - 12.5).abs() < 1e-4);
        assert!((frame.x - 100.0 / 12.0).abs() < 1e-4);
        assert!((frame.y - 12.5).abs() < 1e-4);
    }
}
