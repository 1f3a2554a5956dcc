//! Owner-side components of a character sprite.
//!
//! A character sprite entity is expected to carry:
//! - [`CharacterIdentity`] – who the sprite depicts; (re)inserting it rebuilds
//!   the equipment layers
//! - [`CharacterPose`] – the walk-cycle cell written by the host every frame
//! - [`ZIndex`](super::zindex::ZIndex) – base stacking value
//! - [`Anchor`] – optional pivot, copied onto each layer

use bevy_ecs::prelude::Component;
use glam::Vec2;

/// Which game character a sprite depicts, and so where its equipment comes from.
///
/// Inserting this component (even with an unchanged value) counts as an
/// identity assignment and replaces every equipment layer of the sprite.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharacterIdentity {
    /// The player character; wears the party leader's equipment.
    PlayerLeader,
    /// A party follower; wears the equipment of the party member at
    /// `member_index` (the leader is member 0).
    Follower { member_index: usize },
    /// A map event; wears the items listed in its `equips` note tag.
    TaggedEvent { event_id: u32 },
    /// Anything else (vehicles, decorations). Never wears equipment.
    Other,
}

/// Current walk-cycle cell of a character sprite.
///
/// `pattern_x` is the animation step column (0..3) and `pattern_y` the
/// direction row (0..4), both relative to the character's own block in the
/// sheet.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CharacterPose {
    pub pattern_x: u32,
    pub pattern_y: u32,
}

impl CharacterPose {
    pub fn new(pattern_x: u32, pattern_y: u32) -> Self {
        Self {
            pattern_x,
            pattern_y,
        }
    }
}

/// Normalised pivot of a sprite; `(0.5, 1.0)` is bottom-centre.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Anchor(pub Vec2);

impl Default for Anchor {
    fn default() -> Self {
        Anchor(Vec2::new(0.5, 1.0))
    }
}
