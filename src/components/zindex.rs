//! Z-index component for render ordering.
//!
//! Owner sprites carry their base stacking value in [`ZIndex`]; every
//! equipment layer carries its own, computed once as the owner's value plus
//! the item's priority. Paint order among siblings is decided by this value
//! alone, never by spawn order.

use bevy_ecs::prelude::Component;

/// Rendering order hint for 2D drawing.
///
/// Higher values are drawn later (on top). Your renderer can sort by
/// `ZIndex` to achieve a painter's algorithm.
#[derive(Component, Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct ZIndex(pub i32);

impl ZIndex {
    /// Stacking value offset by `priority`.
    pub fn offset_by(self, priority: i32) -> Self {
        ZIndex(self.0.saturating_add(priority))
    }
}
