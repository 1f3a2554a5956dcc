//! Equipment bitmap cache.
//!
//! [`BitmapStore::load`] never blocks: the first request for an image creates
//! a [`Pending`](BitmapState::Pending) entry and queues it for the background
//! loader (see [`crate::resources::bitmaploader`]); later identical requests
//! return the same shared [`BitmapHandle`]. Once the loader reports back, the
//! entry becomes [`Ready`](BitmapState::Ready) with the image size, or
//! [`Failed`](BitmapState::Failed). Sprites whose bitmap is not ready simply
//! draw nothing.
//!
//! Requests for handles that nobody uses any more are still completed and
//! cached; there is no cancellation.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use bevy_ecs::prelude::Resource;
use rustc_hash::FxHashMap;

/// Identity of a cached bitmap: resolved file path plus load options.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BitmapKey {
    pub path: PathBuf,
    pub hue: i32,
    pub smooth: bool,
}

/// Shared handle to a cached bitmap. Cloning is cheap.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BitmapHandle(Arc<BitmapKey>);

impl BitmapHandle {
    pub fn key(&self) -> &BitmapKey {
        &self.0
    }

    pub fn path(&self) -> &Path {
        &self.0.path
    }

    /// Whether both handles are the very same cache entry.
    pub fn same_as(&self, other: &BitmapHandle) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// Load state of a cached bitmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitmapState {
    Pending,
    Ready { width: u32, height: u32 },
    Failed,
}

#[derive(Resource, Debug, Default)]
pub struct BitmapStore {
    entries: FxHashMap<BitmapKey, (BitmapHandle, BitmapState)>,
    requests: Vec<BitmapHandle>,
}

impl BitmapStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request `<folder><file>.png`, returning the shared handle.
    pub fn load(&mut self, folder: &str, file: &str, hue: i32, smooth: bool) -> BitmapHandle {
        let key = BitmapKey {
            path: PathBuf::from(format!("{}{}.png", folder, file)),
            hue,
            smooth,
        };
        if let Some((handle, _)) = self.entries.get(&key) {
            return handle.clone();
        }

        let handle = BitmapHandle(Arc::new(key.clone()));
        self.entries
            .insert(key, (handle.clone(), BitmapState::Pending));
        self.requests.push(handle.clone());
        handle
    }

    pub fn state(&self, handle: &BitmapHandle) -> Option<BitmapState> {
        self.entries.get(handle.key()).map(|(_, state)| *state)
    }

    /// Pixel size of a ready bitmap.
    pub fn size(&self, handle: &BitmapHandle) -> Option<(u32, u32)> {
        match self.state(handle)? {
            BitmapState::Ready { width, height } => Some((width, height)),
            _ => None,
        }
    }

    /// Take the handles requested since the last call, oldest first.
    pub fn take_requests(&mut self) -> Vec<BitmapHandle> {
        std::mem::take(&mut self.requests)
    }

    pub fn mark_ready(&mut self, handle: &BitmapHandle, width: u32, height: u32) {
        if let Some((_, state)) = self.entries.get_mut(handle.key()) {
            *state = BitmapState::Ready { width, height };
        }
    }

    pub fn mark_failed(&mut self, handle: &BitmapHandle) {
        if let Some((_, state)) = self.entries.get_mut(handle.key()) {
            *state = BitmapState::Failed;
        }
    }

    /// Number of entries still waiting for the loader.
    pub fn pending_count(&self) -> usize {
        self.entries
            .values()
            .filter(|(_, state)| *state == BitmapState::Pending)
            .count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
