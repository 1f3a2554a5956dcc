use bevy_ecs::message::Message;

use crate::resources::bitmapstore::BitmapHandle;

/// Commands sent *to* the bitmap loader thread
#[derive(Debug)]
pub enum LoaderCmd {
    Load { handle: BitmapHandle },
    Shutdown,
}

/// Results sent *back* from the bitmap loader thread
#[derive(Message, Debug, Clone)]
pub enum LoaderMessage {
    Loaded {
        handle: BitmapHandle,
        width: u32,
        height: u32,
    },
    LoadFailed {
        handle: BitmapHandle,
        error: String,
    },
}
