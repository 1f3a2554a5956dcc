//! ECS resources that bridge the main thread with the background bitmap loader.
//!
//! Use [`setup_bitmap_loader`] once during initialization to spawn the loader
//! thread and insert the [`BitmapLoaderBridge`] and `Messages<LoaderMessage>`
//! resources. Call [`shutdown_bitmap_loader`] during teardown to stop and join
//! the thread.
//!
//! Without a bridge, requests simply stay pending in the
//! [`BitmapStore`](crate::resources::bitmapstore::BitmapStore); tests use that
//! to drive load results by hand.

use crate::events::bitmap::{LoaderCmd, LoaderMessage};
use crate::systems::bitmaploader::bitmap_loader_thread;
use bevy_ecs::prelude::*;
use crossbeam_channel::{Receiver, Sender, unbounded};

/// Shared bridge between the ECS world and the loader thread.
#[derive(Resource)]
pub struct BitmapLoaderBridge {
    /// Sender for [`LoaderCmd`] messages (ECS -> loader thread).
    pub tx_cmd: Sender<LoaderCmd>,
    /// Receiver for [`LoaderMessage`] messages (loader thread -> ECS).
    pub rx_msg: Receiver<LoaderMessage>,
    /// Join handle for the loader thread.
    pub handle: std::thread::JoinHandle<()>,
}

/// Spawn the loader thread and register bridge resources.
pub fn setup_bitmap_loader(world: &mut World) {
    let (tx_cmd, rx_cmd) = unbounded::<LoaderCmd>();
    let (tx_msg, rx_msg) = unbounded::<LoaderMessage>();

    let handle = std::thread::spawn(move || bitmap_loader_thread(rx_cmd, tx_msg));

    world.insert_resource(BitmapLoaderBridge {
        tx_cmd,
        rx_msg,
        handle,
    });
    world.init_resource::<Messages<LoaderMessage>>();
}

/// Ask the loader thread to stop and join it.
///
/// Loads still queued behind the shutdown command are dropped.
pub fn shutdown_bitmap_loader(world: &mut World) {
    if let Some(bridge) = world.remove_resource::<BitmapLoaderBridge>() {
        let _ = bridge.tx_cmd.send(LoaderCmd::Shutdown);
        let _ = bridge.handle.join();
    }
}
