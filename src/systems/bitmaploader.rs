//! Bitmap loading backed by a dedicated thread.
//!
//! - [`bitmap_loader_thread`] runs on its own OS thread, reads image headers
//!   and reports their size as [`LoaderMessage`]s.
//! - [`forward_bitmap_requests`] hands new [`BitmapStore`] requests to the
//!   thread.
//! - [`poll_bitmap_messages`] non-blockingly drains the thread's results into
//!   the ECS message queue.
//! - [`apply_bitmap_messages`] marks store entries ready or failed.
//! - [`update_bitmap_messages`] advances the message queue.
//!
//! See also: [`crate::events::bitmap`] and [`crate::resources::bitmaploader`].

use bevy_ecs::prelude::*;
use crossbeam_channel::{Receiver, Sender};
use log::{debug, warn};

use crate::events::bitmap::{LoaderCmd, LoaderMessage};
use crate::resources::bitmaploader::BitmapLoaderBridge;
use crate::resources::bitmapstore::BitmapStore;

/// Send every newly requested bitmap to the loader thread.
///
/// Without a [`BitmapLoaderBridge`] the requests stay queued in the store.
pub fn forward_bitmap_requests(
    bridge: Option<Res<BitmapLoaderBridge>>,
    mut store: ResMut<BitmapStore>,
) {
    let Some(bridge) = bridge else {
        return;
    };
    for handle in store.take_requests() {
        // Ignore send errors on shutdown
        let _ = bridge.tx_cmd.send(LoaderCmd::Load { handle });
    }
}

/// Drain finished loads from the loader thread into `Messages<LoaderMessage>`.
pub fn poll_bitmap_messages(
    bridge: Option<Res<BitmapLoaderBridge>>,
    mut writer: MessageWriter<LoaderMessage>,
) {
    if let Some(bridge) = bridge {
        writer.write_batch(bridge.rx_msg.try_iter());
    }
}

/// Record load results in the [`BitmapStore`].
pub fn apply_bitmap_messages(
    mut reader: MessageReader<LoaderMessage>,
    mut store: ResMut<BitmapStore>,
) {
    for msg in reader.read() {
        match msg {
            LoaderMessage::Loaded {
                handle,
                width,
                height,
            } => {
                debug!(
                    "Bitmap {} ready ({}x{})",
                    handle.path().display(),
                    width,
                    height
                );
                store.mark_ready(handle, *width, *height);
            }
            LoaderMessage::LoadFailed { handle, error } => {
                warn!("Bitmap {} failed to load: {}", handle.path().display(), error);
                store.mark_failed(handle);
            }
        }
    }
}

/// Advance the ECS message queue for [`LoaderMessage`].
pub fn update_bitmap_messages(mut msgs: ResMut<Messages<LoaderMessage>>) {
    msgs.update();
}

/// Entry point of the loader thread.
///
/// Blocks on the command channel and answers each [`LoaderCmd::Load`] with
/// the image size read from the file header. Returns on
/// [`LoaderCmd::Shutdown`] or when the ECS side drops its sender.
pub fn bitmap_loader_thread(rx_cmd: Receiver<LoaderCmd>, tx_msg: Sender<LoaderMessage>) {
    debug!(
        "[bitmaps] loader thread starting (id={:?})",
        std::thread::current().id()
    );

    for cmd in rx_cmd.iter() {
        match cmd {
            LoaderCmd::Load { handle } => {
                let msg = match image::image_dimensions(handle.path()) {
                    Ok((width, height)) => LoaderMessage::Loaded {
                        handle,
                        width,
                        height,
                    },
                    Err(e) => LoaderMessage::LoadFailed {
                        handle,
                        error: e.to_string(),
                    },
                };
                if tx_msg.send(msg).is_err() {
                    break;
                }
            }
            LoaderCmd::Shutdown => break,
        }
    }

    debug!("[bitmaps] loader thread exiting");
}
