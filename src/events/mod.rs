//! Messages exchanged between the ECS world and background workers.
//!
//! - [`bitmap`] – load requests to, and results from, the bitmap loader thread

pub mod bitmap;
