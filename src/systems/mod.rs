//! Host-side systems.
//!
//! - [`input`] – poll raylib into the mouse and touch snapshots
//! - [`render`] – draw command seam and the raylib render pass

pub mod input;
pub mod render;
