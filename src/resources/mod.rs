//! Long-lived data handed to entities and components.
//!
//! Nothing in the core reads process-wide state. The frame driver owns these
//! resources and lends them to the scene every frame through a
//! [`framecontext::FrameContext`].
//!
//! Overview
//! - `camera` – viewport camera converted to a raylib `Camera2D`
//! - `content` – content loader seam and texture handles
//! - `framecontext` – per-frame bundle of clock, input and screen
//! - `gameconfig` – INI backed engine configuration
//! - `mouse` – per-frame pointer snapshot
//! - `screensize` – current framebuffer dimensions in pixels
//! - `texturestore` – loaded textures keyed by asset name
//! - `touch` – per-frame multi-touch snapshot
//! - `worldtime` – simulation time and delta
pub mod camera;
pub mod content;
pub mod framecontext;
pub mod gameconfig;
pub mod mouse;
pub mod screensize;
pub mod texturestore;
pub mod touch;
pub mod worldtime;
