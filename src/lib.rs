//! yna2d library.
//!
//! Sprite and entity composition layer for 2D games on raylib: sprites with
//! pluggable components (frame animation, simple physics, mouse and touch
//! hit-testing), sprite groups with relative transforms, and a game-state
//! manager driving the update and draw passes.

pub mod components;
pub mod entity;
pub mod error;
pub mod events;
pub mod resources;
pub mod states;
pub mod systems;
