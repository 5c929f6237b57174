//! Engine error type.
//!
//! Programming-contract violations (unknown animation, duplicate names, bad
//! indices) and host failures (content loading, configuration) are reported
//! through [`EngineError`]. Conditions that are an expected outcome, such as
//! a missing component or a finger that is not touching, are plain `Option`s
//! and never show up here.

use thiserror::Error;

/// Errors raised by the engine core and its host adapters.
#[derive(Debug, Error)]
pub enum EngineError {
    /// `play` was asked for an animation that was never registered.
    #[error("animation '{0}' is not registered")]
    UnknownAnimation(String),

    /// An animation with the same name already exists in the animator.
    #[error("animation '{0}' is already registered")]
    DuplicateAnimation(String),

    /// An animation resolved to no frames at all.
    #[error("animation '{0}' has no frames")]
    EmptyAnimation(String),

    /// Grid-based animations need `configure` to run first.
    #[error("animator grid is not configured")]
    AnimatorNotConfigured,

    /// A spritesheet cell must have a non-zero size.
    #[error("invalid frame size {width}x{height}")]
    InvalidFrameSize { width: i32, height: i32 },

    /// The operation needs a texture but the sprite has not loaded one yet.
    #[error("sprite '{0}' has no texture loaded")]
    TextureNotLoaded(String),

    /// Two entries of a named collection share a name.
    #[error("name '{0}' is already registered")]
    DuplicateName(String),

    /// Positional access past the end of a collection.
    #[error("index {index} is out of range (len {len})")]
    IndexOutOfRange { index: usize, len: usize },

    /// The state manager does not know the requested state.
    #[error("state '{0}' does not exist")]
    UnknownState(String),

    /// The content loader failed to produce a texture.
    #[error("failed to load asset '{asset}': {reason}")]
    ContentLoad { asset: String, reason: String },

    /// Configuration file could not be read or written.
    #[error("config: {0}")]
    Config(String),

    /// An animation set document could not be parsed.
    #[error("animation set: {0}")]
    AnimationSet(#[from] serde_json::Error),
}

/// Convenience alias used across the engine.
pub type Result<T> = std::result::Result<T, EngineError>;
