//! Content loading seam.
//!
//! Sprites never load pixels themselves. They ask a [`ContentLoader`] for a
//! [`TextureHandle`], a cheap key plus the texture dimensions. The loader owns
//! the actual GPU resource; the draw sink resolves the key when drawing.

use std::sync::Arc;

use crate::error::Result;

/// Shared reference to a loaded texture.
///
/// Several sprites may hold handles to the same texture; only the loader
/// owns the resource behind it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TextureHandle {
    /// Key the loader and draw sink use to find the texture.
    pub key: Arc<str>,
    /// Width in pixels.
    pub width: i32,
    /// Height in pixels.
    pub height: i32,
}

impl TextureHandle {
    pub fn new(key: impl Into<Arc<str>>, width: i32, height: i32) -> Self {
        Self {
            key: key.into(),
            width,
            height,
        }
    }
}

/// Synchronous texture loader provided by the host.
pub trait ContentLoader {
    /// Load (or fetch from cache) the texture named `asset`.
    fn load_texture(&mut self, asset: &str) -> Result<TextureHandle>;

    /// Release the texture behind `handle`.
    fn unload_texture(&mut self, handle: &TextureHandle);
}
