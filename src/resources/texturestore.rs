//! Raylib-backed texture store.
//!
//! [`TextureStore`] owns every loaded [`Texture2D`] keyed by asset name.
//! [`RaylibContent`] borrows the store together with the raylib handle for
//! the duration of a load pass and implements [`ContentLoader`] on top of
//! them. The render sink reads textures back from the store by key.

use std::path::{Path, PathBuf};

use log::debug;
use raylib::prelude::{RaylibHandle, RaylibThread, Texture2D};
use rustc_hash::FxHashMap;

use crate::error::{EngineError, Result};
use crate::resources::content::{ContentLoader, TextureHandle};

/// Loaded textures keyed by asset name.
pub struct TextureStore {
    pub map: FxHashMap<String, Texture2D>,
    root: PathBuf,
}

impl TextureStore {
    /// Create an empty store resolving asset names under `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            map: FxHashMap::default(),
            root: root.into(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Texture2D> {
        self.map.get(key)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// File path for `asset`. Names without an extension get `.png`.
    pub fn resolve(&self, asset: &str) -> PathBuf {
        let mut path = self.root.join(asset);
        if Path::new(asset).extension().is_none() {
            path.set_extension("png");
        }
        path
    }
}

/// [`ContentLoader`] over raylib for one load pass.
pub struct RaylibContent<'a> {
    pub rl: &'a mut RaylibHandle,
    pub thread: &'a RaylibThread,
    pub store: &'a mut TextureStore,
}

impl<'a> RaylibContent<'a> {
    pub fn new(
        rl: &'a mut RaylibHandle,
        thread: &'a RaylibThread,
        store: &'a mut TextureStore,
    ) -> Self {
        Self { rl, thread, store }
    }
}

impl ContentLoader for RaylibContent<'_> {
    fn load_texture(&mut self, asset: &str) -> Result<TextureHandle> {
        if let Some(texture) = self.store.get(asset) {
            return Ok(TextureHandle::new(asset, texture.width, texture.height));
        }

        let path = self.store.resolve(asset);
        let texture = self
            .rl
            .load_texture(self.thread, &path.to_string_lossy())
            .map_err(|e| EngineError::ContentLoad {
                asset: asset.to_string(),
                reason: e.to_string(),
            })?;
        debug!(
            "Loaded texture '{}' ({}x{}) from {:?}",
            asset, texture.width, texture.height, path
        );
        let handle = TextureHandle::new(asset, texture.width, texture.height);
        self.store.map.insert(asset.to_string(), texture);
        Ok(handle)
    }

    fn unload_texture(&mut self, handle: &TextureHandle) {
        if self.store.map.remove(handle.key.as_ref()).is_some() {
            debug!("Unloaded texture '{}'", handle.key);
        }
    }
}
