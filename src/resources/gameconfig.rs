//! Engine settings read from an INI file.
//!
//! ```ini
//! [render]
//! width = 640
//! height = 360
//!
//! [window]
//! width = 1280
//! height = 720
//! fullscreen = false
//! vsync = true
//! target_fps = 120
//!
//! [touch]
//! max_points = 10
//!
//! [assets]
//! root = ./assets/textures
//! ```
//!
//! Keys absent from the file leave the current value untouched, so a fresh
//! [`GameConfig`] plus a partial file yields defaults for the rest.

use std::path::PathBuf;

use configparser::ini::Ini;
use log::info;

use crate::error::{EngineError, Result};
use crate::resources::touch::MAX_FINGER_POINTS;

/// Startup settings for the host window and the scene.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Scene resolution; the window scales it to fit.
    pub render_width: u32,
    pub render_height: u32,
    pub window_width: u32,
    pub window_height: u32,
    pub target_fps: u32,
    pub vsync: bool,
    pub fullscreen: bool,
    /// Finger slots polled per frame, at most [`MAX_FINGER_POINTS`].
    pub max_touch_points: usize,
    /// Directory textures are resolved against.
    pub asset_root: PathBuf,
    /// File read by [`GameConfig::load_from_file`] and written by
    /// [`GameConfig::save_to_file`].
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            render_width: 640,
            render_height: 360,
            window_width: 1280,
            window_height: 720,
            target_fps: 120,
            vsync: true,
            fullscreen: false,
            max_touch_points: MAX_FINGER_POINTS,
            asset_root: PathBuf::from("./assets/textures"),
            config_path: PathBuf::from("./config.ini"),
        }
    }
}

fn read_u32(ini: &Ini, section: &str, key: &str, slot: &mut u32) {
    if let Ok(Some(value)) = ini.getuint(section, key) {
        *slot = value as u32;
    }
}

fn read_bool(ini: &Ini, section: &str, key: &str, slot: &mut bool) {
    if let Ok(Some(value)) = ini.getbool(section, key) {
        *slot = value;
    }
}

impl GameConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults, reading from and writing to `path`.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::default()
        }
    }

    /// Overlay the values found in the config file.
    ///
    /// Fails with [`EngineError::Config`] when the file cannot be read or
    /// parsed; `self` is left unchanged in that case.
    pub fn load_from_file(&mut self) -> Result<()> {
        let mut ini = Ini::new();
        ini.load(&self.config_path).map_err(|e| {
            EngineError::Config(format!("cannot read {}: {e}", self.config_path.display()))
        })?;

        read_u32(&ini, "render", "width", &mut self.render_width);
        read_u32(&ini, "render", "height", &mut self.render_height);
        read_u32(&ini, "window", "width", &mut self.window_width);
        read_u32(&ini, "window", "height", &mut self.window_height);
        read_u32(&ini, "window", "target_fps", &mut self.target_fps);
        read_bool(&ini, "window", "vsync", &mut self.vsync);
        read_bool(&ini, "window", "fullscreen", &mut self.fullscreen);
        if let Ok(Some(points)) = ini.getuint("touch", "max_points") {
            self.max_touch_points = (points as usize).min(MAX_FINGER_POINTS);
        }
        if let Some(root) = ini.get("assets", "root") {
            self.asset_root = PathBuf::from(root);
        }

        info!(
            "Config {}: render {}x{}, window {}x{} @{}fps (vsync {}, fullscreen {}), {} touch points",
            self.config_path.display(),
            self.render_width,
            self.render_height,
            self.window_width,
            self.window_height,
            self.target_fps,
            self.vsync,
            self.fullscreen,
            self.max_touch_points
        );
        Ok(())
    }

    /// Write every setting to the config file, creating it if needed.
    pub fn save_to_file(&self) -> Result<()> {
        let mut ini = Ini::new();
        let entries = [
            ("render", "width", self.render_width.to_string()),
            ("render", "height", self.render_height.to_string()),
            ("window", "width", self.window_width.to_string()),
            ("window", "height", self.window_height.to_string()),
            ("window", "target_fps", self.target_fps.to_string()),
            ("window", "vsync", self.vsync.to_string()),
            ("window", "fullscreen", self.fullscreen.to_string()),
            ("touch", "max_points", self.max_touch_points.to_string()),
            ("assets", "root", self.asset_root.to_string_lossy().into_owned()),
        ];
        for (section, key, value) in entries {
            ini.set(section, key, Some(value));
        }

        ini.write(&self.config_path).map_err(|e| {
            EngineError::Config(format!("cannot write {}: {e}", self.config_path.display()))
        })?;
        info!("Config saved to {}", self.config_path.display());
        Ok(())
    }

    pub fn window_size(&self) -> (u32, u32) {
        (self.window_width, self.window_height)
    }

    pub fn render_size(&self) -> (u32, u32) {
        (self.render_width, self.render_height)
    }
}
