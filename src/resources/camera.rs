//! Viewport camera.
//!
//! [`ViewportCamera`] scrolls, rotates and zooms the whole scene around the
//! screen centre. The render pass converts it into raylib's
//! [`Camera2D`] once per frame.

use raylib::prelude::{Camera2D, Vector2};

use crate::resources::screensize::ScreenSize;

/// Scene-wide view transform.
#[derive(Debug, Clone, Copy)]
pub struct ViewportCamera {
    /// Horizontal scroll in pixels; positive values move the scene right.
    pub x: f32,
    /// Vertical scroll in pixels; positive values move the scene down.
    pub y: f32,
    /// Rotation in degrees around the screen centre.
    pub rotation: f32,
    pub zoom: f32,
}

impl Default for ViewportCamera {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            rotation: 0.0,
            zoom: 1.0,
        }
    }
}

impl ViewportCamera {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raylib camera equivalent for a screen of the given size.
    pub fn to_camera2d(&self, screen: ScreenSize) -> Camera2D {
        self.to_window_camera2d(screen, screen)
    }

    /// Camera showing a scene laid out at `render` size in a window of
    /// `window` size, letterboxed to keep the aspect ratio.
    pub fn to_window_camera2d(&self, render: ScreenSize, window: ScreenSize) -> Camera2D {
        let fit = (window.w as f32 / render.w.max(1) as f32).min(window.h as f32 / render.h.max(1) as f32);
        Camera2D {
            offset: Vector2 {
                x: window.w as f32 / 2.0,
                y: window.h as f32 / 2.0,
            },
            target: Vector2 {
                x: render.w as f32 / 2.0 - self.x,
                y: render.h as f32 / 2.0 - self.y,
            },
            rotation: self.rotation,
            zoom: self.zoom * fit,
        }
    }
}
