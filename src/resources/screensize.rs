//! Screen size resource.
//!
//! Stores the current framebuffer dimensions in pixels. The motion component
//! uses it as its default clamp viewport.

use raylib::prelude::Rectangle;

/// Current screen size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenSize {
    /// Width in pixels.
    pub w: i32,
    /// Height in pixels.
    pub h: i32,
}

impl ScreenSize {
    pub fn new(w: i32, h: i32) -> Self {
        Self { w, h }
    }

    /// The full screen as a rectangle anchored at the origin.
    pub fn rect(&self) -> Rectangle {
        Rectangle {
            x: 0.0,
            y: 0.0,
            width: self.w as f32,
            height: self.h as f32,
        }
    }
}
