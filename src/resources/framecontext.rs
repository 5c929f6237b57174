//! Per-frame context passed through every update and draw call.
//!
//! Replaces engine-wide singletons: whatever a component or entity needs
//! from the host during a frame (clock, input snapshots, screen size) is
//! borrowed here by the frame driver and handed down explicitly.

use raylib::prelude::Rectangle;

use crate::resources::mouse::MouseState;
use crate::resources::screensize::ScreenSize;
use crate::resources::touch::TouchState;
use crate::resources::worldtime::WorldTime;

/// Borrowed view of the host state for one frame.
#[derive(Debug, Clone, Copy)]
pub struct FrameContext<'a> {
    pub time: &'a WorldTime,
    pub mouse: &'a MouseState,
    pub touch: &'a TouchState,
    pub screen: ScreenSize,
}

impl<'a> FrameContext<'a> {
    pub fn new(
        time: &'a WorldTime,
        mouse: &'a MouseState,
        touch: &'a TouchState,
        screen: ScreenSize,
    ) -> Self {
        Self {
            time,
            mouse,
            touch,
            screen,
        }
    }

    /// Seconds elapsed since the previous frame.
    pub fn delta(&self) -> f32 {
        self.time.delta
    }

    /// The whole screen, used as the default clamp viewport.
    pub fn screen_rect(&self) -> Rectangle {
        self.screen.rect()
    }
}
