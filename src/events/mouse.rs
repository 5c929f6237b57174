//! Pointer events raised by [`MouseEventDispatcher`].
//!
//! Coordinates are screen-space pixels taken from the frame's
//! [`MouseState`](crate::resources::mouse::MouseState) snapshot.
//!
//! [`MouseEventDispatcher`]: crate::components::mousedispatcher::MouseEventDispatcher

use crate::resources::mouse::MouseButton;

/// The cursor is over the entity this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseOverEvent {
    pub x: f32,
    pub y: f32,
}

/// The cursor was over the entity last frame and is not anymore.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseLeaveEvent {
    pub last_x: f32,
    pub last_y: f32,
    pub x: f32,
    pub y: f32,
}

/// A button is pressed over the entity.
///
/// `just_clicked` is true only on the frame the button went down; held
/// buttons report `false`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseClickEvent {
    pub x: f32,
    pub y: f32,
    pub button: MouseButton,
    pub just_clicked: bool,
    pub double_clicked: bool,
}

/// No button is held over the entity, or the hover latch was released.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseReleaseEvent {
    pub x: f32,
    pub y: f32,
}
