//! Touch events raised by [`TouchEventDispatcher`].
//!
//! [`TouchEventDispatcher`]: crate::components::touchdispatcher::TouchEventDispatcher

/// State of one finger relative to an entity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchActionEvent {
    /// Finger position in screen pixels.
    pub x: f32,
    pub y: f32,
    /// Finger slot index.
    pub finger: usize,
    /// The entity has been tapped (finger went down over it).
    pub tap: bool,
    /// The finger moved since the previous frame.
    pub moved: bool,
    /// The finger left the entity or lifted.
    pub released: bool,
    /// Pressure in `0.0..=1.0`.
    pub pressure: f32,
}
