//! Per-frame pointer snapshot.
//!
//! The host fills a [`MouseState`] once per frame (see
//! [`crate::systems::input::poll_mouse_state`]) and hands it to the core
//! through [`FrameContext`](super::framecontext::FrameContext). The core only
//! reads it; edge detection (`just_pressed`) is already done by the host.

use raylib::prelude::Vector2;

/// The three pointer buttons the hit-testers care about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}

impl MouseButton {
    /// Buttons in dispatch priority order.
    pub const PRIORITY: [MouseButton; 3] = [MouseButton::Left, MouseButton::Middle, MouseButton::Right];

    fn slot(self) -> usize {
        match self {
            MouseButton::Left => 0,
            MouseButton::Middle => 1,
            MouseButton::Right => 2,
        }
    }
}

/// Boolean button state for one frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct ButtonState {
    /// The button is held this frame.
    pub down: bool,
    /// The button went from up to down this frame.
    pub just_pressed: bool,
    /// The button went from down to up this frame.
    pub just_released: bool,
}

/// Pointer snapshot: current and previous cursor position plus button edges.
#[derive(Debug, Clone, Copy)]
pub struct MouseState {
    pub position: Vector2,
    pub last_position: Vector2,
    buttons: [ButtonState; 3],
}

impl Default for MouseState {
    fn default() -> Self {
        Self {
            position: Vector2::zero(),
            last_position: Vector2::zero(),
            buttons: [ButtonState::default(); 3],
        }
    }
}

impl MouseState {
    /// A snapshot with the cursor resting at `(x, y)` on this and the last frame.
    pub fn at(x: f32, y: f32) -> Self {
        Self {
            position: Vector2 { x, y },
            last_position: Vector2 { x, y },
            ..Self::default()
        }
    }

    /// Start a new frame: the current position becomes the last one and the
    /// edge flags are cleared. Held buttons stay held.
    pub fn next_frame(&mut self, x: f32, y: f32) {
        self.last_position = self.position;
        self.position = Vector2 { x, y };
        for button in self.buttons.iter_mut() {
            button.just_pressed = false;
            button.just_released = false;
        }
    }

    /// Record an up→down transition for `button` on this frame.
    pub fn press(&mut self, button: MouseButton) {
        let state = &mut self.buttons[button.slot()];
        state.just_pressed = !state.down;
        state.down = true;
    }

    /// Record a down→up transition for `button` on this frame.
    pub fn release(&mut self, button: MouseButton) {
        let state = &mut self.buttons[button.slot()];
        state.just_released = state.down;
        state.down = false;
    }

    /// Overwrite the raw state of `button`.
    pub fn set_button(&mut self, button: MouseButton, state: ButtonState) {
        self.buttons[button.slot()] = state;
    }

    pub fn button(&self, button: MouseButton) -> ButtonState {
        self.buttons[button.slot()]
    }

    /// The button went down this frame.
    pub fn just_clicked(&self, button: MouseButton) -> bool {
        self.buttons[button.slot()].just_pressed
    }

    /// The button is currently held.
    pub fn is_down(&self, button: MouseButton) -> bool {
        self.buttons[button.slot()].down
    }

    /// Highest-priority button that went down this frame.
    pub fn first_just_clicked(&self) -> Option<MouseButton> {
        MouseButton::PRIORITY
            .into_iter()
            .find(|b| self.just_clicked(*b))
    }

    /// Highest-priority button currently held.
    pub fn first_down(&self) -> Option<MouseButton> {
        MouseButton::PRIORITY.into_iter().find(|b| self.is_down(*b))
    }
}
