//! Input polling.
//!
//! Reads the hardware state from raylib once per frame and writes it into the
//! [`MouseState`] and [`TouchState`] snapshots handed to the core through the
//! frame context. Positions are converted from window pixels to scene
//! coordinates through the frame's camera.

use raylib::RaylibHandle;
use raylib::consts::MouseButton as RaylibButton;
use raylib::prelude::Camera2D;

use crate::resources::mouse::{ButtonState, MouseButton, MouseState};
use crate::resources::touch::TouchState;

fn raylib_button(button: MouseButton) -> RaylibButton {
    match button {
        MouseButton::Left => RaylibButton::MOUSE_BUTTON_LEFT,
        MouseButton::Middle => RaylibButton::MOUSE_BUTTON_MIDDLE,
        MouseButton::Right => RaylibButton::MOUSE_BUTTON_RIGHT,
    }
}

/// Poll the cursor position and the three buttons.
pub fn poll_mouse_state(rl: &RaylibHandle, camera: Camera2D, mouse: &mut MouseState) {
    let position = rl.get_screen_to_world2D(rl.get_mouse_position(), camera);
    mouse.next_frame(position.x, position.y);
    for button in MouseButton::PRIORITY {
        let key = raylib_button(button);
        mouse.set_button(
            button,
            ButtonState {
                down: rl.is_mouse_button_down(key),
                just_pressed: rl.is_mouse_button_pressed(key),
                just_released: rl.is_mouse_button_released(key),
            },
        );
    }
}

/// Poll touch points into finger slots, in the order raylib reports them.
///
/// Raylib exposes no pressure, so touching fingers report full pressure.
/// Slots past the reported count, or past `max_points`, are lifted.
pub fn poll_touch_state(rl: &RaylibHandle, camera: Camera2D, touch: &mut TouchState, max_points: usize) {
    touch.next_frame();
    let count = (rl.get_touch_point_count() as usize)
        .min(max_points)
        .min(touch.max_finger_points());
    for finger in 0..touch.max_finger_points() {
        if finger < count {
            let position = rl.get_screen_to_world2D(rl.get_touch_position(finger as u32), camera);
            touch.touch(finger, position.x, position.y, 1.0);
        } else {
            touch.lift(finger);
        }
    }
}
