//! Pointer hit-testing component.
//!
//! Every `update` the dispatcher rebuilds its screen rectangle from the
//! sprite's current screen position, origin and scaled size, then checks the
//! cursor against it and emits at most one transition per frame:
//!
//! 1. Cursor inside: `mouse_over`, followed by exactly one of `clicked`
//!    (a button went down this frame), `click` (a button is held) or
//!    `released` (no button).
//! 2. Cursor was inside last frame: `mouse_leave` with both positions.
//! 3. Still latched as hovered: `released`, so a hover always ends with a
//!    release.
//!
//! Buttons are resolved in priority order left, middle, right.

use raylib::prelude::Rectangle;

use crate::components::{SpriteComponent, hit_contains};
use crate::entity::sprite::SpriteState;
use crate::events::Observers;
use crate::events::mouse::{MouseClickEvent, MouseLeaveEvent, MouseOverEvent, MouseReleaseEvent};
use crate::resources::framecontext::FrameContext;

#[derive(Debug)]
pub struct MouseEventDispatcher {
    enabled: bool,
    hovered: bool,
    bounds: Rectangle,
    pub mouse_over: Observers<MouseOverEvent>,
    pub mouse_leave: Observers<MouseLeaveEvent>,
    /// A button went down over the sprite this frame.
    pub clicked: Observers<MouseClickEvent>,
    /// A button is held over the sprite.
    pub click: Observers<MouseClickEvent>,
    pub released: Observers<MouseReleaseEvent>,
}

impl Default for MouseEventDispatcher {
    fn default() -> Self {
        Self {
            enabled: true,
            hovered: false,
            bounds: Rectangle {
                x: 0.0,
                y: 0.0,
                width: 0.0,
                height: 0.0,
            },
            mouse_over: Observers::new(),
            mouse_leave: Observers::new(),
            clicked: Observers::new(),
            click: Observers::new(),
            released: Observers::new(),
        }
    }
}

impl MouseEventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// The cursor is over the sprite and no release was reported since.
    pub fn hovered(&self) -> bool {
        self.hovered
    }

    /// Screen rectangle computed during the last update.
    pub fn bounds(&self) -> Rectangle {
        self.bounds
    }

    fn release(&mut self, x: f32, y: f32) {
        self.hovered = false;
        self.released.emit(&MouseReleaseEvent { x, y });
    }
}

impl SpriteComponent for MouseEventDispatcher {
    fn enabled(&self) -> bool {
        self.enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn update(&mut self, sprite: &mut SpriteState, ctx: &FrameContext<'_>) {
        self.bounds = sprite.hit_bounds();
        let mouse = ctx.mouse;
        let (x, y) = (mouse.position.x, mouse.position.y);

        if hit_contains(&self.bounds, x, y) {
            sprite.hovered = true;
            self.hovered = true;
            self.mouse_over.emit(&MouseOverEvent { x, y });

            if let Some(button) = mouse.first_just_clicked() {
                sprite.clicked = true;
                self.clicked.emit(&MouseClickEvent {
                    x,
                    y,
                    button,
                    just_clicked: true,
                    double_clicked: false,
                });
            } else if let Some(button) = mouse.first_down() {
                self.click.emit(&MouseClickEvent {
                    x,
                    y,
                    button,
                    just_clicked: false,
                    double_clicked: false,
                });
            } else {
                self.release(x, y);
            }
        } else if hit_contains(&self.bounds, mouse.last_position.x, mouse.last_position.y) {
            self.mouse_leave.emit(&MouseLeaveEvent {
                last_x: mouse.last_position.x,
                last_y: mouse.last_position.y,
                x,
                y,
            });
        } else if self.hovered {
            self.release(x, y);
        }
    }
}
