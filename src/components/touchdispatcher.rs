//! Multi-touch hit-testing component.
//!
//! Same shape as the mouse dispatcher, per finger slot: a finger inside the
//! sprite's screen rectangle emits `hover` every frame; a finger that was
//! hovering and is no longer inside (or lifted) emits one `released`.
//! Either a single slot (`finger_target`) or every slot is tested.
//! A slot that is not touching counts as outside.

use raylib::prelude::{Rectangle, Vector2};

use crate::components::{SpriteComponent, hit_contains};
use crate::entity::sprite::SpriteState;
use crate::events::Observers;
use crate::events::touch::TouchActionEvent;
use crate::resources::framecontext::FrameContext;
use crate::resources::touch::{MAX_FINGER_POINTS, TouchState};

#[derive(Debug)]
pub struct TouchEventDispatcher {
    enabled: bool,
    /// Slot tested when `test_all_fingers` is off.
    pub finger_target: usize,
    pub test_all_fingers: bool,
    hovered: [bool; MAX_FINGER_POINTS],
    bounds: Rectangle,
    pub hover: Observers<TouchActionEvent>,
    pub released: Observers<TouchActionEvent>,
}

impl Default for TouchEventDispatcher {
    fn default() -> Self {
        Self {
            enabled: true,
            finger_target: 0,
            test_all_fingers: false,
            hovered: [false; MAX_FINGER_POINTS],
            bounds: Rectangle {
                x: 0.0,
                y: 0.0,
                width: 0.0,
                height: 0.0,
            },
            hover: Observers::new(),
            released: Observers::new(),
        }
    }
}

impl TouchEventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Test every finger slot instead of `finger_target` only.
    pub fn all_fingers() -> Self {
        Self {
            test_all_fingers: true,
            ..Self::default()
        }
    }

    pub fn hovered(&self, finger: usize) -> bool {
        self.hovered.get(finger).copied().unwrap_or(false)
    }

    fn test_finger(&mut self, sprite: &mut SpriteState, touch: &TouchState, finger: usize) {
        let Some(latched) = self.hovered.get(finger).copied() else {
            return;
        };
        let inside = touch
            .position(finger)
            .filter(|p| hit_contains(&self.bounds, p.x, p.y));

        if let Some(position) = inside {
            sprite.hovered = true;
            sprite.clicked |= touch.pressed(finger);
            self.hovered[finger] = true;
            self.hover.emit(&TouchActionEvent {
                x: position.x,
                y: position.y,
                finger,
                tap: sprite.clicked,
                moved: touch.moved(finger),
                released: false,
                pressure: touch.pressure(finger),
            });
        } else if latched {
            self.hovered[finger] = false;
            let position = touch.last_known_position(finger).unwrap_or(Vector2::zero());
            self.released.emit(&TouchActionEvent {
                x: position.x,
                y: position.y,
                finger,
                tap: false,
                moved: false,
                released: true,
                pressure: touch.pressure(finger),
            });
        }
    }
}

impl SpriteComponent for TouchEventDispatcher {
    fn enabled(&self) -> bool {
        self.enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn update(&mut self, sprite: &mut SpriteState, ctx: &FrameContext<'_>) {
        self.bounds = sprite.hit_bounds();
        if self.test_all_fingers {
            for finger in 0..ctx.touch.max_finger_points() {
                self.test_finger(sprite, ctx.touch, finger);
            }
        } else {
            self.test_finger(sprite, ctx.touch, self.finger_target);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::mouse::MouseState;
    use crate::resources::screensize::ScreenSize;
    use crate::resources::worldtime::WorldTime;

    fn sprite() -> SpriteState {
        let mut sprite = SpriteState::new("pad");
        sprite.position = Vector2 { x: 0.0, y: 0.0 };
        sprite.width = 50.0;
        sprite.height = 50.0;
        sprite
    }

    fn run(d: &mut TouchEventDispatcher, s: &mut SpriteState, touch: &TouchState) {
        let time = WorldTime::from_delta(1.0 / 60.0);
        let mouse = MouseState::default();
        let ctx = FrameContext::new(&time, &mouse, touch, ScreenSize::new(640, 360));
        s.begin_frame(None);
        d.update(s, &ctx);
    }

    #[test]
    fn test_finger_press_inside_is_a_tap() {
        let mut d = TouchEventDispatcher::new();
        let hover = d.hover.channel();
        let mut s = sprite();
        let mut touch = TouchState::new();
        touch.touch(0, 10.0, 10.0, 0.7);
        run(&mut d, &mut s, &touch);

        let event = hover.try_recv().unwrap();
        assert!(event.tap);
        assert!(!event.released);
        assert_eq!(event.finger, 0);
        assert!((event.pressure - 0.7).abs() < 1e-6);
        assert!(s.clicked);
        assert!(d.hovered(0));
    }

    #[test]
    fn test_lifting_finger_releases_once_at_last_position() {
        let mut d = TouchEventDispatcher::new();
        let released = d.released.channel();
        let mut s = sprite();
        let mut touch = TouchState::new();
        touch.touch(0, 10.0, 10.0, 1.0);
        run(&mut d, &mut s, &touch);

        touch.next_frame();
        touch.lift(0);
        run(&mut d, &mut s, &touch);
        run(&mut d, &mut s, &touch);

        let events: Vec<_> = released.try_iter().collect();
        assert_eq!(events.len(), 1);
        assert!(events[0].released);
        assert_eq!((events[0].x, events[0].y), (10.0, 10.0));
        assert!(!d.hovered(0));
    }

    #[test]
    fn test_other_fingers_ignored_unless_testing_all() {
        let mut touch = TouchState::new();
        touch.touch(3, 20.0, 20.0, 0.5);

        let mut single = TouchEventDispatcher::new();
        let single_rx = single.hover.channel();
        let mut s = sprite();
        run(&mut single, &mut s, &touch);
        assert!(single_rx.try_recv().is_err());

        let mut all = TouchEventDispatcher::all_fingers();
        let all_rx = all.hover.channel();
        run(&mut all, &mut s, &touch);
        let event = all_rx.try_recv().unwrap();
        assert_eq!(event.finger, 3);
    }

    #[test]
    fn test_held_finger_reports_movement_without_new_tap() {
        let mut d = TouchEventDispatcher::new();
        let hover = d.hover.channel();
        let mut s = sprite();
        let mut touch = TouchState::new();
        touch.touch(0, 10.0, 10.0, 1.0);
        run(&mut d, &mut s, &touch);
        touch.next_frame();
        touch.touch(0, 12.0, 10.0, 1.0);
        run(&mut d, &mut s, &touch);

        let events: Vec<_> = hover.try_iter().collect();
        assert_eq!(events.len(), 2);
        assert!(!events[1].tap);
        assert!(events[1].moved);
    }

    #[test]
    fn test_out_of_range_target_is_ignored() {
        let mut d = TouchEventDispatcher::new();
        d.finger_target = MAX_FINGER_POINTS + 5;
        let mut s = sprite();
        run(&mut d, &mut s, &TouchState::new());
        assert!(!d.hovered(MAX_FINGER_POINTS + 5));
    }
}
