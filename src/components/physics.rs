//! Linear motion component.
//!
//! Each `update` moves the sprite by `velocity * acceleration` (component
//! wise) and then multiplies `velocity` by `max_velocity`. Acceleration is a
//! per-frame multiplier and `max_velocity` a decay factor, not a kinematic
//! integration nor a speed cap.
//!
//! In `post_update` an optional boundary policy keeps the sprite inside the
//! viewport (clamp, zeroing velocity) or teleports it to the opposite edge
//! (wraparound). The two policies exclude each other.

use raylib::prelude::{Rectangle, Vector2};

use crate::components::SpriteComponent;
use crate::entity::sprite::SpriteState;
use crate::resources::framecontext::FrameContext;

#[derive(Debug, Clone)]
pub struct SpritePhysics {
    enabled: bool,
    /// Per-frame multiplier applied to `velocity` when translating.
    pub acceleration: Vector2,
    /// Displacement per frame before acceleration.
    pub velocity: Vector2,
    /// Factor applied to `velocity` after every move.
    pub max_velocity: f32,
    /// Boundary rectangle. `None` uses the whole screen.
    pub viewport: Option<Rectangle>,
    force_inside_screen: bool,
    allow_wraparound: bool,
}

impl Default for SpritePhysics {
    fn default() -> Self {
        Self {
            enabled: true,
            acceleration: Vector2 { x: 1.0, y: 1.0 },
            velocity: Vector2::zero(),
            max_velocity: 1.0,
            viewport: None,
            force_inside_screen: false,
            allow_wraparound: false,
        }
    }
}

impl SpritePhysics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: start moving with `velocity`.
    pub fn with_velocity(mut self, velocity: Vector2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn force_inside_screen(&self) -> bool {
        self.force_inside_screen
    }

    /// Enabling the clamp disables wraparound.
    pub fn set_force_inside_screen(&mut self, value: bool) {
        self.force_inside_screen = value;
        if value {
            self.allow_wraparound = false;
        }
    }

    pub fn allow_wraparound(&self) -> bool {
        self.allow_wraparound
    }

    /// Enabling wraparound disables the clamp.
    pub fn set_allow_wraparound(&mut self, value: bool) {
        self.allow_wraparound = value;
        if value {
            self.force_inside_screen = false;
        }
    }

    fn clamp_inside(&mut self, sprite: &mut SpriteState, vp: Rectangle) {
        let (right, bottom) = (vp.x + vp.width, vp.y + vp.height);
        let Vector2 { x: ox, y: oy } = sprite.origin;
        let (w, h) = (sprite.width, sprite.height);

        if sprite.position.x - ox < vp.x {
            sprite.position.x = vp.x + ox;
            self.velocity = Vector2::zero();
        } else if sprite.position.x + (w - ox) > right {
            sprite.position.x = right - (w - ox);
            self.velocity = Vector2::zero();
        }

        if sprite.position.y - oy < vp.y {
            sprite.position.y = vp.y + oy;
            self.velocity = Vector2::zero();
        } else if sprite.position.y + (h - oy) > bottom {
            sprite.position.y = bottom - (h - oy);
            self.velocity = Vector2::zero();
        }
    }

    fn wrap_around(sprite: &mut SpriteState, vp: Rectangle) {
        let (right, bottom) = (vp.x + vp.width, vp.y + vp.height);
        let ox = sprite.origin.x;

        if sprite.position.x + (sprite.width - ox) < vp.x {
            sprite.position.x = right - ox;
        } else if sprite.position.x > right {
            sprite.position.x = vp.x;
        }

        if sprite.position.y + sprite.height < vp.y {
            sprite.position.y = bottom;
        } else if sprite.position.y > bottom {
            sprite.position.y = vp.y;
        }
    }
}

impl SpriteComponent for SpritePhysics {
    fn enabled(&self) -> bool {
        self.enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn update(&mut self, sprite: &mut SpriteState, _ctx: &FrameContext<'_>) {
        sprite.translate(
            self.velocity.x * self.acceleration.x,
            self.velocity.y * self.acceleration.y,
        );
        self.velocity = self.velocity * self.max_velocity;
    }

    fn post_update(&mut self, sprite: &mut SpriteState, ctx: &FrameContext<'_>) {
        let viewport = self.viewport.unwrap_or_else(|| ctx.screen_rect());
        if self.force_inside_screen {
            self.clamp_inside(sprite, viewport);
        } else if self.allow_wraparound {
            Self::wrap_around(sprite, viewport);
        }
    }
}
