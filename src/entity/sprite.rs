//! Visual entity.
//!
//! A [`Sprite`] is split in two halves: [`SpriteState`], the data every
//! component may read and mutate, and the [`ComponentList`] of behaviours
//! attached to it. The split lets the sprite hand `&mut SpriteState` to each
//! component while it iterates the list.
//!
//! Per frame the owner calls `update`, then `post_update` (or lets `draw`
//! run it lazily), then `draw`:
//! - `update` clears the interaction flags, snapshots the last position,
//!   recomputes the screen position and runs every component's `update`.
//! - `post_update` recomputes bounds, distance and direction, then runs every
//!   component's `post_update`.
//! - `draw` emits a [`DrawCommand`] when visible and textured.

use log::debug;
use raylib::prelude::{Color, Rectangle, Vector2};

use crate::components::animator::SpriteAnimator;
use crate::components::{ComponentList, SpriteComponent};
use crate::entity::{Lifecycle, SceneNode};
use crate::error::{EngineError, Result};
use crate::resources::content::{ContentLoader, TextureHandle};
use crate::resources::framecontext::FrameContext;
use crate::systems::render::{DrawCommand, DrawSink, tint_with_alpha};

/// Everything a sprite knows about itself, minus its components.
#[derive(Debug)]
pub struct SpriteState {
    pub lifecycle: Lifecycle,
    /// Pivot position in parent space.
    pub position: Vector2,
    /// Unscaled size. Zero means "take it from the texture on load".
    pub width: f32,
    pub height: f32,
    /// Rotation in radians.
    pub rotation: f32,
    pub scale: Vector2,
    /// Pivot offset in unscaled pixels, used for rotation, scale and hit-tests.
    pub origin: Vector2,
    /// Draw ordering hint, lower first.
    pub layer_depth: f32,
    pub color: Color,
    pub flip_h: bool,
    pub flip_v: bool,
    /// Spritesheet cell to draw. `None` draws the whole texture.
    pub source_rectangle: Option<Rectangle>,
    /// Asset name handed to the content loader.
    pub asset_name: String,
    /// Set by hit-testers during the current frame.
    pub hovered: bool,
    /// Set by hit-testers during the current frame.
    pub clicked: bool,
    texture: Option<TextureHandle>,
    alpha: f32,
    bounds: Rectangle,
    last_position: Vector2,
    distance: Vector2,
    last_distance: Vector2,
    direction: Vector2,
    screen_position: Vector2,
    has_parent: bool,
    post_updated: bool,
}

impl SpriteState {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            lifecycle: Lifecycle::new(name),
            position: Vector2::zero(),
            width: 0.0,
            height: 0.0,
            rotation: 0.0,
            scale: Vector2 { x: 1.0, y: 1.0 },
            origin: Vector2::zero(),
            layer_depth: 0.0,
            color: Color::WHITE,
            flip_h: false,
            flip_v: false,
            source_rectangle: None,
            asset_name: String::new(),
            hovered: false,
            clicked: false,
            texture: None,
            alpha: 1.0,
            bounds: Rectangle {
                x: 0.0,
                y: 0.0,
                width: 0.0,
                height: 0.0,
            },
            last_position: Vector2::zero(),
            distance: Vector2::zero(),
            last_distance: Vector2::zero(),
            direction: Vector2::zero(),
            screen_position: Vector2::zero(),
            has_parent: false,
            post_updated: false,
        }
    }

    pub fn name(&self) -> &str {
        self.lifecycle.name()
    }

    pub fn translate(&mut self, dx: f32, dy: f32) {
        self.position.x += dx;
        self.position.y += dy;
    }

    pub fn move_to(&mut self, x: f32, y: f32) {
        self.position = Vector2 { x, y };
    }

    pub fn texture(&self) -> Option<&TextureHandle> {
        self.texture.as_ref()
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    /// Clamped to `0.0..=1.0`.
    pub fn set_alpha(&mut self, alpha: f32) {
        self.alpha = alpha.clamp(0.0, 1.0);
    }

    /// Axis-aligned bounds as of the last `post_update`.
    pub fn bounds(&self) -> Rectangle {
        self.bounds
    }

    pub fn last_position(&self) -> Vector2 {
        self.last_position
    }

    /// Position delta of the current frame.
    pub fn distance(&self) -> Vector2 {
        self.distance
    }

    /// Position delta of the previous frame.
    pub fn last_distance(&self) -> Vector2 {
        self.last_distance
    }

    /// Direction of the last movement. Normalized only for diagonal motion.
    pub fn direction(&self) -> Vector2 {
        self.direction
    }

    pub fn screen_position(&self) -> Vector2 {
        self.screen_position
    }

    pub fn has_parent(&self) -> bool {
        self.has_parent
    }

    pub fn scaled_width(&self) -> f32 {
        self.width * self.scale.x
    }

    pub fn scaled_height(&self) -> f32 {
        self.height * self.scale.y
    }

    /// Screen-space rectangle used by the hit-testers, in whole pixels.
    pub fn hit_bounds(&self) -> Rectangle {
        Rectangle {
            x: (self.screen_position.x - self.origin.x).trunc(),
            y: (self.screen_position.y - self.origin.y).trunc(),
            width: self.scaled_width().trunc(),
            height: self.scaled_height().trunc(),
        }
    }

    fn refresh_bounds(&mut self) {
        self.bounds = Rectangle {
            x: self.position.x.trunc(),
            y: self.position.y.trunc(),
            width: self.width,
            height: self.height,
        };
    }

    /// Reset per-frame flags and recompute the screen position.
    pub(crate) fn begin_frame(&mut self, parent_screen: Option<Vector2>) {
        self.clicked = false;
        self.hovered = false;
        self.post_updated = false;
        self.screen_position = match parent_screen {
            Some(parent) => self.position + parent,
            None => self.position,
        };
    }

    fn snapshot_motion(&mut self) {
        self.last_position = self.position;
        self.last_distance = self.distance;
    }

    fn finish_motion(&mut self) {
        self.refresh_bounds();
        self.distance = Vector2 {
            x: self.position.x - self.last_position.x,
            y: self.position.y - self.last_position.y,
        };
        self.direction = if self.distance.x != 0.0 && self.distance.y != 0.0 {
            self.distance.normalized()
        } else {
            self.distance
        };
    }

    fn draw_command(&self) -> Option<DrawCommand> {
        let texture = self.texture.clone()?;
        Some(DrawCommand {
            texture,
            position: self.position,
            source: self.source_rectangle,
            tint: tint_with_alpha(self.color, self.alpha),
            rotation: self.rotation,
            origin: self.origin,
            scale: self.scale,
            flip_h: self.flip_h,
            flip_v: self.flip_v,
            layer_depth: self.layer_depth,
        })
    }
}

/// A positioned, drawable entity with pluggable components.
#[derive(Debug)]
pub struct Sprite {
    state: SpriteState,
    components: ComponentList,
}

impl Sprite {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            state: SpriteState::new(name),
            components: ComponentList::new(),
        }
    }

    /// A sprite that will load `asset` on `load_content`.
    pub fn with_asset(name: impl Into<String>, position: Vector2, asset: impl Into<String>) -> Self {
        let mut sprite = Self::new(name);
        sprite.state.position = position;
        sprite.state.last_position = position;
        sprite.state.asset_name = asset.into();
        sprite
    }

    pub fn state(&self) -> &SpriteState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut SpriteState {
        &mut self.state
    }

    pub fn components(&self) -> &ComponentList {
        &self.components
    }

    /// Attach a default `T`, or return the one already attached.
    pub fn add_component<T: SpriteComponent + Default>(&mut self) -> &mut T {
        self.components.add::<T>(&mut self.state)
    }

    /// Attach a pre-configured `T` unless one is already attached.
    pub fn insert_component<T: SpriteComponent>(&mut self, component: T) -> &mut T {
        self.components.insert(component, &mut self.state)
    }

    pub fn component<T: SpriteComponent>(&self) -> Option<&T> {
        self.components.get::<T>()
    }

    pub fn component_mut<T: SpriteComponent>(&mut self) -> Option<&mut T> {
        self.components.get_mut::<T>()
    }

    pub fn remove_component<T: SpriteComponent>(&mut self) -> Option<Box<T>> {
        self.components.remove::<T>()
    }

    pub fn has_component<T: SpriteComponent>(&self) -> bool {
        self.components.contains::<T>()
    }

    /// Run `f` with the `T` component and the sprite data borrowed together.
    pub fn with_component<T, R>(&mut self, f: impl FnOnce(&mut T, &mut SpriteState) -> R) -> Option<R>
    where
        T: SpriteComponent,
    {
        let component = self.components.get_mut::<T>()?;
        Some(f(component, &mut self.state))
    }

    /// Play an animation on the attached animator.
    pub fn play_animation(&mut self, name: &str) -> Result<()> {
        self.with_component(|animator: &mut SpriteAnimator, state| animator.play(state, name))
            .unwrap_or_else(|| Err(EngineError::UnknownAnimation(name.to_string())))
    }

    /// Use an already loaded texture instead of going through a loader.
    pub fn set_texture(&mut self, texture: TextureHandle) {
        self.apply_texture(texture);
        self.state.lifecycle.set_content_loaded(true);
    }

    /// Replace the asset and load it, even if content was already loaded.
    pub fn load_content_from(&mut self, content: &mut dyn ContentLoader, asset: &str) -> Result<()> {
        self.state.asset_name = asset.to_string();
        self.state.texture = None;
        self.state.lifecycle.set_content_loaded(false);
        self.load_content(content)
    }

    fn apply_texture(&mut self, texture: TextureHandle) {
        let (tw, th) = (texture.width as f32, texture.height as f32);
        if self.state.width == 0.0 {
            self.state.width = tw;
        }
        if self.state.height == 0.0 {
            self.state.height = th;
        }
        if self.components.contains::<SpriteAnimator>() {
            self.state.source_rectangle = Some(Rectangle {
                x: 0.0,
                y: 0.0,
                width: tw,
                height: th,
            });
            self.state.width = tw;
            self.state.height = th;
        }
        self.state.texture = Some(texture);
        self.state.refresh_bounds();
    }
}

impl SceneNode for Sprite {
    fn lifecycle(&self) -> &Lifecycle {
        &self.state.lifecycle
    }

    fn lifecycle_mut(&mut self) -> &mut Lifecycle {
        &mut self.state.lifecycle
    }

    fn initialize(&mut self) {
        if self.state.lifecycle.mark_initialized() {
            debug!("Sprite '{}' initialized", self.state.name());
        }
    }

    fn load_content(&mut self, content: &mut dyn ContentLoader) -> Result<()> {
        if self.state.lifecycle.content_loaded() || self.state.asset_name.is_empty() {
            return Ok(());
        }
        let texture = content.load_texture(&self.state.asset_name)?;
        debug!(
            "Sprite '{}' loaded '{}' ({}x{})",
            self.state.name(),
            self.state.asset_name,
            texture.width,
            texture.height
        );
        self.apply_texture(texture);
        self.state.lifecycle.set_content_loaded(true);
        Ok(())
    }

    /// Releases the texture only when the sprite is dirty. Textures are
    /// shared between sprites without reference counting.
    fn unload_content(&mut self, content: &mut dyn ContentLoader) {
        if !self.state.lifecycle.dirty() {
            return;
        }
        if let Some(texture) = self.state.texture.take() {
            debug!("Sprite '{}' unloading '{}'", self.state.name(), texture.key);
            content.unload_texture(&texture);
        }
        self.state.lifecycle.set_content_loaded(false);
    }

    fn update(&mut self, ctx: &FrameContext<'_>, parent_screen: Option<Vector2>) {
        self.state.begin_frame(parent_screen);
        if !self.state.lifecycle.enabled() {
            return;
        }
        self.state.snapshot_motion();
        self.components.update_all(&mut self.state, ctx);
    }

    fn post_update(&mut self, ctx: &FrameContext<'_>) {
        self.state.finish_motion();
        self.components.post_update_all(&mut self.state, ctx);
        self.state.post_updated = true;
    }

    fn draw(&mut self, ctx: &FrameContext<'_>, sink: &mut dyn DrawSink) {
        if self.state.lifecycle.enabled() && !self.state.post_updated {
            self.post_update(ctx);
        }
        if self.state.lifecycle.visible() {
            if let Some(command) = self.state.draw_command() {
                sink.draw(command);
            }
        }
    }

    fn position(&self) -> Vector2 {
        self.state.position
    }

    fn set_position(&mut self, position: Vector2) {
        self.state.position = position;
    }

    fn translate(&mut self, dx: f32, dy: f32) {
        self.state.translate(dx, dy);
    }

    fn screen_position(&self) -> Vector2 {
        self.state.screen_position
    }

    fn rotation(&self) -> f32 {
        self.state.rotation
    }

    fn set_rotation(&mut self, rotation: f32) {
        self.state.rotation = rotation;
    }

    fn scale(&self) -> Vector2 {
        self.state.scale
    }

    fn set_scale(&mut self, scale: Vector2) {
        self.state.scale = scale;
    }

    fn origin(&self) -> Vector2 {
        self.state.origin
    }

    fn set_origin(&mut self, origin: Vector2) {
        self.state.origin = origin;
    }

    fn color(&self) -> Color {
        self.state.color
    }

    fn set_color(&mut self, color: Color) {
        self.state.color = color;
    }

    fn width(&self) -> f32 {
        self.state.width
    }

    fn height(&self) -> f32 {
        self.state.height
    }

    fn has_parent(&self) -> bool {
        self.state.has_parent
    }

    fn set_has_parent(&mut self, has_parent: bool) {
        self.state.has_parent = has_parent;
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}
