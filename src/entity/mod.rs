//! Scene entities.
//!
//! A scene is a tree of [`SceneNode`]s: leaf [`Sprite`](sprite::Sprite)s and
//! [`SpriteGroup`](group::SpriteGroup)s that own ordered children. Every node
//! carries a [`Lifecycle`] and exposes the same transform surface, so a group
//! can stand anywhere a sprite can.
//!
//! Frame protocol, driven by the owner once per frame:
//! 1. `update(ctx, parent_screen)` – transform bookkeeping, then components
//! 2. `post_update(ctx)` – direction/distance, then components
//! 3. `draw(ctx, sink)` – runs `post_update` first if the owner skipped it

pub mod group;
pub mod sprite;

use std::any::Any;

use log::debug;
use raylib::prelude::{Color, Vector2};

use crate::error::Result;
use crate::events::Observers;
use crate::events::lifecycle::LifecycleEvent;
use crate::resources::content::ContentLoader;
use crate::resources::framecontext::FrameContext;
use crate::systems::render::DrawSink;

/// Activity flags shared by entities and game states.
///
/// `Uninitialized → Initialized → ContentLoaded → {Active ⇄ Inactive} → Dirty`
#[derive(Debug)]
pub struct Lifecycle {
    name: String,
    enabled: bool,
    visible: bool,
    dirty: bool,
    initialized: bool,
    content_loaded: bool,
    pub killed: Observers<LifecycleEvent>,
    pub revived: Observers<LifecycleEvent>,
}

impl Lifecycle {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            enabled: true,
            visible: true,
            dirty: false,
            initialized: false,
            content_loaded: false,
            killed: Observers::new(),
            revived: Observers::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Enabled and visible.
    pub fn active(&self) -> bool {
        self.enabled && self.visible
    }

    pub fn set_active(&mut self, active: bool) {
        self.enabled = active;
        self.visible = active;
    }

    /// Marked for removal by the owning collection.
    pub fn dirty(&self) -> bool {
        self.dirty
    }

    /// Marking dirty also disables and hides the entity.
    pub fn set_dirty(&mut self, dirty: bool) {
        self.dirty = dirty;
        if dirty {
            self.enabled = false;
            self.visible = false;
        }
    }

    pub fn initialized(&self) -> bool {
        self.initialized
    }

    pub fn content_loaded(&self) -> bool {
        self.content_loaded
    }

    /// Returns `true` the first time it is called.
    pub(crate) fn mark_initialized(&mut self) -> bool {
        !std::mem::replace(&mut self.initialized, true)
    }

    pub(crate) fn set_content_loaded(&mut self, loaded: bool) {
        self.content_loaded = loaded;
    }

    /// Deactivate and notify `killed` observers.
    pub fn kill(&mut self) {
        debug!("Killing '{}'", self.name);
        self.set_active(false);
        let event = LifecycleEvent {
            name: self.name.clone(),
        };
        self.killed.emit(&event);
    }

    /// Reactivate and notify `revived` observers.
    pub fn revive(&mut self) {
        debug!("Reviving '{}'", self.name);
        self.set_active(true);
        let event = LifecycleEvent {
            name: self.name.clone(),
        };
        self.revived.emit(&event);
    }

    /// Mark for removal. The entity stays in its collection until swept.
    pub fn die(&mut self) {
        self.set_dirty(true);
    }
}

/// Common interface of sprites and groups.
///
/// The transform setters on a group broadcast the change to its children;
/// on a sprite they only affect the sprite.
pub trait SceneNode: Any {
    fn lifecycle(&self) -> &Lifecycle;
    fn lifecycle_mut(&mut self) -> &mut Lifecycle;

    fn name(&self) -> &str {
        self.lifecycle().name()
    }

    /// One-time setup. Repeated calls are no-ops.
    fn initialize(&mut self);
    /// Load textures. Repeated calls are no-ops once loaded.
    fn load_content(&mut self, content: &mut dyn ContentLoader) -> Result<()>;
    fn unload_content(&mut self, content: &mut dyn ContentLoader);

    /// First update phase. `parent_screen` is the parent's screen position
    /// when the node is owned by a group.
    fn update(&mut self, ctx: &FrameContext<'_>, parent_screen: Option<Vector2>);
    /// Second update phase.
    fn post_update(&mut self, ctx: &FrameContext<'_>);
    fn draw(&mut self, ctx: &FrameContext<'_>, sink: &mut dyn DrawSink);

    fn position(&self) -> Vector2;
    fn set_position(&mut self, position: Vector2);
    fn translate(&mut self, dx: f32, dy: f32);
    /// Screen-space position computed during the last update.
    fn screen_position(&self) -> Vector2;

    fn rotation(&self) -> f32;
    fn set_rotation(&mut self, rotation: f32);
    fn scale(&self) -> Vector2;
    fn set_scale(&mut self, scale: Vector2);
    fn origin(&self) -> Vector2;
    fn set_origin(&mut self, origin: Vector2);
    fn color(&self) -> Color;
    fn set_color(&mut self, color: Color);

    fn width(&self) -> f32;
    fn height(&self) -> f32;

    fn has_parent(&self) -> bool;
    fn set_has_parent(&mut self, has_parent: bool);

    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Move the node to an absolute position.
    fn move_to(&mut self, x: f32, y: f32) {
        self.set_position(Vector2 { x, y });
    }

    fn kill(&mut self) {
        self.lifecycle_mut().kill();
    }

    fn revive(&mut self) {
        self.lifecycle_mut().revive();
    }

    fn die(&mut self) {
        self.lifecycle_mut().die();
    }
}
