//! Scene state: a [`GameState`] that drives a root [`SpriteGroup`].
//!
//! Each update runs the two-phase protocol on the whole tree (update, then
//! post-update) and sweeps dirty children from the root group. An optional
//! per-frame hook runs between the two phases for game logic.

use log::debug;

use crate::entity::group::SpriteGroup;
use crate::entity::{Lifecycle, SceneNode};
use crate::error::Result;
use crate::resources::content::ContentLoader;
use crate::resources::framecontext::FrameContext;
use crate::states::GameState;
use crate::systems::render::DrawSink;

type SceneHook = Box<dyn FnMut(&mut SpriteGroup, &FrameContext<'_>)>;

pub struct SceneState {
    lifecycle: Lifecycle,
    root: SpriteGroup,
    on_update: Option<SceneHook>,
}

impl std::fmt::Debug for SceneState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SceneState")
            .field("name", &self.lifecycle.name())
            .field("root", &self.root)
            .finish()
    }
}

impl SceneState {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            root: SpriteGroup::new(format!("{name}.root")),
            lifecycle: Lifecycle::new(name),
            on_update: None,
        }
    }

    /// Builder: run `hook` every frame after the scene's update phase and
    /// before its post-update phase.
    pub fn with_update_hook<F>(mut self, hook: F) -> Self
    where
        F: FnMut(&mut SpriteGroup, &FrameContext<'_>) + 'static,
    {
        self.on_update = Some(Box::new(hook));
        self
    }

    pub fn root(&self) -> &SpriteGroup {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut SpriteGroup {
        &mut self.root
    }

    /// Add an entity to the root group.
    pub fn add(&mut self, node: Box<dyn SceneNode>, content: &mut dyn ContentLoader) -> Result<()> {
        self.root.add(node, content)
    }
}

impl GameState for SceneState {
    fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    fn lifecycle_mut(&mut self) -> &mut Lifecycle {
        &mut self.lifecycle
    }

    fn initialize(&mut self) {
        if self.lifecycle.mark_initialized() {
            debug!("Scene '{}' initialized", self.lifecycle.name());
            self.root.initialize();
        }
    }

    fn load_content(&mut self, content: &mut dyn ContentLoader) -> Result<()> {
        if self.lifecycle.content_loaded() {
            return Ok(());
        }
        self.root.load_content(content)?;
        self.lifecycle.set_content_loaded(true);
        debug!("Scene '{}' content loaded", self.lifecycle.name());
        Ok(())
    }

    fn unload_content(&mut self, content: &mut dyn ContentLoader) {
        self.root.unload_content(content);
        self.lifecycle.set_content_loaded(false);
    }

    fn update(&mut self, ctx: &FrameContext<'_>) {
        self.root.update(ctx, None);
        if let Some(hook) = self.on_update.as_mut() {
            hook(&mut self.root, ctx);
        }
        self.root.post_update(ctx);
        self.root.remove_dirty();
    }

    fn draw(&mut self, ctx: &FrameContext<'_>, sink: &mut dyn DrawSink) {
        self.root.draw(ctx, sink);
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}
