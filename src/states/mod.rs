//! Game states (screens).
//!
//! A game is a stack of [`GameState`]s owned by a
//! [`StateManager`](manager::StateManager). Each frame the manager updates
//! every enabled state and draws every visible one, in insertion order, so a
//! pause overlay added after the level draws on top of it.
//!
//! - [`manager`] – ordered, name-indexed state collection
//! - [`scene`] – ready-made state owning a root sprite group

pub mod manager;
pub mod scene;

use std::any::Any;

use crate::entity::Lifecycle;
use crate::error::Result;
use crate::resources::content::ContentLoader;
use crate::resources::framecontext::FrameContext;
use crate::systems::render::DrawSink;

/// One screen of the game.
pub trait GameState: Any {
    fn lifecycle(&self) -> &Lifecycle;
    fn lifecycle_mut(&mut self) -> &mut Lifecycle;

    fn name(&self) -> &str {
        self.lifecycle().name()
    }

    /// One-time setup. Repeated calls are no-ops.
    fn initialize(&mut self);
    fn load_content(&mut self, content: &mut dyn ContentLoader) -> Result<()>;
    fn unload_content(&mut self, content: &mut dyn ContentLoader);

    fn update(&mut self, ctx: &FrameContext<'_>);
    fn draw(&mut self, ctx: &FrameContext<'_>, sink: &mut dyn DrawSink);

    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}
