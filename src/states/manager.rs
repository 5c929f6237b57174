//! Ordered collection of game states.
//!
//! States are kept in insertion order and indexed by name. The manager
//! remembers whether it was initialized and whether content was loaded, and
//! brings late-added states up to the same stage.

use log::{debug, info};
use raylib::prelude::Color;
use rustc_hash::FxHashMap;

use crate::error::{EngineError, Result};
use crate::resources::content::ContentLoader;
use crate::resources::framecontext::FrameContext;
use crate::states::GameState;
use crate::systems::render::DrawSink;

pub struct StateManager {
    states: Vec<Box<dyn GameState>>,
    names: FxHashMap<String, usize>,
    initialized: bool,
    content_loaded: bool,
    /// Background color the host clears to before drawing.
    pub clear_color: Color,
}

impl Default for StateManager {
    fn default() -> Self {
        Self {
            states: Vec::new(),
            names: FxHashMap::default(),
            initialized: false,
            content_loaded: false,
            clear_color: Color::BLACK,
        }
    }
}

impl std::fmt::Debug for StateManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateManager")
            .field("states", &self.states.iter().map(|s| s.name()).collect::<Vec<_>>())
            .field("initialized", &self.initialized)
            .field("content_loaded", &self.content_loaded)
            .finish()
    }
}

impl StateManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Initialize every state once.
    pub fn initialize(&mut self) {
        if self.initialized {
            return;
        }
        for state in self.states.iter_mut() {
            state.initialize();
        }
        self.initialized = true;
    }

    /// Load the content of every state once.
    pub fn load_content(&mut self, content: &mut dyn ContentLoader) -> Result<()> {
        if self.content_loaded {
            return Ok(());
        }
        for state in self.states.iter_mut() {
            state.load_content(content)?;
        }
        self.content_loaded = true;
        Ok(())
    }

    pub fn unload_content(&mut self, content: &mut dyn ContentLoader) {
        if !self.content_loaded {
            return;
        }
        for state in self.states.iter_mut() {
            state.unload_content(content);
        }
        self.content_loaded = false;
    }

    /// Append a state. Fails when the name is already taken.
    pub fn add(&mut self, mut state: Box<dyn GameState>, content: &mut dyn ContentLoader) -> Result<()> {
        let name = state.name().to_string();
        if self.names.contains_key(&name) {
            return Err(EngineError::DuplicateName(name));
        }
        self.bring_up(&mut *state, content)?;
        debug!("State '{}' added at {}", name, self.states.len());
        self.names.insert(name, self.states.len());
        self.states.push(state);
        Ok(())
    }

    /// Append a state, forcing it active or inactive first.
    pub fn add_with_activity(
        &mut self,
        mut state: Box<dyn GameState>,
        active: bool,
        content: &mut dyn ContentLoader,
    ) -> Result<()> {
        state.lifecycle_mut().set_active(active);
        self.add(state, content)
    }

    /// Remove the state called `name` and hand it back.
    pub fn remove(&mut self, name: &str) -> Option<Box<dyn GameState>> {
        let index = self.names.get(name).copied()?;
        let state = self.states.remove(index);
        self.reindex();
        debug!("State '{}' removed", name);
        Some(state)
    }

    /// Put `state` in the slot of `old_name`.
    ///
    /// Returns `Ok(false)` when no state is called `old_name`. Fails when
    /// the newcomer's name collides with another state.
    pub fn replace(
        &mut self,
        old_name: &str,
        mut state: Box<dyn GameState>,
        content: &mut dyn ContentLoader,
    ) -> Result<bool> {
        let Some(index) = self.names.get(old_name).copied() else {
            return Ok(false);
        };
        let new_name = state.name().to_string();
        if new_name != old_name && self.names.contains_key(&new_name) {
            return Err(EngineError::DuplicateName(new_name));
        }
        self.bring_up(&mut *state, content)?;
        self.states[index] = state;
        self.reindex();
        info!("State '{}' replaced by '{}'", old_name, new_name);
        Ok(true)
    }

    /// Deactivate and drop every state.
    pub fn clear(&mut self) {
        for state in self.states.iter_mut().rev() {
            state.lifecycle_mut().set_active(false);
        }
        self.states.clear();
        self.names.clear();
    }

    /// Deactivate every state.
    pub fn pause(&mut self) {
        for state in self.states.iter_mut() {
            state.lifecycle_mut().set_active(false);
        }
    }

    /// Activate the state at `index`, optionally deactivating the others.
    pub fn set_active(&mut self, index: usize, deactivate_others: bool) -> Result<()> {
        let len = self.states.len();
        if index >= len {
            return Err(EngineError::IndexOutOfRange { index, len });
        }
        for (i, state) in self.states.iter_mut().enumerate() {
            if i == index {
                state.lifecycle_mut().set_active(true);
            } else if deactivate_others {
                state.lifecycle_mut().set_active(false);
            }
        }
        info!("State '{}' active", self.states[index].name());
        Ok(())
    }

    /// Activate the state called `name`, optionally deactivating the others.
    pub fn set_active_by_name(&mut self, name: &str, deactivate_others: bool) -> Result<()> {
        let index = self
            .index_of(name)
            .ok_or_else(|| EngineError::UnknownState(name.to_string()))?;
        self.set_active(index, deactivate_others)
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.names.get(name).copied()
    }

    pub fn get(&self, name: &str) -> Option<&dyn GameState> {
        let index = self.index_of(name)?;
        self.state(index)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut (dyn GameState + 'static)> {
        let index = self.index_of(name)?;
        self.states.get_mut(index).map(|s| &mut **s)
    }

    /// State at `index`, if any.
    pub fn state(&self, index: usize) -> Option<&dyn GameState> {
        self.states.get(index).map(|s| &**s)
    }

    /// Named state downcast to its concrete type.
    pub fn get_as_mut<T: GameState>(&mut self, name: &str) -> Option<&mut T> {
        self.get_mut(name)?.as_any_mut().downcast_mut::<T>()
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn GameState> {
        self.states.iter().map(|s| &**s)
    }

    /// Update every enabled state in order.
    pub fn update(&mut self, ctx: &FrameContext<'_>) {
        for state in self.states.iter_mut() {
            if state.lifecycle().enabled() {
                state.update(ctx);
            }
        }
    }

    /// Draw every visible state in order.
    pub fn draw(&mut self, ctx: &FrameContext<'_>, sink: &mut dyn DrawSink) {
        for state in self.states.iter_mut() {
            if state.lifecycle().visible() {
                state.draw(ctx, sink);
            }
        }
    }

    fn bring_up(&self, state: &mut dyn GameState, content: &mut dyn ContentLoader) -> Result<()> {
        if self.initialized && !state.lifecycle().initialized() {
            state.initialize();
        }
        if self.content_loaded && !state.lifecycle().content_loaded() {
            state.load_content(content)?;
        }
        Ok(())
    }

    fn reindex(&mut self) {
        self.names = self
            .states
            .iter()
            .enumerate()
            .map(|(i, s)| (s.name().to_string(), i))
            .collect();
    }
}
