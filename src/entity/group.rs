//! Composite entity.
//!
//! A [`SpriteGroup`] owns an ordered list of [`SceneNode`] children and
//! exposes the same transform surface as a sprite. Changing the group's
//! position, rotation, scale or origin applies the *delta* to every child,
//! so children keep their offsets relative to each other. This is a flat
//! broadcast, not a hierarchical transform.
//!
//! The group's width and height are the largest child width and the largest
//! child height, not the union of the children's rectangles.
//!
//! Child order is update and draw order. Named children are indexed for
//! lookup; names must be unique within a group.

use std::ops::Index;

use log::debug;
use raylib::prelude::{Color, Vector2};
use rustc_hash::FxHashMap;

use crate::entity::{Lifecycle, SceneNode};
use crate::error::{EngineError, Result};
use crate::resources::content::ContentLoader;
use crate::resources::framecontext::FrameContext;
use crate::systems::render::DrawSink;

pub struct SpriteGroup {
    lifecycle: Lifecycle,
    position: Vector2,
    rotation: f32,
    scale: Vector2,
    origin: Vector2,
    color: Color,
    width: f32,
    height: f32,
    screen_position: Vector2,
    has_parent: bool,
    children: Vec<Box<dyn SceneNode>>,
    names: FxHashMap<String, usize>,
}

impl std::fmt::Debug for SpriteGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpriteGroup")
            .field("name", &self.lifecycle.name())
            .field("position", &self.position)
            .field("children", &self.children.len())
            .finish()
    }
}

impl SpriteGroup {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            lifecycle: Lifecycle::new(name),
            position: Vector2::zero(),
            rotation: 0.0,
            scale: Vector2 { x: 1.0, y: 1.0 },
            origin: Vector2::zero(),
            color: Color::WHITE,
            width: 0.0,
            height: 0.0,
            screen_position: Vector2::zero(),
            has_parent: false,
            children: Vec::new(),
            names: FxHashMap::default(),
        }
    }

    /// Append a child.
    ///
    /// The child is marked as parented, then initialized and loaded if the
    /// group already went through those stages. Fails when another child
    /// already uses the same non-empty name.
    pub fn add(&mut self, mut child: Box<dyn SceneNode>, content: &mut dyn ContentLoader) -> Result<()> {
        let name = child.name().to_string();
        if !name.is_empty() && self.names.contains_key(&name) {
            return Err(EngineError::DuplicateName(name));
        }

        child.set_has_parent(true);
        if self.lifecycle.initialized() {
            child.initialize();
        }
        if self.lifecycle.content_loaded() {
            child.load_content(content)?;
        }

        debug!("Group '{}' adds '{}'", self.lifecycle.name(), name);
        if !name.is_empty() {
            self.names.insert(name, self.children.len());
        }
        self.children.push(child);
        self.refresh_size();
        Ok(())
    }

    /// Remove the child called `name` and hand it back.
    pub fn remove(&mut self, name: &str) -> Option<Box<dyn SceneNode>> {
        let index = self.names.get(name).copied()?;
        let mut child = self.children.remove(index);
        child.set_has_parent(false);
        self.reindex();
        self.refresh_size();
        Some(child)
    }

    /// Drop every child.
    pub fn clear(&mut self) {
        self.children.clear();
        self.names.clear();
        self.refresh_size();
    }

    /// Drop children marked dirty. Returns how many were removed.
    ///
    /// Swept children are not unloaded here. Textures are shared by key in
    /// the loader, so disposing them is left to whoever owns the content.
    pub fn remove_dirty(&mut self) -> usize {
        let before = self.children.len();
        self.children.retain(|c| !c.lifecycle().dirty());
        let removed = before - self.children.len();
        if removed > 0 {
            debug!("Group '{}' swept {} dirty children", self.lifecycle.name(), removed);
            self.reindex();
            self.refresh_size();
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&dyn SceneNode> {
        self.children.get(index).map(|c| &**c)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut (dyn SceneNode + 'static)> {
        self.children.get_mut(index).map(|c| &mut **c)
    }

    /// Positional access reporting out-of-range indices as errors.
    pub fn child_at(&self, index: usize) -> Result<&dyn SceneNode> {
        self.get(index).ok_or(EngineError::IndexOutOfRange {
            index,
            len: self.children.len(),
        })
    }

    pub fn child_by_name(&self, name: &str) -> Option<&dyn SceneNode> {
        let index = *self.names.get(name)?;
        self.get(index)
    }

    pub fn child_by_name_mut(&mut self, name: &str) -> Option<&mut (dyn SceneNode + 'static)> {
        let index = *self.names.get(name)?;
        self.get_mut(index)
    }

    /// Named child downcast to its concrete type.
    pub fn child_as<T: SceneNode>(&self, name: &str) -> Option<&T> {
        self.child_by_name(name)?.as_any().downcast_ref::<T>()
    }

    pub fn child_as_mut<T: SceneNode>(&mut self, name: &str) -> Option<&mut T> {
        self.child_by_name_mut(name)?.as_any_mut().downcast_mut::<T>()
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn SceneNode> {
        self.children.iter().map(|c| &**c)
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Box<dyn SceneNode>> {
        self.children.iter_mut()
    }

    fn reindex(&mut self) {
        self.names = self
            .children
            .iter()
            .enumerate()
            .filter(|(_, c)| !c.name().is_empty())
            .map(|(i, c)| (c.name().to_string(), i))
            .collect();
    }

    fn refresh_size(&mut self) {
        self.width = self.children.iter().map(|c| c.width()).fold(0.0, f32::max);
        self.height = self.children.iter().map(|c| c.height()).fold(0.0, f32::max);
    }
}

impl Index<usize> for SpriteGroup {
    type Output = dyn SceneNode;

    fn index(&self, index: usize) -> &Self::Output {
        &*self.children[index]
    }
}

impl SceneNode for SpriteGroup {
    fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    fn lifecycle_mut(&mut self) -> &mut Lifecycle {
        &mut self.lifecycle
    }

    fn initialize(&mut self) {
        if !self.lifecycle.mark_initialized() {
            return;
        }
        for child in self.children.iter_mut() {
            child.initialize();
        }
    }

    fn load_content(&mut self, content: &mut dyn ContentLoader) -> Result<()> {
        if self.lifecycle.content_loaded() {
            return Ok(());
        }
        for child in self.children.iter_mut() {
            child.load_content(content)?;
        }
        self.lifecycle.set_content_loaded(true);
        self.refresh_size();
        Ok(())
    }

    fn unload_content(&mut self, content: &mut dyn ContentLoader) {
        for child in self.children.iter_mut() {
            child.unload_content(content);
        }
        if self.lifecycle.dirty() {
            self.lifecycle.set_content_loaded(false);
        }
    }

    fn update(&mut self, ctx: &FrameContext<'_>, parent_screen: Option<Vector2>) {
        self.screen_position = match parent_screen {
            Some(parent) => self.position + parent,
            None => self.position,
        };
        if !self.lifecycle.enabled() {
            return;
        }
        let screen = self.screen_position;
        for child in self.children.iter_mut() {
            child.update(ctx, Some(screen));
        }
    }

    fn post_update(&mut self, ctx: &FrameContext<'_>) {
        for child in self.children.iter_mut() {
            if child.lifecycle().enabled() {
                child.post_update(ctx);
            }
        }
    }

    fn draw(&mut self, ctx: &FrameContext<'_>, sink: &mut dyn DrawSink) {
        if !self.lifecycle.visible() {
            return;
        }
        for child in self.children.iter_mut() {
            child.draw(ctx, sink);
        }
    }

    fn position(&self) -> Vector2 {
        self.position
    }

    fn set_position(&mut self, position: Vector2) {
        let (dx, dy) = (position.x - self.position.x, position.y - self.position.y);
        for child in self.children.iter_mut() {
            child.translate(dx, dy);
        }
        self.position = position;
    }

    fn translate(&mut self, dx: f32, dy: f32) {
        self.set_position(Vector2 {
            x: self.position.x + dx,
            y: self.position.y + dy,
        });
    }

    fn screen_position(&self) -> Vector2 {
        self.screen_position
    }

    fn rotation(&self) -> f32 {
        self.rotation
    }

    fn set_rotation(&mut self, rotation: f32) {
        let delta = rotation - self.rotation;
        for child in self.children.iter_mut() {
            let r = child.rotation();
            child.set_rotation(r + delta);
        }
        self.rotation = rotation;
    }

    fn scale(&self) -> Vector2 {
        self.scale
    }

    fn set_scale(&mut self, scale: Vector2) {
        let (dx, dy) = (scale.x - self.scale.x, scale.y - self.scale.y);
        for child in self.children.iter_mut() {
            let s = child.scale();
            child.set_scale(Vector2 {
                x: s.x + dx,
                y: s.y + dy,
            });
        }
        self.scale = scale;
    }

    fn origin(&self) -> Vector2 {
        self.origin
    }

    fn set_origin(&mut self, origin: Vector2) {
        let (dx, dy) = (origin.x - self.origin.x, origin.y - self.origin.y);
        for child in self.children.iter_mut() {
            let o = child.origin();
            child.set_origin(Vector2 {
                x: o.x + dx,
                y: o.y + dy,
            });
        }
        self.origin = origin;
    }

    fn color(&self) -> Color {
        self.color
    }

    fn set_color(&mut self, color: Color) {
        for child in self.children.iter_mut() {
            child.set_color(color);
        }
        self.color = color;
    }

    fn width(&self) -> f32 {
        self.width
    }

    fn height(&self) -> f32 {
        self.height
    }

    fn has_parent(&self) -> bool {
        self.has_parent
    }

    fn set_has_parent(&mut self, has_parent: bool) {
        self.has_parent = has_parent;
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}
