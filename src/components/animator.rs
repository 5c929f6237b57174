//! Spritesheet animation component.
//!
//! [`SpriteAnimator`] cuts the sprite's texture into a regular grid of cells
//! (see [`SpriteAnimator::configure`]) and keeps a table of named
//! [`SpriteAnimation`]s, each an ordered list of source rectangles with a
//! frame rate. The playing animation advances by frame time during `update`
//! and writes the current cell into the sprite's `source_rectangle`.
//!
//! When the sprite did not move during a frame, `post_update` snaps the
//! source rectangle back to the first frame of the playing animation (rest
//! pose).
//!
//! Animation tables can also be described in JSON and applied with
//! [`SpriteAnimator::apply_set`]:
//!
//! ```json
//! {
//!   "frame_width": 32,
//!   "frame_height": 32,
//!   "animations": [
//!     { "name": "walk", "start": 0, "end": 3, "fps": 8 },
//!     { "name": "blink", "frames": [4, 6, 4], "fps": 4, "reversed": true }
//!   ]
//! }
//! ```

use std::path::Path;

use log::{debug, warn};
use raylib::prelude::Rectangle;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::components::SpriteComponent;
use crate::entity::sprite::SpriteState;
use crate::error::{EngineError, Result};
use crate::resources::framecontext::FrameContext;

/// Ordered frames plus playback state.
///
/// The frame list never changes after creation; only the index and the
/// clock move.
#[derive(Debug, Clone)]
pub struct SpriteAnimation {
    frames: Vec<Rectangle>,
    /// Frames per second.
    pub frame_rate: f32,
    /// Play the frames back to front.
    pub reversed: bool,
    index: usize,
    elapsed: f32,
}

impl SpriteAnimation {
    pub fn new(frames: Vec<Rectangle>, frame_rate: f32, reversed: bool) -> Self {
        Self {
            frames,
            frame_rate,
            reversed,
            index: 0,
            elapsed: 0.0,
        }
    }

    pub fn frames(&self) -> &[Rectangle] {
        &self.frames
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Index of the frame currently shown.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current_frame(&self) -> Option<Rectangle> {
        self.frames.get(self.index).copied()
    }

    pub fn first_frame(&self) -> Option<Rectangle> {
        self.frames.first().copied()
    }

    /// Seconds each frame stays on screen.
    pub fn frame_duration(&self) -> f32 {
        if self.frame_rate > 0.0 {
            1.0 / self.frame_rate
        } else {
            f32::INFINITY
        }
    }

    /// Back to the first frame with a fresh clock.
    pub fn rewind(&mut self) {
        self.index = 0;
        self.elapsed = 0.0;
    }

    /// Advance the clock by `dt`. Returns `true` when the frame changed.
    pub fn advance(&mut self, dt: f32) -> bool {
        if self.frames.len() < 2 {
            return false;
        }
        self.elapsed += dt;
        let duration = self.frame_duration();
        if self.elapsed < duration {
            return false;
        }
        self.elapsed -= duration;
        let len = self.frames.len();
        self.index = if self.reversed {
            (self.index + len - 1) % len
        } else {
            (self.index + 1) % len
        };
        true
    }
}

/// Frame selection of one [`AnimationDef`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FrameSpan {
    /// Contiguous run of grid cells, both ends inclusive.
    Range { start: usize, end: usize },
    /// Arbitrary list of grid cells.
    List { frames: Vec<usize> },
}

/// One entry of an [`AnimationSet`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimationDef {
    pub name: String,
    #[serde(flatten)]
    pub span: FrameSpan,
    pub fps: f32,
    #[serde(default)]
    pub reversed: bool,
}

/// Serializable description of a spritesheet grid and its animations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimationSet {
    pub frame_width: i32,
    pub frame_height: i32,
    pub animations: Vec<AnimationDef>,
}

impl AnimationSet {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| EngineError::ContentLoad {
            asset: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_json(&json)
    }
}

/// Named animation table for one sprite.
#[derive(Debug)]
pub struct SpriteAnimator {
    enabled: bool,
    animations: FxHashMap<String, SpriteAnimation>,
    frame_width: i32,
    frame_height: i32,
    columns: i32,
    rows: i32,
    current: Option<String>,
    /// Mirror the sprite horizontally while a reversed animation plays.
    pub flip_reversed: bool,
}

impl Default for SpriteAnimator {
    fn default() -> Self {
        Self {
            enabled: true,
            animations: FxHashMap::default(),
            frame_width: 0,
            frame_height: 0,
            columns: 0,
            rows: 0,
            current: None,
            flip_reversed: false,
        }
    }
}

impl SpriteAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cut the sprite's texture into `frame_width` x `frame_height` cells.
    ///
    /// Clears every registered animation and resizes the sprite to one cell.
    /// Fails when the sprite has no texture yet; call it after loading.
    pub fn configure(&mut self, sprite: &mut SpriteState, frame_width: i32, frame_height: i32) -> Result<()> {
        if frame_width <= 0 || frame_height <= 0 {
            return Err(EngineError::InvalidFrameSize {
                width: frame_width,
                height: frame_height,
            });
        }
        let Some(texture) = sprite.texture() else {
            warn!("Animator on '{}' configured before its texture was loaded", sprite.name());
            return Err(EngineError::TextureNotLoaded(sprite.name().to_string()));
        };
        let columns = texture.width / frame_width;
        let rows = texture.height / frame_height;
        if columns == 0 || rows == 0 {
            return Err(EngineError::InvalidFrameSize {
                width: frame_width,
                height: frame_height,
            });
        }

        self.animations.clear();
        self.current = None;
        self.frame_width = frame_width;
        self.frame_height = frame_height;
        self.columns = columns;
        self.rows = rows;

        sprite.width = frame_width as f32;
        sprite.height = frame_height as f32;
        debug!(
            "Animator on '{}' configured as {}x{} cells of {}x{}",
            sprite.name(),
            columns,
            rows,
            frame_width,
            frame_height
        );
        Ok(())
    }

    pub fn is_configured(&self) -> bool {
        self.columns > 0 && self.rows > 0
    }

    pub fn columns(&self) -> i32 {
        self.columns
    }

    pub fn rows(&self) -> i32 {
        self.rows
    }

    /// Source rectangle of grid cell `index`, row-major.
    pub fn cell(&self, index: usize) -> Option<Rectangle> {
        if !self.is_configured() {
            return None;
        }
        let columns = self.columns as usize;
        let (x, y) = (index % columns, index / columns);
        Some(Rectangle {
            x: (x as i32 * self.frame_width) as f32,
            y: (y as i32 * self.frame_height) as f32,
            width: self.frame_width as f32,
            height: self.frame_height as f32,
        })
    }

    /// Register cells `start..=end` (in either order) as animation `name`.
    pub fn add_animation(
        &mut self,
        sprite: &mut SpriteState,
        name: &str,
        start: usize,
        end: usize,
        frame_rate: f32,
        reversed: bool,
    ) -> Result<()> {
        let indices: Vec<usize> = (start.min(end)..=start.max(end)).collect();
        self.add_animation_frames(sprite, name, &indices, frame_rate, reversed)
    }

    /// Register an arbitrary list of grid cells as animation `name`.
    pub fn add_animation_frames(
        &mut self,
        sprite: &mut SpriteState,
        name: &str,
        indices: &[usize],
        frame_rate: f32,
        reversed: bool,
    ) -> Result<()> {
        if !self.is_configured() {
            return Err(EngineError::AnimatorNotConfigured);
        }
        let frames = indices.iter().filter_map(|&i| self.cell(i)).collect();
        self.register(sprite, name, SpriteAnimation::new(frames, frame_rate, reversed))
    }

    /// Register raw source rectangles as animation `name`. Needs no grid.
    pub fn add_animation_rects(
        &mut self,
        sprite: &mut SpriteState,
        name: &str,
        frames: Vec<Rectangle>,
        frame_rate: f32,
        reversed: bool,
    ) -> Result<()> {
        self.register(sprite, name, SpriteAnimation::new(frames, frame_rate, reversed))
    }

    /// Configure the grid and register every animation of `set`.
    pub fn apply_set(&mut self, sprite: &mut SpriteState, set: &AnimationSet) -> Result<()> {
        self.configure(sprite, set.frame_width, set.frame_height)?;
        for def in &set.animations {
            match &def.span {
                FrameSpan::Range { start, end } => {
                    self.add_animation(sprite, &def.name, *start, *end, def.fps, def.reversed)?
                }
                FrameSpan::List { frames } => {
                    self.add_animation_frames(sprite, &def.name, frames, def.fps, def.reversed)?
                }
            }
        }
        Ok(())
    }

    /// Make `name` the playing animation and show its current frame.
    ///
    /// Playing the animation that is already playing keeps its frame;
    /// switching restarts the new one at its first frame.
    pub fn play(&mut self, sprite: &mut SpriteState, name: &str) -> Result<()> {
        let switching = self.current.as_deref() != Some(name);
        let animation = self
            .animations
            .get_mut(name)
            .ok_or_else(|| EngineError::UnknownAnimation(name.to_string()))?;
        if switching {
            animation.rewind();
        }
        sprite.source_rectangle = animation.current_frame();
        if self.flip_reversed {
            sprite.flip_h = animation.reversed;
        }
        if switching {
            debug!("Sprite '{}' plays '{}'", sprite.name(), name);
            self.current = Some(name.to_string());
        }
        Ok(())
    }

    /// Stop playback. The sprite keeps its last frame.
    pub fn stop(&mut self) {
        self.current = None;
    }

    pub fn current_animation_name(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn animation(&self, name: &str) -> Option<&SpriteAnimation> {
        self.animations.get(name)
    }

    pub fn animation_len(&self, name: &str) -> Option<usize> {
        self.animations.get(name).map(SpriteAnimation::len)
    }

    pub fn current_index(&self, name: &str) -> Option<usize> {
        self.animations.get(name).map(SpriteAnimation::index)
    }

    pub fn len(&self) -> usize {
        self.animations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.animations.is_empty()
    }

    /// An animation with no frames would draw the whole texture; reject it.
    fn register(&mut self, sprite: &mut SpriteState, name: &str, animation: SpriteAnimation) -> Result<()> {
        if animation.is_empty() {
            return Err(EngineError::EmptyAnimation(name.to_string()));
        }
        if self.animations.contains_key(name) {
            return Err(EngineError::DuplicateAnimation(name.to_string()));
        }
        if let Some(first) = animation.first_frame() {
            sprite.source_rectangle = Some(first);
        }
        self.animations.insert(name.to_string(), animation);
        Ok(())
    }

    fn playing_mut(&mut self) -> Option<&mut SpriteAnimation> {
        let name = self.current.as_deref()?;
        self.animations.get_mut(name)
    }
}

impl SpriteComponent for SpriteAnimator {
    fn enabled(&self) -> bool {
        self.enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn update(&mut self, sprite: &mut SpriteState, ctx: &FrameContext<'_>) {
        if let Some(animation) = self.playing_mut() {
            if animation.advance(ctx.delta()) {
                sprite.source_rectangle = animation.current_frame();
            }
        }
    }

    fn post_update(&mut self, sprite: &mut SpriteState, _ctx: &FrameContext<'_>) {
        let distance = sprite.distance();
        if distance.x != 0.0 || distance.y != 0.0 {
            return;
        }
        if let Some(first) = self.playing_mut().and_then(|a| a.first_frame()) {
            sprite.source_rectangle = Some(first);
        }
    }
}
