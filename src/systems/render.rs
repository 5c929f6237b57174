//! Draw sink seam and the raylib render pass.
//!
//! Entities describe what to draw with a [`DrawCommand`] and hand it to a
//! [`DrawSink`]. The core never rasterizes anything itself.
//!
//! [`RaylibSink`] is the host implementation: it buffers commands for one
//! frame and, on [`RaylibSink::flush`], sorts them by layer depth (stable, so
//! submission order breaks ties) and issues `draw_texture_pro` calls.

use raylib::prelude::*;

use crate::resources::content::TextureHandle;
use crate::resources::texturestore::TextureStore;

/// Everything the host needs to draw one sprite.
#[derive(Debug, Clone)]
pub struct DrawCommand {
    pub texture: TextureHandle,
    /// Pivot position in screen pixels.
    pub position: Vector2,
    /// Sub-image to draw; `None` draws the whole texture.
    pub source: Option<Rectangle>,
    /// Tint already multiplied by the entity alpha.
    pub tint: Color,
    /// Rotation in radians.
    pub rotation: f32,
    /// Pivot offset in unscaled texture pixels.
    pub origin: Vector2,
    pub scale: Vector2,
    pub flip_h: bool,
    pub flip_v: bool,
    /// Ordering hint, lower values are drawn first.
    pub layer_depth: f32,
}

/// Receiver of draw commands.
pub trait DrawSink {
    fn draw(&mut self, command: DrawCommand);
}

/// Multiply every channel of `color` by `alpha`, the way premultiplied
/// tints work.
pub fn tint_with_alpha(color: Color, alpha: f32) -> Color {
    let alpha = alpha.clamp(0.0, 1.0);
    let scale = |c: u8| (c as f32 * alpha).round() as u8;
    Color::new(scale(color.r), scale(color.g), scale(color.b), scale(color.a))
}

/// Source rectangle with negative extents for flipped axes, as raylib expects.
pub fn flipped_source(source: Rectangle, flip_h: bool, flip_v: bool) -> Rectangle {
    Rectangle {
        x: source.x,
        y: source.y,
        width: if flip_h { -source.width } else { source.width },
        height: if flip_v { -source.height } else { source.height },
    }
}

/// Buffers a frame of [`DrawCommand`]s and draws them through raylib.
pub struct RaylibSink<'a> {
    textures: &'a TextureStore,
    commands: Vec<DrawCommand>,
}

impl<'a> RaylibSink<'a> {
    pub fn new(textures: &'a TextureStore) -> Self {
        Self {
            textures,
            commands: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Draw every buffered command, lowest layer depth first.
    pub fn flush<D: RaylibDraw>(&mut self, d: &mut D) {
        self.commands
            .sort_by(|a, b| a.layer_depth.total_cmp(&b.layer_depth));

        for command in self.commands.drain(..) {
            let Some(texture) = self.textures.get(&command.texture.key) else {
                continue;
            };
            let source = command.source.unwrap_or(Rectangle {
                x: 0.0,
                y: 0.0,
                width: texture.width as f32,
                height: texture.height as f32,
            });
            let dest = Rectangle {
                x: command.position.x,
                y: command.position.y,
                width: source.width * command.scale.x,
                height: source.height * command.scale.y,
            };
            let origin = Vector2 {
                x: command.origin.x * command.scale.x,
                y: command.origin.y * command.scale.y,
            };
            d.draw_texture_pro(
                texture,
                flipped_source(source, command.flip_h, command.flip_v),
                dest,
                origin,
                command.rotation.to_degrees(),
                command.tint,
            );
        }
    }
}

impl DrawSink for RaylibSink<'_> {
    fn draw(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }
}
