// src/gfx/scene/canvas.rs
//! Immediate-mode 2D drawing on the `z = 0` plane.
//!
//! A [`Canvas`] keeps a fill colour, a stroke colour and a stroke weight, and
//! turns `circle` and `line` calls into flat meshes. The app clears the canvas
//! before each sketch draw and renders it over the scene afterwards, so
//! shapes last one frame. Coordinates and weights are world units seen
//! through the scene camera.

use std::collections::HashMap;

use super::{FrameStats, Mesh, MeshDescriptor, Scene, ShapeBuffer};
use crate::error::{PlaygroundError, Result};
use crate::gfx::context::GraphicsContext;
use crate::gfx::geometry::circle::sample_ring;
use crate::gfx::geometry::{link_rings, DEFAULT_CIRCLE_QUALITY};
use crate::gfx::resources::texture::{create_solid_texture, TextureBuffer};

pub const DEFAULT_STROKE_WEIGHT: f32 = 0.02;

const BLACK: [u8; 4] = [0, 0, 0, 255];

/// Colours are opaque RGBA. `None` disables that part of a shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawStyle {
    pub fill: Option<[u8; 4]>,
    pub stroke: Option<[u8; 4]>,
    pub stroke_weight: f32,
}

impl Default for DrawStyle {
    fn default() -> Self {
        Self {
            fill: Some(BLACK),
            stroke: Some(BLACK),
            stroke_weight: DEFAULT_STROKE_WEIGHT,
        }
    }
}

#[derive(Debug, Default)]
pub struct Canvas {
    style: DrawStyle,
    shapes: ShapeBuffer,
    colors: HashMap<[u8; 4], TextureBuffer>,
}

impl Canvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn style(&self) -> DrawStyle {
        self.style
    }

    pub fn fill(&mut self, rgb: [u8; 3]) {
        self.style.fill = Some(opaque(rgb));
    }

    pub fn no_fill(&mut self) {
        self.style.fill = None;
    }

    pub fn stroke(&mut self, rgb: [u8; 3]) {
        self.style.stroke = Some(opaque(rgb));
    }

    pub fn no_stroke(&mut self) {
        self.style.stroke = None;
    }

    /// Sets the line width. Non-positive or non-finite weights are ignored.
    pub fn stroke_weight(&mut self, weight: f32) {
        if weight > 0.0 && weight.is_finite() {
            self.style.stroke_weight = weight;
        } else {
            log::warn!("Stroke weight must be positive, ignoring {weight}");
        }
    }

    /// Sets the scene's clear colour and turns background clearing on.
    pub fn background(&self, scene: &mut Scene, rgb: [u8; 3]) {
        let [r, g, b] = rgb.map(|c| c as f32 / 255.0);
        scene.set_background([r, g, b, 1.0]);
        scene.enable_default_background();
    }

    /// Circle centred on `(x, y)`, filled and outlined with the current style.
    pub fn circle(&mut self, ctx: &mut dyn GraphicsContext, x: f32, y: f32, radius: f32) -> Result<()> {
        if !(radius > 0.0 && radius.is_finite()) {
            let err = PlaygroundError::InvalidRadius(radius);
            log::error!("{err}");
            return Err(err);
        }
        let center = [x, y, 0.0];

        if let Some(fill) = self.style.fill {
            let disc = vec![sample_ring(DEFAULT_CIRCLE_QUALITY, radius, 0.0)];
            self.push(ctx, disc, center, fill)?;
        }

        if let Some(stroke) = self.style.stroke {
            let half = self.style.stroke_weight / 2.0;
            let outer = sample_ring(DEFAULT_CIRCLE_QUALITY, radius + half, 0.0);
            let inner = sample_ring(DEFAULT_CIRCLE_QUALITY, (radius - half).max(0.0), 0.0);
            let band = link_rings(&outer, &inner)?;
            self.push(ctx, band, center, stroke)?;
        }
        Ok(())
    }

    /// Line from `(x1, y1)` to `(x2, y2)` as a quad of the stroke weight.
    ///
    /// Nothing is drawn without a stroke colour or for a zero-length line.
    pub fn line(&mut self, ctx: &mut dyn GraphicsContext, x1: f32, y1: f32, x2: f32, y2: f32) -> Result<()> {
        let Some(stroke) = self.style.stroke else {
            return Ok(());
        };

        let (dx, dy) = (x2 - x1, y2 - y1);
        let length = (dx * dx + dy * dy).sqrt();
        if !(length > 0.0 && length.is_finite()) {
            log::debug!("Skipping line of length {length}");
            return Ok(());
        }

        let half = self.style.stroke_weight / 2.0;
        let (nx, ny) = (-dy / length * half, dx / length * half);
        let quad = vec![vec![
            x1 - nx, y1 - ny, 0.0,
            x2 - nx, y2 - ny, 0.0,
            x2 + nx, y2 + ny, 0.0,
            x1 + nx, y1 + ny, 0.0,
        ]];
        self.push(ctx, quad, [0.0; 3], stroke)
    }

    /// Drops everything drawn so far and frees its buffers.
    pub fn clear_canvas(&mut self, ctx: &mut dyn GraphicsContext) {
        self.shapes.clear(ctx);
    }

    pub fn shapes(&self) -> &ShapeBuffer {
        &self.shapes
    }

    /// Draws the canvas shapes over the current frame.
    pub fn render(&self, ctx: &mut dyn GraphicsContext, scene: &Scene) -> Result<FrameStats> {
        if self.shapes.is_empty() {
            return Ok(FrameStats::default());
        }
        scene.render_overlay(ctx, &self.shapes)
    }

    /// Frees the shapes and every cached colour texture.
    pub fn release(mut self, ctx: &mut dyn GraphicsContext) {
        self.shapes.clear(ctx);
        for (_, texture) in self.colors.drain() {
            ctx.delete_texture(texture.texture);
        }
    }

    fn push(
        &mut self,
        ctx: &mut dyn GraphicsContext,
        faces: Vec<Vec<f32>>,
        position: [f32; 3],
        rgba: [u8; 4],
    ) -> Result<()> {
        let texture = self
            .colors
            .entry(rgba)
            .or_insert_with(|| create_solid_texture(ctx, rgba))
            .clone();
        let descriptor = MeshDescriptor::default()
            .with_position(position)
            .with_texture(Some(texture));
        self.shapes.add(Mesh::new(ctx, faces, descriptor)?);
        Ok(())
    }
}

fn opaque([r, g, b]: [u8; 3]) -> [u8; 4] {
    [r, g, b, 255]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SceneConfig;
    use crate::gfx::context::{GlCall, RecordingContext};
    use crate::gfx::resources::program::default_program;

    fn scene(ctx: &mut RecordingContext) -> Scene {
        let info = default_program(ctx).unwrap();
        Scene::new(ctx, &SceneConfig::default(), 1.0, Some(info))
    }

    fn texture_pixels(ctx: &RecordingContext, canvas: &Canvas, index: usize) -> Vec<u8> {
        let texture = canvas.shapes().texture(index).unwrap();
        ctx.texture_image(texture).unwrap().pixels.clone()
    }

    #[test]
    fn test_style_state() {
        let mut canvas = Canvas::new();
        assert_eq!(canvas.style(), DrawStyle::default());

        canvas.fill([10, 20, 30]);
        canvas.stroke([200, 0, 0]);
        canvas.stroke_weight(0.5);
        canvas.stroke_weight(f32::NAN);
        canvas.stroke_weight(-1.0);

        let style = canvas.style();
        assert_eq!(style.fill, Some([10, 20, 30, 255]));
        assert_eq!(style.stroke, Some([200, 0, 0, 255]));
        assert_eq!(style.stroke_weight, 0.5);

        canvas.no_fill();
        canvas.no_stroke();
        assert_eq!(canvas.style().fill, None);
        assert_eq!(canvas.style().stroke, None);
    }

    #[test]
    fn test_circle_fill_and_stroke() {
        let mut ctx = RecordingContext::new();
        let mut canvas = Canvas::new();
        canvas.fill([0, 255, 0]);
        canvas.stroke([255, 0, 0]);
        canvas.stroke_weight(0.2);

        canvas.circle(&mut ctx, 2.0, 1.0, 1.0).unwrap();
        assert_eq!(canvas.shapes().len(), 2);
        assert_eq!(texture_pixels(&ctx, &canvas, 0), vec![0, 255, 0, 255]);
        assert_eq!(texture_pixels(&ctx, &canvas, 1), vec![255, 0, 0, 255]);

        let disc = canvas.shapes().shape(0).unwrap();
        for p in disc.faces()[0].chunks_exact(3) {
            let distance = ((p[0] - 2.0).powi(2) + (p[1] - 1.0).powi(2)).sqrt();
            assert!((distance - 1.0).abs() < 1e-4);
            assert_eq!(p[2], 0.0);
        }

        let band = canvas.shapes().shape(1).unwrap();
        for p in band.faces().iter().flatten().collect::<Vec<_>>().chunks_exact(3) {
            let distance = ((p[0] - 2.0).powi(2) + (p[1] - 1.0).powi(2)).sqrt();
            assert!((distance - 1.1).abs() < 1e-4 || (distance - 0.9).abs() < 1e-4);
        }
    }

    #[test]
    fn test_circle_without_style_or_radius() {
        let mut ctx = RecordingContext::new();
        let mut canvas = Canvas::new();

        for radius in [0.0, -1.0, f32::NAN] {
            assert!(matches!(
                canvas.circle(&mut ctx, 0.0, 0.0, radius),
                Err(PlaygroundError::InvalidRadius(_))
            ));
        }

        canvas.no_fill();
        canvas.no_stroke();
        canvas.circle(&mut ctx, 0.0, 0.0, 1.0).unwrap();
        assert!(canvas.shapes().is_empty());
    }

    #[test]
    fn test_line_quad() {
        let mut ctx = RecordingContext::new();
        let mut canvas = Canvas::new();
        canvas.stroke_weight(0.5);

        canvas.line(&mut ctx, 0.0, 0.0, 2.0, 0.0).unwrap();
        let quad = &canvas.shapes().shape(0).unwrap().faces()[0];
        assert_eq!(
            quad,
            &vec![0.0, -0.25, 0.0, 2.0, -0.25, 0.0, 2.0, 0.25, 0.0, 0.0, 0.25, 0.0]
        );
        assert_eq!(texture_pixels(&ctx, &canvas, 0), BLACK.to_vec());

        canvas.line(&mut ctx, 1.0, 1.0, 1.0, 1.0).unwrap();
        canvas.no_stroke();
        canvas.line(&mut ctx, 0.0, 0.0, 1.0, 1.0).unwrap();
        assert_eq!(canvas.shapes().len(), 1);
    }

    #[test]
    fn test_colors_are_shared() {
        let mut ctx = RecordingContext::new();
        let mut canvas = Canvas::new();
        canvas.line(&mut ctx, 0.0, 0.0, 1.0, 0.0).unwrap();
        canvas.line(&mut ctx, 0.0, 1.0, 1.0, 1.0).unwrap();

        assert_eq!(canvas.shapes().texture(0), canvas.shapes().texture(1));
    }

    #[test]
    fn test_render_over_scene() {
        let mut ctx = RecordingContext::new();
        let scene = scene(&mut ctx);
        let mut canvas = Canvas::new();
        assert_eq!(canvas.render(&mut ctx, &scene).unwrap(), FrameStats::default());

        canvas.circle(&mut ctx, 0.0, 0.0, 1.0).unwrap();
        canvas.line(&mut ctx, -1.0, 0.0, 1.0, 0.0).unwrap();
        ctx.clear_calls();

        let stats = canvas.render(&mut ctx, &scene).unwrap();
        assert_eq!(stats.draw_calls, 3);
        assert!(!ctx.calls().iter().any(|c| matches!(c, GlCall::Clear(_))));
    }

    #[test]
    fn test_clear_and_release() {
        let mut ctx = RecordingContext::new();
        let mut canvas = Canvas::new();
        canvas.circle(&mut ctx, 0.0, 0.0, 1.0).unwrap();
        let texture = canvas.shapes().texture(0).unwrap();

        canvas.clear_canvas(&mut ctx);
        assert!(canvas.shapes().is_empty());
        assert_eq!(ctx.live_buffer_count(), 0);
        assert!(ctx.is_live_texture(texture));

        canvas.line(&mut ctx, 0.0, 0.0, 1.0, 0.0).unwrap();
        canvas.release(&mut ctx);
        assert_eq!(ctx.live_buffer_count(), 0);
        assert!(!ctx.is_live_texture(texture));
    }

    #[test]
    fn test_background() {
        let mut ctx = RecordingContext::new();
        let mut scene = scene(&mut ctx);
        scene.disable_default_background();

        Canvas::new().background(&mut scene, [255, 0, 51]);
        assert!(scene.draws_background());

        ctx.clear_calls();
        scene.render(&mut ctx, &ShapeBuffer::new()).unwrap();
        assert!(ctx
            .calls()
            .iter()
            .any(|c| matches!(c, GlCall::Clear(state) if state.color == [1.0, 0.0, 0.2, 1.0])));
    }
}
