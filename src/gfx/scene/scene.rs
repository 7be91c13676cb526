// src/gfx/scene/scene.rs
//! Camera, lighting and per-frame draw of a [`ShapeBuffer`].

use super::ShapeBuffer;
use crate::config::SceneConfig;
use crate::error::{PlaygroundError, Result};
use crate::gfx::camera::SceneCamera;
use crate::gfx::context::{BufferTarget, ClearState, DataType, DrawMode, GraphicsContext};
use crate::gfx::rendering::{GpuBuffers, RenderSettings};
use crate::gfx::resources::lighting::{Lighting, LightingMode};
use crate::gfx::resources::program::ProgramInfo;

/// Counters for one [`Scene::render`] pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub draw_calls: u32,
    pub indexed_draws: u32,
    pub vertices: u32,
}

pub struct Scene {
    camera: SceneCamera,
    program: Option<ProgramInfo>,
    lighting: Option<Lighting>,
    draw_background: bool,
    background: [f32; 4],
}

impl Scene {
    pub fn new(
        ctx: &dyn GraphicsContext,
        config: &SceneConfig,
        aspect: f32,
        program: Option<ProgramInfo>,
    ) -> Self {
        Self {
            camera: SceneCamera::new(config, aspect),
            lighting: program.map(|info| Lighting::new(ctx, info.program)),
            program,
            draw_background: config.draw_background,
            background: config.background,
        }
    }

    pub fn camera(&self) -> &SceneCamera {
        &self.camera
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        self.camera.set_aspect(aspect);
    }

    pub fn program_info(&self) -> Option<&ProgramInfo> {
        self.program.as_ref()
    }

    /// Replaces the program and rebuilds the lighting flags for it.
    pub fn set_program_info(&mut self, ctx: &dyn GraphicsContext, program: ProgramInfo) {
        self.lighting = Some(Lighting::new(ctx, program.program));
        self.program = Some(program);
    }

    pub fn lighting_mode(&self) -> Option<LightingMode> {
        self.lighting.as_ref().map(Lighting::mode)
    }

    pub fn set_lighting_type(&mut self, ctx: &mut dyn GraphicsContext, mode: LightingMode) {
        match self.lighting.as_mut() {
            Some(lighting) => lighting.set_type(ctx, mode),
            None => log::warn!("Lighting {mode:?} ignored: no program bound to the scene"),
        }
    }

    pub fn enable_default_background(&mut self) {
        self.draw_background = true;
    }

    pub fn disable_default_background(&mut self) {
        self.draw_background = false;
    }

    pub fn set_background(&mut self, color: [f32; 4]) {
        self.background = color;
    }

    pub fn draws_background(&self) -> bool {
        self.draw_background
    }

    pub fn rotate_x(&mut self, ctx: &mut dyn GraphicsContext, rad: f32) {
        self.camera.rotate_x(rad);
        self.update_camera_buffer(ctx);
    }

    pub fn rotate_y(&mut self, ctx: &mut dyn GraphicsContext, rad: f32) {
        self.camera.rotate_y(rad);
        self.update_camera_buffer(ctx);
    }

    pub fn rotate_z(&mut self, ctx: &mut dyn GraphicsContext, rad: f32) {
        self.camera.rotate_z(rad);
        self.update_camera_buffer(ctx);
    }

    pub fn translate_x(&mut self, x: f32) {
        self.camera.translate_x(x);
    }

    pub fn translate_y(&mut self, y: f32) {
        self.camera.translate_y(y);
    }

    pub fn translate_z(&mut self, z: f32) {
        self.camera.translate_z(z);
    }

    pub fn translate_to_origin(&mut self) {
        self.camera.translate_to_origin();
    }

    pub fn reset_rotation(&mut self) {
        self.camera.reset_rotation();
    }

    /// Selects the program and binds the buffers of every shape in order.
    ///
    /// A given `program` replaces the scene's current one. Attribute state is
    /// sticky, so the last shape stays bound afterwards.
    pub fn bind_buffers(
        &mut self,
        ctx: &mut dyn GraphicsContext,
        shapes: &ShapeBuffer,
        program: Option<ProgramInfo>,
    ) -> Result<()> {
        if let Some(program) = program {
            self.set_program_info(ctx, program);
        }
        let info = self.require_program()?;
        ctx.use_program(info.program);

        for (index, buffers) in shapes.buffers().iter().enumerate() {
            let settings = shapes.render_settings(index).copied().unwrap_or_default();
            self.bind_shape(ctx, &info, buffers, &settings);
        }
        Ok(())
    }

    /// Clears the background if enabled, then binds and draws each shape.
    pub fn render(&self, ctx: &mut dyn GraphicsContext, shapes: &ShapeBuffer) -> Result<FrameStats> {
        let info = self.require_program()?;
        ctx.use_program(info.program);

        if self.draw_background {
            ctx.clear(ClearState::with_color(self.background));
        }
        Ok(self.draw_shapes(ctx, &info, shapes))
    }

    /// Draws each shape over what the frame already holds, without clearing.
    pub fn render_overlay(&self, ctx: &mut dyn GraphicsContext, shapes: &ShapeBuffer) -> Result<FrameStats> {
        let info = self.require_program()?;
        ctx.use_program(info.program);
        Ok(self.draw_shapes(ctx, &info, shapes))
    }

    fn draw_shapes(&self, ctx: &mut dyn GraphicsContext, info: &ProgramInfo, shapes: &ShapeBuffer) -> FrameStats {
        let mut stats = FrameStats::default();
        for (index, buffers) in shapes.buffers().iter().enumerate() {
            let settings = shapes.render_settings(index).copied().unwrap_or_default();
            self.bind_shape(ctx, info, buffers, &settings);

            if buffers.is_indexed() {
                ctx.draw_elements(DrawMode::Triangles, buffers.vertex_count, DataType::UnsignedShort, 0);
                stats.indexed_draws += 1;
            } else {
                ctx.draw_arrays(DrawMode::TriangleStrip, 0, buffers.vertex_count);
            }
            stats.draw_calls += 1;
            stats.vertices += buffers.vertex_count;
        }
        stats
    }

    /// One frame: resync dirty meshes, draw, then clear their update flags.
    pub fn draw_frame(&self, ctx: &mut dyn GraphicsContext, shapes: &mut ShapeBuffer) -> Result<FrameStats> {
        shapes.update_buffers();
        let stats = self.render(ctx, shapes)?;
        shapes.reset_update_states();
        log::trace!("{stats:?}");
        Ok(stats)
    }

    fn require_program(&self) -> Result<ProgramInfo> {
        self.program.ok_or_else(|| {
            let err = PlaygroundError::MissingProgramInfo;
            log::error!("{err}");
            err
        })
    }

    fn update_camera_buffer(&self, ctx: &mut dyn GraphicsContext) {
        let location = self
            .program
            .and_then(|info| info.uniforms.model_view_matrix);
        if let Some(location) = location {
            ctx.uniform_matrix4(location, &self.camera.view_array());
        }
    }

    fn bind_shape(
        &self,
        ctx: &mut dyn GraphicsContext,
        info: &ProgramInfo,
        buffers: &GpuBuffers,
        settings: &RenderSettings,
    ) {
        let attributes = &info.attributes;
        let uniforms = &info.uniforms;

        if let Some(location) = attributes.vertex_position {
            ctx.bind_buffer(BufferTarget::Array, Some(buffers.position));
            ctx.vertex_attrib_pointer(location, settings.position_layout());
            ctx.enable_vertex_attrib_array(location);
        }

        if let Some(location) = uniforms.is_color {
            ctx.uniform1i(location, 0);
        }
        if let (Some(location), Some(coords)) = (attributes.texture_coord, buffers.texture_coord) {
            ctx.bind_buffer(BufferTarget::Array, Some(coords));
            ctx.vertex_attrib_pointer(location, settings.texture_layout());
            ctx.enable_vertex_attrib_array(location);
        }
        ctx.bind_texture(0, buffers.texture);
        if let Some(location) = uniforms.sampler {
            ctx.uniform1i(location, 0);
        }

        if let (Some(location), Some(normal)) = (attributes.vertex_normal, buffers.normal) {
            ctx.bind_buffer(BufferTarget::Array, Some(normal));
            ctx.vertex_attrib_pointer(location, settings.normal_layout());
            ctx.enable_vertex_attrib_array(location);
            if let Some(location) = uniforms.normal_matrix {
                ctx.uniform_matrix4(location, &self.camera.normal_matrix_array());
            }
        }

        if let Some(indices) = buffers.indices {
            ctx.bind_buffer(BufferTarget::ElementArray, Some(indices));
        }
        if let Some(location) = uniforms.projection_matrix {
            ctx.uniform_matrix4(location, &self.camera.projection_array());
        }
        if let Some(location) = uniforms.model_view_matrix {
            ctx.uniform_matrix4(location, &self.camera.view_array());
        }
    }
}
