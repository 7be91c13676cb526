// src/gfx/context/wgpu_context.rs
//! Windowed [`GraphicsContext`] backed by wgpu.
//!
//! Calls made during a frame only update bound state. Each draw call takes a
//! snapshot of that state (program, attribute buffers, uniforms, texture) and
//! queues it. [`WgpuContext::present`] turns the queued draws into pipelines,
//! uniform buffers and bind groups, then encodes them into a single render
//! pass targeting the window surface.
//!
//! Every program shares one bind group layout: the `SceneUniforms` block at
//! binding 0, a 2D texture at binding 1 and its sampler at binding 2.
//! Attributes live at fixed shader locations, see [`ATTRIBUTE_LOCATIONS`].

use std::collections::HashMap;
use std::sync::Arc;

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;
use winit::window::Window;

use super::{
    AttributeLayout, BufferData, BufferId, BufferTarget, ClearState, DataType, DrawMode,
    GraphicsContext, ProgramId, TextureId, TextureImage, TextureSampling, UniformLocation,
};
use crate::error::{PlaygroundError, Result, ShaderStage};
use crate::gfx::camera::camera_utils::{flatten_matrix4, matrix4_from_array, OPENGL_TO_WGPU_MATRIX};
use crate::gfx::rendering::pipeline_manager::{self, PipelineKey, PipelineManager, PipelineShaders, VertexSlot};
use crate::gfx::resources::lighting::{
    AMBIENT_UNIFORM, DIFFUSE_UNIFORM, EXPERIMENTAL_UNIFORM, PHONG_UNIFORM, SPECULAR_UNIFORM,
};
use crate::gfx::resources::program::{
    IS_COLOR, MODEL_VIEW_MATRIX, NORMAL_MATRIX, PROJECTION_MATRIX, SAMPLER, TEXTURE_COORD,
    VERTEX_COLOR, VERTEX_NORMAL, VERTEX_POSITION,
};
use crate::gfx::resources::texture_resource::TextureResource;
use crate::wgpu_utils::{binding_types, UniformBuffer};

/// Shader locations of the attributes a program may declare.
pub const ATTRIBUTE_LOCATIONS: [(&str, u32); 4] = [
    (VERTEX_POSITION, 0),
    (TEXTURE_COORD, 1),
    (VERTEX_NORMAL, 2),
    (VERTEX_COLOR, 3),
];

/// Uniform names in location order. Every program shares this table.
pub const UNIFORM_TABLE: [&str; 10] = [
    PROJECTION_MATRIX,
    MODEL_VIEW_MATRIX,
    NORMAL_MATRIX,
    SAMPLER,
    IS_COLOR,
    AMBIENT_UNIFORM,
    DIFFUSE_UNIFORM,
    SPECULAR_UNIFORM,
    PHONG_UNIFORM,
    EXPERIMENTAL_UNIFORM,
];

/// Matches the `SceneUniforms` block of the built-in shader.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct SceneUniforms {
    pub projection: [[f32; 4]; 4],
    pub model_view: [[f32; 4]; 4],
    pub normal_matrix: [[f32; 4]; 4],
    /// isColor, isAmbientLighting, isDiffuseLighting, isSpecularLighting
    pub flags: [f32; 4],
    /// isPhong, isExperimental
    pub modes: [f32; 4],
}

impl Default for SceneUniforms {
    fn default() -> Self {
        let identity = [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ];
        Self {
            projection: identity,
            model_view: identity,
            normal_matrix: identity,
            flags: [0.0; 4],
            modes: [0.0; 4],
        }
    }
}

impl SceneUniforms {
    /// Stores a matrix uniform. The projection is remapped to wgpu depth.
    pub fn set_matrix(&mut self, location: UniformLocation, matrix: &[f32; 16]) -> bool {
        let columns: [[f32; 4]; 4] = bytemuck::cast(*matrix);
        match location.0 {
            0 => {
                let remapped = OPENGL_TO_WGPU_MATRIX * matrix4_from_array(matrix);
                self.projection = bytemuck::cast(flatten_matrix4(remapped));
            }
            1 => self.model_view = columns,
            2 => self.normal_matrix = columns,
            _ => return false,
        }
        true
    }

    /// Stores a scalar uniform. `uSampler` is accepted but only unit 0 exists.
    pub fn set_scalar(&mut self, location: UniformLocation, value: f32) -> bool {
        match location.0 {
            3 => {}
            4..=7 => self.flags[location.0 as usize - 4] = value,
            8 | 9 => self.modes[location.0 as usize - 8] = value,
            _ => return false,
        }
        true
    }
}

struct GpuBuffer {
    buffer: wgpu::Buffer,
    target: BufferTarget,
}

struct ShaderProgram {
    vertex: wgpu::ShaderModule,
    fragment: wgpu::ShaderModule,
    attributes: Vec<(String, u32)>,
}

#[derive(Debug, Clone, Copy)]
struct AttributeBinding {
    buffer: Option<BufferId>,
    layout: AttributeLayout,
    enabled: bool,
}

#[derive(Debug, Clone, Copy)]
struct DrawRange {
    first: u32,
    count: u32,
}

/// Snapshot of the bound state at a draw call.
#[derive(Debug, Clone)]
struct DrawCommand {
    key: PipelineKey,
    /// Buffer per slot in `key.slots`. `None` reads the zero buffer.
    vertex_buffers: Vec<Option<BufferId>>,
    index_buffer: Option<BufferId>,
    range: DrawRange,
    uniforms: SceneUniforms,
    texture: Option<TextureId>,
}

#[derive(Default)]
struct BoundState {
    program: Option<ProgramId>,
    array_buffer: Option<BufferId>,
    element_buffer: Option<BufferId>,
    attributes: HashMap<u32, AttributeBinding>,
    texture: Option<TextureId>,
    uniforms: SceneUniforms,
}

pub struct WgpuContext {
    surface: wgpu::Surface<'static>,
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    config: wgpu::SurfaceConfiguration,
    depth_texture: TextureResource,
    bind_group_layout: wgpu::BindGroupLayout,
    pipelines: PipelineManager,
    zero_buffer: wgpu::Buffer,
    fallback_texture: TextureResource,
    uniform_pool: Vec<UniformBuffer<SceneUniforms>>,

    buffers: HashMap<BufferId, GpuBuffer>,
    textures: HashMap<TextureId, TextureResource>,
    programs: HashMap<ProgramId, ShaderProgram>,
    next_id: u32,

    state: BoundState,
    commands: Vec<DrawCommand>,
    clear: Option<ClearState>,
}

impl WgpuContext {
    /// Creates the surface, device and shared resources for `window`.
    pub async fn new(window: Arc<Window>) -> Result<Self> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance
            .create_surface(window)
            .map_err(|err| PlaygroundError::ContextUnavailable(err.to_string()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|err| PlaygroundError::ContextUnavailable(err.to_string()))?;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("Playground Device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits {
                    max_texture_dimension_2d: 4096,
                    ..wgpu::Limits::downlevel_defaults()
                },
                memory_hints: wgpu::MemoryHints::default(),
                trace: wgpu::Trace::Off,
            })
            .await
            .map_err(|err| PlaygroundError::ContextUnavailable(err.to_string()))?;

        device.on_uncaptured_error(Box::new(|error| {
            log::error!("Uncaptured wgpu error: {error}");
        }));

        let info = adapter.get_info();
        log::info!("Using {} ({:?})", info.name, info.backend);

        let surface_capabilities = surface.get_capabilities(&adapter);
        let format = surface_capabilities
            .formats
            .iter()
            .copied()
            .find(|f| !f.is_srgb())
            .or_else(|| surface_capabilities.formats.first().copied())
            .ok_or_else(|| PlaygroundError::ContextUnavailable("surface has no formats".into()))?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_capabilities
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let device = Arc::new(device);
        let queue = Arc::new(queue);

        let depth_texture = TextureResource::create_depth_texture(&device, &config, "depth_texture");

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Scene Bind Group Layout"),
            entries: &[
                binding_types::entry(0, binding_types::uniform()),
                binding_types::entry(1, binding_types::texture_2d()),
                binding_types::entry(
                    2,
                    binding_types::sampler(wgpu::SamplerBindingType::Filtering),
                ),
            ],
        });

        let pipelines = PipelineManager::new(device.clone(), &bind_group_layout, format);

        let zero_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Zero Attribute Buffer"),
            contents: &[0u8; 16],
            usage: wgpu::BufferUsages::VERTEX,
        });

        let white = TextureImage::solid([255, 255, 255, 255]);
        let fallback_texture = TextureResource::create_from_image(
            &device,
            &queue,
            &white,
            TextureSampling::default(),
            "Fallback Texture",
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            depth_texture,
            bind_group_layout,
            pipelines,
            zero_buffer,
            fallback_texture,
            uniform_pool: Vec::new(),
            buffers: HashMap::new(),
            textures: HashMap::new(),
            programs: HashMap::new(),
            next_id: 1,
            state: BoundState::default(),
            commands: Vec::new(),
            clear: None,
        })
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }

        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        self.depth_texture =
            TextureResource::create_depth_texture(&self.device, &self.config, "depth_texture");
    }

    pub fn size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    /// Draws queued since the last present.
    pub fn pending_draws(&self) -> usize {
        self.commands.len()
    }

    /// Encodes every queued draw into one render pass and presents it.
    ///
    /// A lost or outdated surface is reconfigured and the frame is dropped.
    pub fn present(&mut self) -> Result<()> {
        let commands = std::mem::take(&mut self.commands);
        let clear = self.clear.take();

        let surface_texture = match self.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("Surface lost, reconfiguring");
                self.surface.configure(&self.device, &self.config);
                return Ok(());
            }
            Err(err) => return Err(err.into()),
        };
        let surface_view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut draws = Vec::with_capacity(commands.len());
        for command in &commands {
            let Some(program) = self.programs.get(&command.key.program) else {
                log::warn!("Skipping draw: program {:?} was deleted", command.key.program);
                continue;
            };
            if let Some(missing) = self.missing_buffer(command) {
                log::warn!("Skipping draw: buffer {missing:?} was deleted");
                continue;
            }

            self.pipelines.prepare(
                &command.key,
                PipelineShaders {
                    vertex: &program.vertex,
                    fragment: &program.fragment,
                },
            );

            let slot = draws.len();
            if let Some(uniforms) = self.uniform_pool.get_mut(slot) {
                uniforms.update_content(&self.queue, command.uniforms);
            } else {
                self.uniform_pool
                    .push(UniformBuffer::new_with_data(&self.device, &command.uniforms));
            }

            let texture = command
                .texture
                .and_then(|id| self.textures.get(&id))
                .unwrap_or(&self.fallback_texture);
            let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("Scene Bind Group"),
                layout: &self.bind_group_layout,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: self.uniform_pool[slot].binding_resource(),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: wgpu::BindingResource::TextureView(&texture.view),
                    },
                    wgpu::BindGroupEntry {
                        binding: 2,
                        resource: wgpu::BindingResource::Sampler(&texture.sampler),
                    },
                ],
            });
            draws.push((command, bind_group));
        }

        let color = clear.map(|c| c.color).unwrap_or([0.0; 4]);
        let depth = clear.map(|c| c.depth).unwrap_or(1.0);

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Playground Encoder"),
            });
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Playground Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &surface_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: color[0] as f64,
                            g: color[1] as f64,
                            b: color[2] as f64,
                            a: color[3] as f64,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(depth),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            for (command, bind_group) in &draws {
                let Some(pipeline) = self.pipelines.get(&command.key) else {
                    continue;
                };
                render_pass.set_pipeline(pipeline);
                render_pass.set_bind_group(0, bind_group, &[]);

                for (slot, buffer) in command.vertex_buffers.iter().enumerate() {
                    let buffer = buffer
                        .and_then(|id| self.buffers.get(&id))
                        .map(|b| &b.buffer)
                        .unwrap_or(&self.zero_buffer);
                    render_pass.set_vertex_buffer(slot as u32, buffer.slice(..));
                }

                let DrawRange { first, count } = command.range;
                match command.index_buffer.and_then(|id| self.buffers.get(&id)) {
                    Some(indices) => {
                        render_pass.set_index_buffer(indices.buffer.slice(..), wgpu::IndexFormat::Uint16);
                        render_pass.draw_indexed(first..first + count, 0, 0..1);
                    }
                    None => render_pass.draw(first..first + count, 0..1),
                }
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        surface_texture.present();
        log::trace!(
            "Presented {} draws, {} pipelines cached",
            draws.len(),
            self.pipelines.len()
        );
        Ok(())
    }

    fn allocate_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn missing_buffer(&self, command: &DrawCommand) -> Option<BufferId> {
        command
            .vertex_buffers
            .iter()
            .flatten()
            .chain(command.index_buffer.iter())
            .find(|id| !self.buffers.contains_key(*id))
            .copied()
    }

    fn compile(&self, stage: ShaderStage, source: &str) -> Result<wgpu::ShaderModule> {
        self.device.push_error_scope(wgpu::ErrorFilter::Validation);
        let module = self.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(match stage {
                ShaderStage::Vertex => "Vertex Shader",
                ShaderStage::Fragment => "Fragment Shader",
            }),
            source: wgpu::ShaderSource::Wgsl(source.into()),
        });
        match pollster::block_on(self.device.pop_error_scope()) {
            Some(error) => Err(PlaygroundError::ShaderCompile {
                stage,
                log: error.to_string(),
            }),
            None => Ok(module),
        }
    }

    /// Snapshots the bound state for a draw, or explains why it cannot run.
    fn snapshot(&self, mode: DrawMode, indexed: bool) -> std::result::Result<DrawCommand, String> {
        let program_id = self.state.program.ok_or("no program in use")?;
        let program = self
            .programs
            .get(&program_id)
            .ok_or_else(|| format!("program {program_id:?} does not exist"))?;
        let topology = pipeline_manager::topology(mode)
            .ok_or_else(|| format!("{mode:?} is not supported by wgpu"))?;

        let mut slots = Vec::with_capacity(program.attributes.len());
        let mut vertex_buffers = Vec::with_capacity(program.attributes.len());
        for (name, location) in &program.attributes {
            match self.state.attributes.get(location) {
                Some(AttributeBinding {
                    buffer: Some(buffer),
                    layout,
                    enabled: true,
                }) => {
                    let slot = VertexSlot::from_layout(*location, *layout)
                        .ok_or_else(|| format!("unsupported layout for {name}: {layout:?}"))?;
                    slots.push(slot);
                    vertex_buffers.push(Some(*buffer));
                }
                _ => {
                    slots.push(VertexSlot::constant(*location));
                    vertex_buffers.push(None);
                }
            }
        }

        let index_buffer = if indexed {
            Some(self.state.element_buffer.ok_or("no index buffer bound")?)
        } else {
            None
        };

        Ok(DrawCommand {
            key: PipelineKey {
                program: program_id,
                topology,
                indexed,
                slots,
            },
            vertex_buffers,
            index_buffer,
            range: DrawRange { first: 0, count: 0 },
            uniforms: self.state.uniforms,
            texture: self.state.texture,
        })
    }
}

impl GraphicsContext for WgpuContext {
    fn create_buffer(&mut self, target: BufferTarget, data: BufferData<'_>) -> BufferId {
        let id = BufferId(self.allocate_id());
        let usage = match target {
            BufferTarget::Array => wgpu::BufferUsages::VERTEX,
            BufferTarget::ElementArray => wgpu::BufferUsages::INDEX,
        } | wgpu::BufferUsages::COPY_DST;

        // wgpu cannot slice empty buffers
        let contents = if data.is_empty() { &[0u8; 4][..] } else { data.as_bytes() };
        let buffer = self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(match target {
                BufferTarget::Array => "Vertex Buffer",
                BufferTarget::ElementArray => "Index Buffer",
            }),
            contents,
            usage,
        });

        self.buffers.insert(id, GpuBuffer { buffer, target });
        id
    }

    fn delete_buffer(&mut self, buffer: BufferId) {
        if let Some(deleted) = self.buffers.remove(&buffer) {
            log::trace!("Deleted {:?} buffer {buffer:?}", deleted.target);
        }
        if self.state.array_buffer == Some(buffer) {
            self.state.array_buffer = None;
        }
        if self.state.element_buffer == Some(buffer) {
            self.state.element_buffer = None;
        }
    }

    fn bind_buffer(&mut self, target: BufferTarget, buffer: Option<BufferId>) {
        match target {
            BufferTarget::Array => self.state.array_buffer = buffer,
            BufferTarget::ElementArray => self.state.element_buffer = buffer,
        }
    }

    fn create_texture(&mut self, image: &TextureImage, sampling: TextureSampling) -> TextureId {
        let id = TextureId(self.allocate_id());
        let resource = TextureResource::create_from_image(&self.device, &self.queue, image, sampling, "Texture");
        self.textures.insert(id, resource);
        id
    }

    fn update_texture(&mut self, texture: TextureId, image: &TextureImage, sampling: TextureSampling) {
        match self.textures.get_mut(&texture) {
            Some(resource) => resource.update(&self.device, &self.queue, image, sampling),
            None => log::warn!("Cannot update texture {texture:?}: it does not exist"),
        }
    }

    fn delete_texture(&mut self, texture: TextureId) {
        self.textures.remove(&texture);
        if self.state.texture == Some(texture) {
            self.state.texture = None;
        }
    }

    fn bind_texture(&mut self, unit: u32, texture: Option<TextureId>) {
        if unit != 0 {
            log::warn!("Only texture unit 0 is supported, ignoring unit {unit}");
            return;
        }
        self.state.texture = texture;
    }

    fn create_program(&mut self, vertex_source: &str, fragment_source: &str) -> Result<ProgramId> {
        if !vertex_source.contains("fn vs_main") {
            return Err(PlaygroundError::ProgramLink(
                "vertex source has no `vs_main` entry point".into(),
            ));
        }
        if !fragment_source.contains("fn fs_main") {
            return Err(PlaygroundError::ProgramLink(
                "fragment source has no `fs_main` entry point".into(),
            ));
        }

        let vertex = self.compile(ShaderStage::Vertex, vertex_source)?;
        let fragment = if fragment_source == vertex_source {
            vertex.clone()
        } else {
            self.compile(ShaderStage::Fragment, fragment_source)?
        };

        let attributes = ATTRIBUTE_LOCATIONS
            .iter()
            .filter(|(name, _)| vertex_source.contains(name))
            .map(|(name, location)| (name.to_string(), *location))
            .collect();

        let id = ProgramId(self.allocate_id());
        self.programs.insert(
            id,
            ShaderProgram {
                vertex,
                fragment,
                attributes,
            },
        );
        log::info!("Created shader program {id:?}");
        Ok(id)
    }

    fn attrib_location(&self, program: ProgramId, name: &str) -> Option<u32> {
        self.programs
            .get(&program)?
            .attributes
            .iter()
            .find(|(attribute, _)| attribute == name)
            .map(|(_, location)| *location)
    }

    fn uniform_location(&self, program: ProgramId, name: &str) -> Option<UniformLocation> {
        if !self.programs.contains_key(&program) {
            return None;
        }
        UNIFORM_TABLE
            .iter()
            .position(|uniform| *uniform == name)
            .map(|index| UniformLocation(index as u32))
    }

    fn active_attributes(&self, program: ProgramId) -> Vec<(String, u32)> {
        self.programs
            .get(&program)
            .map(|p| p.attributes.clone())
            .unwrap_or_default()
    }

    fn use_program(&mut self, program: ProgramId) {
        self.state.program = Some(program);
    }

    fn vertex_attrib_pointer(&mut self, location: u32, layout: AttributeLayout) {
        let buffer = self.state.array_buffer;
        let binding = self.state.attributes.entry(location).or_insert(AttributeBinding {
            buffer,
            layout,
            enabled: false,
        });
        binding.buffer = buffer;
        binding.layout = layout;
    }

    fn enable_vertex_attrib_array(&mut self, location: u32) {
        match self.state.attributes.get_mut(&location) {
            Some(binding) => binding.enabled = true,
            None => log::warn!("Attribute {location} enabled before a pointer was set"),
        }
    }

    fn uniform_matrix4(&mut self, location: UniformLocation, matrix: &[f32; 16]) {
        if !self.state.uniforms.set_matrix(location, matrix) {
            log::warn!("Uniform {location:?} is not a matrix");
        }
    }

    fn uniform1i(&mut self, location: UniformLocation, value: i32) {
        if !self.state.uniforms.set_scalar(location, value as f32) {
            log::warn!("Uniform {location:?} is not a scalar");
        }
    }

    fn uniform1f(&mut self, location: UniformLocation, value: f32) {
        if !self.state.uniforms.set_scalar(location, value) {
            log::warn!("Uniform {location:?} is not a scalar");
        }
    }

    fn clear(&mut self, state: ClearState) {
        // draws queued earlier in the frame are covered by the clear
        self.commands.clear();
        self.clear = Some(state);
    }

    fn draw_elements(&mut self, mode: DrawMode, count: u32, index_type: DataType, offset: u32) {
        if index_type != DataType::UnsignedShort {
            log::warn!("Skipping draw: {index_type:?} indices are not supported");
            return;
        }
        match self.snapshot(mode, true) {
            Ok(mut command) => {
                command.range = DrawRange {
                    first: offset / 2,
                    count,
                };
                self.commands.push(command);
            }
            Err(reason) => log::warn!("Skipping draw: {reason}"),
        }
    }

    fn draw_arrays(&mut self, mode: DrawMode, first: u32, count: u32) {
        match self.snapshot(mode, false) {
            Ok(mut command) => {
                command.range = DrawRange { first, count };
                self.commands.push(command);
            }
            Err(reason) => log::warn!("Skipping draw: {reason}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_layout_size() {
        assert_eq!(std::mem::size_of::<SceneUniforms>(), 224);
    }

    #[test]
    fn test_uniform_table_matches_setters() {
        let mut uniforms = SceneUniforms::default();
        for (index, name) in UNIFORM_TABLE.iter().enumerate() {
            let location = UniformLocation(index as u32);
            let stored = if index < 3 {
                uniforms.set_matrix(location, &[0.0; 16])
            } else {
                uniforms.set_scalar(location, 1.0)
            };
            assert!(stored, "{name} rejected");
        }
        assert_eq!(uniforms.flags, [1.0; 4]);
        assert_eq!(uniforms.modes, [1.0, 1.0, 0.0, 0.0]);
        assert!(!uniforms.set_scalar(UniformLocation(10), 1.0));
        assert!(!uniforms.set_matrix(UniformLocation(4), &[0.0; 16]));
    }

    #[test]
    fn test_projection_is_remapped() {
        let mut uniforms = SceneUniforms::default();
        let identity = flatten_matrix4(cgmath::SquareMatrix::identity());
        uniforms.set_matrix(UniformLocation(0), &identity);

        assert_eq!(uniforms.projection[2][2], 0.5);
        assert_eq!(uniforms.projection[3][2], 0.5);
        assert_eq!(uniforms.model_view, SceneUniforms::default().model_view);
    }
}
