//! Render pipeline cache for the windowed backend.
//!
//! WebGL-style drawing has no pipeline objects: topology and attribute
//! layouts are decided at draw time. Each distinct combination is turned into
//! a wgpu pipeline once and reused on later frames.

use std::{collections::HashMap, sync::Arc};

use wgpu::*;

use crate::gfx::context::{AttributeLayout, DataType, DrawMode, ProgramId};
use crate::gfx::resources::texture_resource::TextureResource;

/// One vertex buffer slot: a single attribute read from its own buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VertexSlot {
    pub location: u32,
    pub format: VertexFormat,
    pub stride: u64,
    pub offset: u64,
}

impl VertexSlot {
    /// Slot for an attribute with no buffer behind it. Every vertex reads
    /// the same zeroed value.
    pub fn constant(location: u32) -> Self {
        Self {
            location,
            format: VertexFormat::Float32x4,
            stride: 0,
            offset: 0,
        }
    }

    pub fn from_layout(location: u32, layout: AttributeLayout) -> Option<Self> {
        let format = vertex_format(layout)?;
        // WebGL treats a zero stride as tightly packed
        let stride = if layout.stride == 0 {
            format.size()
        } else {
            u64::try_from(layout.stride).ok()?
        };
        Some(Self {
            location,
            format,
            stride,
            offset: u64::try_from(layout.offset).ok()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PipelineKey {
    pub program: ProgramId,
    pub topology: PrimitiveTopology,
    pub indexed: bool,
    pub slots: Vec<VertexSlot>,
}

/// Shader modules a pipeline is built from.
pub struct PipelineShaders<'a> {
    pub vertex: &'a ShaderModule,
    pub fragment: &'a ShaderModule,
}

pub struct PipelineManager {
    device: Arc<Device>,
    layout: PipelineLayout,
    color_format: TextureFormat,
    pipelines: HashMap<PipelineKey, RenderPipeline>,
}

impl PipelineManager {
    pub fn new(device: Arc<Device>, bind_group_layout: &BindGroupLayout, color_format: TextureFormat) -> Self {
        let layout = device.create_pipeline_layout(&PipelineLayoutDescriptor {
            label: Some("Playground Pipeline Layout"),
            bind_group_layouts: &[bind_group_layout],
            push_constant_ranges: &[],
        });

        Self {
            device,
            layout,
            color_format,
            pipelines: HashMap::new(),
        }
    }

    /// Creates the pipeline for `key` unless it is cached already.
    pub fn prepare(&mut self, key: &PipelineKey, shaders: PipelineShaders<'_>) {
        if self.pipelines.contains_key(key) {
            return;
        }
        let pipeline = self.create_pipeline(key, shaders);
        log::info!(
            "Created pipeline for program {:?} ({:?}, {} slots)",
            key.program,
            key.topology,
            key.slots.len()
        );
        self.pipelines.insert(key.clone(), pipeline);
    }

    pub fn get(&self, key: &PipelineKey) -> Option<&RenderPipeline> {
        self.pipelines.get(key)
    }

    pub fn len(&self) -> usize {
        self.pipelines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pipelines.is_empty()
    }

    fn create_pipeline(&self, key: &PipelineKey, shaders: PipelineShaders<'_>) -> RenderPipeline {
        let attributes: Vec<[VertexAttribute; 1]> = key
            .slots
            .iter()
            .map(|slot| {
                [VertexAttribute {
                    format: slot.format,
                    offset: slot.offset,
                    shader_location: slot.location,
                }]
            })
            .collect();

        let buffers: Vec<VertexBufferLayout> = key
            .slots
            .iter()
            .zip(attributes.iter())
            .map(|(slot, attributes)| VertexBufferLayout {
                array_stride: slot.stride,
                step_mode: VertexStepMode::Vertex,
                attributes,
            })
            .collect();

        let strip = matches!(
            key.topology,
            PrimitiveTopology::TriangleStrip | PrimitiveTopology::LineStrip
        );

        self.device.create_render_pipeline(&RenderPipelineDescriptor {
            label: Some("Playground Pipeline"),
            layout: Some(&self.layout),
            vertex: VertexState {
                module: shaders.vertex,
                entry_point: Some("vs_main"),
                buffers: &buffers,
                compilation_options: PipelineCompilationOptions::default(),
            },
            fragment: Some(FragmentState {
                module: shaders.fragment,
                entry_point: Some("fs_main"),
                targets: &[Some(ColorTargetState {
                    format: self.color_format,
                    blend: Some(BlendState::ALPHA_BLENDING),
                    write_mask: ColorWrites::ALL,
                })],
                compilation_options: PipelineCompilationOptions::default(),
            }),
            primitive: PrimitiveState {
                topology: key.topology,
                strip_index_format: (strip && key.indexed).then_some(IndexFormat::Uint16),
                front_face: FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: Some(DepthStencilState {
                format: TextureResource::DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: CompareFunction::LessEqual,
                stencil: StencilState::default(),
                bias: DepthBiasState::default(),
            }),
            multisample: MultisampleState::default(),
            multiview: None,
            cache: None,
        })
    }
}

/// wgpu has no triangle fans.
pub fn topology(mode: DrawMode) -> Option<PrimitiveTopology> {
    match mode {
        DrawMode::Points => Some(PrimitiveTopology::PointList),
        DrawMode::Lines => Some(PrimitiveTopology::LineList),
        DrawMode::LineStrip => Some(PrimitiveTopology::LineStrip),
        DrawMode::Triangles => Some(PrimitiveTopology::TriangleList),
        DrawMode::TriangleStrip => Some(PrimitiveTopology::TriangleStrip),
        DrawMode::TriangleFan => None,
    }
}

/// Float attribute format for `layout`. Integer data must be normalized,
/// since the shader inputs are all floating point.
pub fn vertex_format(layout: AttributeLayout) -> Option<VertexFormat> {
    use VertexFormat::*;

    let format = match (layout.data_type, layout.normalized, layout.components) {
        (DataType::Float, _, 1) => Float32,
        (DataType::Float, _, 2) => Float32x2,
        (DataType::Float, _, 3) => Float32x3,
        (DataType::Float, _, 4) => Float32x4,
        (DataType::UnsignedByte, true, 2) => Unorm8x2,
        (DataType::UnsignedByte, true, 4) => Unorm8x4,
        (DataType::Byte, true, 2) => Snorm8x2,
        (DataType::Byte, true, 4) => Snorm8x4,
        (DataType::UnsignedShort, true, 2) => Unorm16x2,
        (DataType::UnsignedShort, true, 4) => Unorm16x4,
        (DataType::Short, true, 2) => Snorm16x2,
        (DataType::Short, true, 4) => Snorm16x4,
        _ => return None,
    };
    Some(format)
}
