// src/gfx/rendering/mod.rs
//! Per-mesh GPU buffers, their attribute layouts, and the pipeline cache
//! used by the windowed backend.

pub mod gpu_buffers;
pub mod pipeline_manager;
pub mod render_settings;

pub use gpu_buffers::{fallback_normals, GpuBuffers};
pub use pipeline_manager::{PipelineKey, PipelineManager, VertexSlot};
pub use render_settings::{AttributeSettings, RenderSettings};
