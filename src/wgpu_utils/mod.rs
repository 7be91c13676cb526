// src/wgpu_utils/mod.rs
//! Small wgpu helpers shared by the windowed backend.

pub mod binding_types;
pub mod uniform_buffer;

pub use binding_types::*;
pub use uniform_buffer::UniformBuffer;
