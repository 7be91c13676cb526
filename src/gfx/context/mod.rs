// src/gfx/context/mod.rs
//! # GPU Context
//!
//! [`GraphicsContext`] is the seam between the shape pipeline and a GPU
//! backend. Its calls follow the small subset of the WebGL API that meshes,
//! textures and the scene renderer need: create buffers, point attributes at
//! them, set uniforms and issue draws.
//!
//! Two backends ship with the crate:
//!
//! - [`RecordingContext`]: headless, records every call. Used by the tests and
//!   for inspecting what a frame would submit.
//! - [`WgpuContext`]: renders into a winit window through wgpu.
//!
//! Handles are small `Copy` ids. They stay valid until explicitly deleted.

pub mod recording;
pub mod wgpu_context;

pub use recording::{GlCall, ProgramFailure, RecordedData, RecordingContext, UniformValue};
pub use wgpu_context::WgpuContext;

use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BufferId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProgramId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UniformLocation(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BufferTarget {
    /// Vertex attribute data.
    Array,
    /// Index data.
    ElementArray,
}

/// Typed view over data handed to [`GraphicsContext::create_buffer`].
#[derive(Debug, Clone, Copy)]
pub enum BufferData<'a> {
    F32(&'a [f32]),
    U16(&'a [u16]),
}

impl<'a> BufferData<'a> {
    pub fn as_bytes(&self) -> &'a [u8] {
        match self {
            BufferData::F32(data) => bytemuck::cast_slice(data),
            BufferData::U16(data) => bytemuck::cast_slice(data),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            BufferData::F32(data) => data.len(),
            BufferData::U16(data) => data.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    Byte,
    UnsignedByte,
    Short,
    UnsignedShort,
    Float,
}

impl DataType {
    pub const fn size_in_bytes(&self) -> i32 {
        match self {
            DataType::Byte | DataType::UnsignedByte => 1,
            DataType::Short | DataType::UnsignedShort => 2,
            DataType::Float => 4,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrawMode {
    Points,
    Lines,
    LineStrip,
    Triangles,
    TriangleStrip,
    TriangleFan,
}

/// How one vertex attribute is read out of its buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AttributeLayout {
    pub components: i32,
    pub data_type: DataType,
    pub normalized: bool,
    /// Bytes between consecutive vertices.
    pub stride: i32,
    /// Byte offset of the first component.
    pub offset: i32,
}

impl AttributeLayout {
    /// Layout with no padding between vertices.
    pub const fn tightly_packed(components: i32, data_type: DataType) -> Self {
        Self {
            components,
            data_type,
            normalized: false,
            stride: components * data_type.size_in_bytes(),
            offset: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DepthFunc {
    Less,
    LessEqual,
    Always,
}

/// Color and depth clear issued at the start of a frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClearState {
    pub color: [f32; 4],
    pub depth: f32,
    pub depth_func: DepthFunc,
}

impl ClearState {
    pub fn with_color(color: [f32; 4]) -> Self {
        Self {
            color,
            depth: 1.0,
            depth_func: DepthFunc::LessEqual,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureWrap {
    Repeat,
    ClampToEdge,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureFilter {
    Nearest,
    Linear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureSampling {
    pub wrap: TextureWrap,
    pub filter: TextureFilter,
}

impl Default for TextureSampling {
    fn default() -> Self {
        Self {
            wrap: TextureWrap::ClampToEdge,
            filter: TextureFilter::Linear,
        }
    }
}

/// RGBA8 pixels ready for upload.
#[derive(Debug, Clone, PartialEq)]
pub struct TextureImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl TextureImage {
    pub fn solid(rgba: [u8; 4]) -> Self {
        Self {
            width: 1,
            height: 1,
            pixels: rgba.to_vec(),
        }
    }

    /// Power-of-two images repeat, everything else clamps.
    pub fn default_sampling(&self) -> TextureSampling {
        let power_of_two = crate::math::is_power_of_two(self.width)
            && crate::math::is_power_of_two(self.height);
        TextureSampling {
            wrap: if power_of_two {
                TextureWrap::Repeat
            } else {
                TextureWrap::ClampToEdge
            },
            filter: TextureFilter::Linear,
        }
    }
}

/// WebGL-shaped GPU access used by meshes, textures and the scene renderer.
///
/// Attribute pointers, bound buffers and uniforms are sticky state, exactly as
/// in WebGL: a draw call uses whatever was last bound.
pub trait GraphicsContext {
    fn create_buffer(&mut self, target: BufferTarget, data: BufferData<'_>) -> BufferId;
    fn delete_buffer(&mut self, buffer: BufferId);
    fn bind_buffer(&mut self, target: BufferTarget, buffer: Option<BufferId>);

    fn create_texture(&mut self, image: &TextureImage, sampling: TextureSampling) -> TextureId;
    fn update_texture(&mut self, texture: TextureId, image: &TextureImage, sampling: TextureSampling);
    fn delete_texture(&mut self, texture: TextureId);
    fn bind_texture(&mut self, unit: u32, texture: Option<TextureId>);

    /// Compiles and links a program. On failure the partial program is
    /// destroyed and the compiler log is returned in the error.
    fn create_program(&mut self, vertex_source: &str, fragment_source: &str) -> Result<ProgramId>;
    fn attrib_location(&self, program: ProgramId, name: &str) -> Option<u32>;
    fn uniform_location(&self, program: ProgramId, name: &str) -> Option<UniformLocation>;
    fn active_attributes(&self, program: ProgramId) -> Vec<(String, u32)>;
    fn use_program(&mut self, program: ProgramId);

    fn vertex_attrib_pointer(&mut self, location: u32, layout: AttributeLayout);
    fn enable_vertex_attrib_array(&mut self, location: u32);

    fn uniform_matrix4(&mut self, location: UniformLocation, matrix: &[f32; 16]);
    fn uniform1i(&mut self, location: UniformLocation, value: i32);
    fn uniform1f(&mut self, location: UniformLocation, value: f32);

    fn clear(&mut self, state: ClearState);
    fn draw_elements(&mut self, mode: DrawMode, count: u32, index_type: DataType, offset: u32);
    fn draw_arrays(&mut self, mode: DrawMode, first: u32, count: u32);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tightly_packed_stride() {
        let layout = AttributeLayout::tightly_packed(3, DataType::Float);
        assert_eq!(layout.stride, 12);
        assert_eq!(AttributeLayout::tightly_packed(4, DataType::UnsignedByte).stride, 4);
    }

    #[test]
    fn test_stride_follows_type_size() {
        const SHORTS: AttributeLayout = AttributeLayout::tightly_packed(2, DataType::Short);
        assert_eq!(SHORTS.stride, 4);

        for data_type in [
            DataType::Byte,
            DataType::UnsignedByte,
            DataType::Short,
            DataType::UnsignedShort,
            DataType::Float,
        ] {
            let layout = AttributeLayout::tightly_packed(3, data_type);
            assert_eq!(layout.stride, 3 * data_type.size_in_bytes());
        }
    }

    #[test]
    fn test_texture_sampling_by_size() {
        let square = TextureImage {
            width: 64,
            height: 64,
            pixels: vec![0; 64 * 64 * 4],
        };
        assert_eq!(square.default_sampling().wrap, TextureWrap::Repeat);

        let odd = TextureImage {
            width: 30,
            height: 64,
            pixels: vec![0; 30 * 64 * 4],
        };
        assert_eq!(odd.default_sampling().wrap, TextureWrap::ClampToEdge);
    }
}
