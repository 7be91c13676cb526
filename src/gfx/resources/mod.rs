// src/gfx/resources/mod.rs
//! Shader programs, lighting flags and textures.

pub mod lighting;
pub mod program;
pub mod texture;
pub mod texture_resource;

pub use lighting::{Lighting, LightingMode};
pub use program::{default_program, init_shader_program, load_program, ProgramInfo};
pub use texture::{create_solid_texture, TextureBuffer, TextureLoader, TextureSource};
pub use texture_resource::TextureResource;
