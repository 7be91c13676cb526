//! # Graphics Module
//!
//! Geometry generation, GPU resources and scene rendering.
//!
//! - **Context** ([`context`]) - the WebGL-style [`context::GraphicsContext`]
//!   seam, with a wgpu backend and a recording backend for tests
//! - **Geometry** ([`geometry`]) - primitive faces, fan indices and rings
//! - **Camera** ([`camera`]) - projection and model-view matrices
//! - **Resources** ([`resources`]) - shader programs, lighting and textures
//! - **Rendering** ([`rendering`]) - per-mesh GPU buffers and attribute layouts
//! - **Scene** ([`scene`]) - meshes, the shape buffer and the frame renderer

pub mod camera;
pub mod context;
pub mod geometry;
pub mod rendering;
pub mod resources;
pub mod scene;
