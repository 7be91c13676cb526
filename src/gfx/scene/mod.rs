//! # Scene
//!
//! Meshes, the ordered [`ShapeBuffer`] that feeds the renderer, and the
//! [`Scene`] that owns the camera and lighting and draws a frame. A
//! [`Canvas`] adds per-frame 2D drawing on top.
//!
//! ```no_run
//! use canvas_playground::config::SceneConfig;
//! use canvas_playground::gfx::context::RecordingContext;
//! use canvas_playground::gfx::resources::program::default_program;
//! use canvas_playground::gfx::scene::{Mesh, Scene, ShapeBuffer};
//! use canvas_playground::math::Vector3;
//!
//! # fn main() -> canvas_playground::error::Result<()> {
//! let mut ctx = RecordingContext::new();
//! let program = default_program(&mut ctx)?;
//! let scene = Scene::new(&ctx, &SceneConfig::default(), 1.0, Some(program));
//!
//! let mut shapes = ShapeBuffer::new();
//! shapes.add(Mesh::cube(&mut ctx, Vector3::zero(), 1.0, None)?);
//! scene.draw_frame(&mut ctx, &mut shapes)?;
//! # Ok(())
//! # }
//! ```

pub mod canvas;
pub mod mesh;
pub mod scene;
pub mod shape_buffer;

pub use canvas::{Canvas, DrawStyle};
pub use mesh::{Mesh, MeshDescriptor};
pub use scene::{FrameStats, Scene};
pub use shape_buffer::ShapeBuffer;
