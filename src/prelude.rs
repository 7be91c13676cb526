//! # Playground Prelude
//!
//! Commonly used types for writing sketches.
//!
//! ```no_run
//! use canvas_playground::prelude::*;
//!
//! struct Spin;
//!
//! impl Sketch for Spin {
//!     fn setup(&mut self, setup: &mut SetupContext<'_>) -> anyhow::Result<()> {
//!         setup.shapes.add(Mesh::cube(setup.ctx, Vector3::zero(), 1.0, None)?);
//!         Ok(())
//!     }
//!
//!     fn draw(&mut self, frame: &mut Frame<'_>) -> anyhow::Result<()> {
//!         frame.scene.rotate_y(frame.ctx, 0.01);
//!         Ok(())
//!     }
//! }
//!
//! fn main() -> anyhow::Result<()> {
//!     canvas_playground::init_logging();
//!     PlaygroundApp::new(PlaygroundConfig::default(), Spin).run()?;
//!     Ok(())
//! }
//! ```

pub use crate::app::{Frame, PlaygroundApp, Pointer, SetupContext, Sketch, StopHandle, SurfaceInfo};
pub use crate::config::{PlaygroundConfig, SceneConfig, ShaderSources, WindowConfig};
pub use crate::debug::Inspector;
pub use crate::error::{PlaygroundError, Result};

pub use crate::gfx::context::{GraphicsContext, RecordingContext};
pub use crate::gfx::geometry::{CircleDescriptor, Normals};
pub use crate::gfx::resources::{LightingMode, TextureBuffer, TextureLoader};
pub use crate::gfx::scene::{Canvas, Mesh, MeshDescriptor, Scene, ShapeBuffer};

pub use crate::math::random::{random_color, random_range};
pub use crate::math::{map_range, Vector2, Vector3, HALF_PI, PI, TWO_PI};
