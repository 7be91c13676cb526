//! Canvas Playground
//!
//! A small creative-coding toolkit built on wgpu and winit: vector math,
//! primitive and cylinder meshes, a shape buffer and a WebGL-style scene
//! renderer that draws through a swappable [`gfx::context::GraphicsContext`].

pub mod app;
pub mod config;
pub mod debug;
pub mod error;
pub mod gfx;
pub mod io;
pub mod math;
pub mod prelude;
pub mod wgpu_utils;

pub use app::{PlaygroundApp, Sketch};
pub use config::PlaygroundConfig;
pub use error::{PlaygroundError, Result};

/// Installs the `env_logger` backend, defaulting to `info` when `RUST_LOG`
/// is unset. Calling it twice is harmless.
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).try_init();
}
