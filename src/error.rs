// src/error.rs
//! Error types shared across the playground.
//!
//! Every fallible library operation returns [`Result`]. Usage errors (bad
//! parameters, out of range indices) and resource errors (shader compilation,
//! texture decoding) are both reported through [`PlaygroundError`]; none of
//! them are fatal to the process.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlaygroundError {
    // Geometry
    #[error("Face {face} has {len} values, expected a multiple of 3")]
    InvalidFace { face: usize, len: usize },

    #[error("Circle quality must lie in (0, 0.7], got {0}")]
    InvalidQuality(f32),

    #[error("Radius must be positive and finite, got {0}")]
    InvalidRadius(f32),

    #[error("Cannot link rings of {first} and {second} values")]
    RingLengthMismatch { first: usize, second: usize },

    #[error("Index {index} is out of range for {vertex_count} vertices")]
    IndexOutOfRange { index: u32, vertex_count: usize },

    #[error("Index {0} does not fit in a 16-bit index buffer")]
    IndexOverflow(u32),

    // Shape buffer
    #[error("Invalid index {index}, valid values are 0 through {len}")]
    InvalidIndex { index: usize, len: usize },

    // Scene
    #[error("No program information defined")]
    MissingProgramInfo,

    // GPU resources
    #[error("{stage} shader failed to compile: {log}")]
    ShaderCompile { stage: ShaderStage, log: String },

    #[error("Shader program failed to link: {0}")]
    ProgramLink(String),

    #[error("Failed to decode texture {path}: {source}")]
    TextureDecode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("GPU context unavailable: {0}")]
    ContextUnavailable(String),

    #[error("Surface error: {0}")]
    Surface(#[from] wgpu::SurfaceError),

    // Transport
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Frame loop
    #[error("Canvas already started")]
    AlreadyStarted,

    #[error(transparent)]
    EventLoop(#[from] winit::error::EventLoopError),
}

/// Which half of a shader program an error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl std::fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShaderStage::Vertex => write!(f, "Vertex"),
            ShaderStage::Fragment => write!(f, "Fragment"),
        }
    }
}

pub type Result<T> = std::result::Result<T, PlaygroundError>;
