//! Shader program contract.
//!
//! Every program used by the scene renderer declares the same attribute and
//! uniform names. [`ProgramInfo`] resolves them once after linking.

use std::path::Path;

use crate::error::Result;
use crate::gfx::context::{GraphicsContext, ProgramId, UniformLocation};
use crate::io;

pub const VERTEX_POSITION: &str = "aVertexPosition";
pub const VERTEX_COLOR: &str = "aVertexColor";
pub const TEXTURE_COORD: &str = "aTextureCoord";
pub const VERTEX_NORMAL: &str = "aVertexNormal";

pub const PROJECTION_MATRIX: &str = "uProjectionMatrix";
pub const MODEL_VIEW_MATRIX: &str = "uModelViewMatrix";
pub const NORMAL_MATRIX: &str = "uNormalMatrix";
pub const SAMPLER: &str = "uSampler";
pub const IS_COLOR: &str = "isColor";

pub const ATTRIBUTE_NAMES: [&str; 4] = [VERTEX_POSITION, TEXTURE_COORD, VERTEX_NORMAL, VERTEX_COLOR];
pub const UNIFORM_NAMES: [&str; 5] = [
    PROJECTION_MATRIX,
    MODEL_VIEW_MATRIX,
    NORMAL_MATRIX,
    SAMPLER,
    IS_COLOR,
];

/// Built-in WGSL program; `vs_main` and `fs_main` live in the same module.
pub const DEFAULT_SHADER: &str = include_str!("../shaders/playground.wgsl");

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AttributeLocations {
    pub vertex_position: Option<u32>,
    pub vertex_color: Option<u32>,
    pub texture_coord: Option<u32>,
    pub vertex_normal: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct UniformLocations {
    pub projection_matrix: Option<UniformLocation>,
    pub model_view_matrix: Option<UniformLocation>,
    pub normal_matrix: Option<UniformLocation>,
    pub sampler: Option<UniformLocation>,
    pub is_color: Option<UniformLocation>,
}

/// A linked program plus the locations of the fixed attribute and uniform names.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgramInfo {
    pub program: ProgramId,
    pub attributes: AttributeLocations,
    pub uniforms: UniformLocations,
}

impl ProgramInfo {
    pub fn from_program(ctx: &dyn GraphicsContext, program: ProgramId) -> Self {
        let attribute = |name| ctx.attrib_location(program, name);
        let uniform = |name| ctx.uniform_location(program, name);

        Self {
            program,
            attributes: AttributeLocations {
                vertex_position: attribute(VERTEX_POSITION),
                vertex_color: attribute(VERTEX_COLOR),
                texture_coord: attribute(TEXTURE_COORD),
                vertex_normal: attribute(VERTEX_NORMAL),
            },
            uniforms: UniformLocations {
                projection_matrix: uniform(PROJECTION_MATRIX),
                model_view_matrix: uniform(MODEL_VIEW_MATRIX),
                normal_matrix: uniform(NORMAL_MATRIX),
                sampler: uniform(SAMPLER),
                is_color: uniform(IS_COLOR),
            },
        }
    }
}

/// Compiles and links a program, logging the compiler output on failure.
pub fn init_shader_program(
    ctx: &mut dyn GraphicsContext,
    vertex_source: &str,
    fragment_source: &str,
) -> Result<ProgramId> {
    ctx.create_program(vertex_source, fragment_source)
        .inspect_err(|err| log::error!("An error occurred building the shader program: {err}"))
}

/// Loads both shader sources from disk and builds a [`ProgramInfo`].
pub fn load_program(
    ctx: &mut dyn GraphicsContext,
    vertex_path: impl AsRef<Path>,
    fragment_path: impl AsRef<Path>,
) -> Result<ProgramInfo> {
    let vertex_source = io::read_text_file(vertex_path)?;
    let fragment_source = io::read_text_file(fragment_path)?;
    let program = init_shader_program(ctx, &vertex_source, &fragment_source)?;
    Ok(ProgramInfo::from_program(ctx, program))
}

/// Builds the [`ProgramInfo`] for the built-in shader.
pub fn default_program(ctx: &mut dyn GraphicsContext) -> Result<ProgramInfo> {
    let program = init_shader_program(ctx, DEFAULT_SHADER, DEFAULT_SHADER)?;
    Ok(ProgramInfo::from_program(ctx, program))
}
