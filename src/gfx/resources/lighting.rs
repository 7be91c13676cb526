//! Lighting mode flags pushed to the shader program.
//!
//! The shader exposes one float uniform per lighting mode. Exactly one of them
//! is `1.0` at a time, or none for [`LightingMode::Default`].

use crate::gfx::context::{GraphicsContext, ProgramId, UniformLocation};

pub const AMBIENT_UNIFORM: &str = "isAmbientLighting";
pub const DIFFUSE_UNIFORM: &str = "isDiffuseLighting";
pub const SPECULAR_UNIFORM: &str = "isSpecularLighting";
pub const PHONG_UNIFORM: &str = "isPhong";
pub const EXPERIMENTAL_UNIFORM: &str = "isExperimental";

pub const LIGHTING_UNIFORM_NAMES: [&str; 5] = [
    AMBIENT_UNIFORM,
    DIFFUSE_UNIFORM,
    SPECULAR_UNIFORM,
    PHONG_UNIFORM,
    EXPERIMENTAL_UNIFORM,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LightingMode {
    /// No lighting flag set.
    #[default]
    Default,
    Ambient,
    Diffuse,
    Specular,
    Phong,
    Experimental,
}

impl LightingMode {
    /// Position of this mode's flag in [`LIGHTING_UNIFORM_NAMES`].
    fn flag_index(self) -> Option<usize> {
        match self {
            LightingMode::Default => None,
            LightingMode::Ambient => Some(0),
            LightingMode::Diffuse => Some(1),
            LightingMode::Specular => Some(2),
            LightingMode::Phong => Some(3),
            LightingMode::Experimental => Some(4),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Lighting {
    mode: LightingMode,
    program: ProgramId,
    flags: [Option<UniformLocation>; 5],
}

impl Lighting {
    /// Looks up the lighting flag uniforms of `program`. Flags the program
    /// does not declare are skipped when pushing.
    pub fn new(ctx: &dyn GraphicsContext, program: ProgramId) -> Self {
        let flags = LIGHTING_UNIFORM_NAMES.map(|name| ctx.uniform_location(program, name));
        Self {
            mode: LightingMode::Default,
            program,
            flags,
        }
    }

    pub fn mode(&self) -> LightingMode {
        self.mode
    }

    /// Clears every flag, then raises the one for `mode`.
    pub fn set_type(&mut self, ctx: &mut dyn GraphicsContext, mode: LightingMode) {
        self.reset(ctx);
        self.mode = mode;
        self.update(ctx);
    }

    /// Pushes the current mode's flag without clearing the others.
    pub fn update(&self, ctx: &mut dyn GraphicsContext) {
        if let Some(location) = self.mode.flag_index().and_then(|i| self.flags[i]) {
            ctx.uniform1f(location, 1.0);
        }
    }

    fn reset(&self, ctx: &mut dyn GraphicsContext) {
        ctx.use_program(self.program);
        for location in self.flags.iter().flatten() {
            ctx.uniform1f(*location, 0.0);
        }
    }
}
