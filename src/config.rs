// src/config.rs
//! Playground configuration.
//!
//! All values have defaults matching the classic WebGL starter setup: a 45
//! degree perspective camera ten units back on the Z axis looking at the
//! origin, an opaque black background and the built-in shader program.

use std::path::PathBuf;

/// Top level configuration handed to [`crate::app::PlaygroundApp`].
#[derive(Debug, Clone, Default)]
pub struct PlaygroundConfig {
    pub window: WindowConfig,
    pub scene: SceneConfig,
    pub shaders: ShaderSources,
}

impl PlaygroundConfig {
    pub fn with_window(mut self, window: WindowConfig) -> Self {
        self.window = window;
        self
    }

    pub fn with_scene(mut self, scene: SceneConfig) -> Self {
        self.scene = scene;
        self
    }

    pub fn with_shaders(mut self, shaders: ShaderSources) -> Self {
        self.shaders = shaders;
        self
    }
}

#[derive(Debug, Clone)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Canvas Playground".to_string(),
            width: 800,
            height: 600,
        }
    }
}

impl WindowConfig {
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }
}

/// Camera and background settings for a [`crate::gfx::scene::Scene`].
#[derive(Debug, Clone)]
pub struct SceneConfig {
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub camera_position: [f32; 3],
    /// RGBA clear color used when the default background is enabled.
    pub background: [f32; 4],
    pub draw_background: bool,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 45.0,
            near: 0.1,
            far: 100.0,
            camera_position: [0.0, 0.0, -10.0],
            background: [0.0, 0.0, 0.0, 1.0],
            draw_background: true,
        }
    }
}

impl SceneConfig {
    pub fn with_fov(mut self, fov_degrees: f32) -> Self {
        self.fov_degrees = fov_degrees;
        self
    }

    pub fn with_depth_range(mut self, near: f32, far: f32) -> Self {
        self.near = near;
        self.far = far;
        self
    }

    pub fn with_camera_position(mut self, position: [f32; 3]) -> Self {
        self.camera_position = position;
        self
    }

    pub fn with_background(mut self, background: [f32; 4]) -> Self {
        self.background = background;
        self
    }

    pub fn with_draw_background(mut self, draw_background: bool) -> Self {
        self.draw_background = draw_background;
        self
    }
}

/// Where the vertex and fragment shader sources come from.
#[derive(Debug, Clone, Default)]
pub enum ShaderSources {
    #[default]
    BuiltIn,
    Files { vertex: PathBuf, fragment: PathBuf },
}
