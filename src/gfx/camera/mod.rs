pub mod camera_utils;
pub mod scene_camera;

pub use camera_utils::{flatten_matrix4, OPENGL_TO_WGPU_MATRIX};
pub use scene_camera::{look_at, SceneCamera};
