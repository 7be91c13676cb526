// src/gfx/camera/scene_camera.rs
//! Perspective camera looking at the origin.
//!
//! Rotations accumulate on the view matrix. Translations move the eye and
//! rebuild the view from scratch, which drops any rotation applied so far.

use cgmath::{perspective, Deg, InnerSpace, Matrix, Matrix4, Point3, Rad, SquareMatrix, Vector3};

use super::camera_utils::flatten_matrix4;
use crate::config::SceneConfig;

#[derive(Debug, Clone)]
pub struct SceneCamera {
    pub projection: Matrix4<f32>,
    pub view: Matrix4<f32>,
    pub position: [f32; 3],
    pub fov_degrees: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl SceneCamera {
    pub fn new(config: &SceneConfig, aspect: f32) -> Self {
        let mut camera = Self {
            projection: Matrix4::identity(),
            view: Matrix4::identity(),
            position: config.camera_position,
            fov_degrees: config.fov_degrees,
            aspect,
            near: config.near,
            far: config.far,
        };
        camera.update_projection();
        camera.look_at_origin();
        camera
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
        self.update_projection();
    }

    pub fn rotate_x(&mut self, rad: f32) {
        self.view = self.view * Matrix4::from_angle_x(Rad(rad));
    }

    pub fn rotate_y(&mut self, rad: f32) {
        self.view = self.view * Matrix4::from_angle_y(Rad(rad));
    }

    pub fn rotate_z(&mut self, rad: f32) {
        self.view = self.view * Matrix4::from_angle_z(Rad(rad));
    }

    pub fn translate_x(&mut self, x: f32) {
        self.position[0] = x;
        self.look_at_origin();
    }

    pub fn translate_y(&mut self, y: f32) {
        self.position[1] = y;
        self.look_at_origin();
    }

    pub fn translate_z(&mut self, z: f32) {
        self.position[2] = z;
        self.look_at_origin();
    }

    pub fn translate_to_origin(&mut self) {
        self.position = [0.0; 3];
        self.look_at_origin();
    }

    pub fn reset_rotation(&mut self) {
        self.look_at_origin();
    }

    /// Inverse-transpose of the view, or identity if the view is singular.
    pub fn normal_matrix(&self) -> Matrix4<f32> {
        self.view
            .invert()
            .map(|inverse| inverse.transpose())
            .unwrap_or_else(Matrix4::identity)
    }

    pub fn projection_array(&self) -> [f32; 16] {
        flatten_matrix4(self.projection)
    }

    pub fn view_array(&self) -> [f32; 16] {
        flatten_matrix4(self.view)
    }

    pub fn normal_matrix_array(&self) -> [f32; 16] {
        flatten_matrix4(self.normal_matrix())
    }

    fn update_projection(&mut self) {
        self.projection = perspective(Deg(self.fov_degrees), self.aspect, self.near, self.far);
    }

    fn look_at_origin(&mut self) {
        self.view = look_at(self.position, [0.0; 3]);
    }
}

/// Right-handed look-at with +Y up. Coincident eye and target give identity.
pub fn look_at(eye: [f32; 3], target: [f32; 3]) -> Matrix4<f32> {
    let eye = Point3::from(eye);
    let target = Point3::from(target);
    if (target - eye).magnitude2() <= f32::EPSILON {
        return Matrix4::identity();
    }
    Matrix4::look_at_rh(eye, target, Vector3::unit_y())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::Vector4;

    fn assert_close(a: Matrix4<f32>, b: Matrix4<f32>) {
        let (a, b) = (flatten_matrix4(a), flatten_matrix4(b));
        for (x, y) in a.iter().zip(b.iter()) {
            assert!((x - y).abs() < 1e-5, "{a:?} != {b:?}");
        }
    }

    fn camera() -> SceneCamera {
        SceneCamera::new(&SceneConfig::default(), 4.0 / 3.0)
    }

    #[test]
    fn test_default_view_looks_at_origin() {
        let camera = camera();
        assert_eq!(camera.position, [0.0, 0.0, -10.0]);

        // the origin sits ten units in front of the eye
        let origin = camera.view * Vector4::new(0.0, 0.0, 0.0, 1.0);
        assert!((origin.z + 10.0).abs() < 1e-5);
        assert!(origin.x.abs() < 1e-5);
    }

    #[test]
    fn test_projection_uses_config() {
        let camera = camera();
        let expected = perspective(Deg(45.0), 4.0 / 3.0, 0.1, 100.0);
        assert_eq!(camera.projection, expected);
    }

    #[test]
    fn test_rotations_accumulate() {
        let mut camera = camera();
        let base = camera.view;
        camera.rotate_z(0.5);
        camera.rotate_z(0.25);
        assert_close(camera.view, base * Matrix4::from_angle_z(Rad(0.75)));
    }

    #[test]
    fn test_translate_discards_rotation() {
        let mut camera = camera();
        camera.rotate_x(1.0);
        camera.translate_y(2.0);

        assert_eq!(camera.position, [0.0, 2.0, -10.0]);
        assert_eq!(camera.view, look_at([0.0, 2.0, -10.0], [0.0; 3]));
    }

    #[test]
    fn test_translate_to_origin_is_identity() {
        let mut camera = camera();
        camera.translate_to_origin();
        assert_eq!(camera.view, Matrix4::identity());
        assert_eq!(camera.normal_matrix(), Matrix4::identity());
    }

    #[test]
    fn test_reset_rotation_keeps_position() {
        let mut camera = camera();
        camera.translate_x(3.0);
        let expected = camera.view;
        camera.rotate_y(0.3);
        camera.reset_rotation();
        assert_eq!(camera.view, expected);
    }

    #[test]
    fn test_normal_matrix() {
        let camera = camera();
        let expected = camera.view.invert().unwrap().transpose();
        assert_close(camera.normal_matrix(), expected);
    }

    #[test]
    fn test_set_aspect() {
        let mut camera = camera();
        camera.set_aspect(2.0);
        assert_eq!(camera.projection, perspective(Deg(45.0), 2.0, 0.1, 100.0));
    }
}
