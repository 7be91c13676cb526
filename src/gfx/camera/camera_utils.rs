use cgmath::Matrix4;

/// Maps OpenGL clip space depth (-1..1) onto wgpu's 0..1.
#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

/// Column-major nested array, the layout WGSL `mat4x4<f32>` expects.
pub fn convert_matrix4_to_array(matrix4: Matrix4<f32>) -> [[f32; 4]; 4] {
    let mut result = [[0.0; 4]; 4];

    for i in 0..4 {
        for j in 0..4 {
            result[i][j] = matrix4[i][j];
        }
    }

    result
}

/// Column-major flat array, as uploaded by `uniform_matrix4`.
pub fn flatten_matrix4(matrix4: Matrix4<f32>) -> [f32; 16] {
    bytemuck::cast(convert_matrix4_to_array(matrix4))
}

pub fn matrix4_from_array(values: &[f32; 16]) -> Matrix4<f32> {
    let columns: [[f32; 4]; 4] = bytemuck::cast(*values);
    Matrix4::from(columns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{SquareMatrix, Vector4};

    #[test]
    fn test_flatten_is_column_major() {
        let m = Matrix4::from_translation(cgmath::Vector3::new(1.0, 2.0, 3.0));
        let flat = flatten_matrix4(m);
        assert_eq!(&flat[12..15], &[1.0, 2.0, 3.0]);
        assert_eq!(matrix4_from_array(&flat), m);
    }

    #[test]
    fn test_depth_remap() {
        let near = OPENGL_TO_WGPU_MATRIX * Vector4::new(0.0, 0.0, -1.0, 1.0);
        let far = OPENGL_TO_WGPU_MATRIX * Vector4::new(0.0, 0.0, 1.0, 1.0);
        assert_eq!(near.z, 0.0);
        assert_eq!(far.z, 1.0);
        assert_eq!(OPENGL_TO_WGPU_MATRIX * Matrix4::identity(), OPENGL_TO_WGPU_MATRIX);
    }
}
