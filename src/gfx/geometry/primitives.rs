//! # Primitive Shape Generation
//!
//! Static vertex tables for boxes and quads. Sizes are half-extents: a cube of
//! size 1 spans -1..1 on every axis.

use super::FaceList;

/// Axis-aligned cube with half-extent `size`.
pub fn cube_vertices(size: f32) -> FaceList {
    box_vertices(size, size, size)
}

/// Axis-aligned box with independent half-extents.
///
/// Faces come out as front, back, top, bottom, right, left, four vertices
/// each. Callers supplying normals must use the same order (see
/// [`box_normals`]).
#[rustfmt::skip]
pub fn box_vertices(width: f32, height: f32, depth: f32) -> FaceList {
    let (w, h, d) = (width, height, depth);
    vec![
        // Front face
        vec![-w, -h,  d,   w, -h,  d,   w,  h,  d,  -w,  h,  d],
        // Back face
        vec![-w, -h, -d,  -w,  h, -d,   w,  h, -d,   w, -h, -d],
        // Top face
        vec![-w,  h, -d,  -w,  h,  d,   w,  h,  d,   w,  h, -d],
        // Bottom face
        vec![-w, -h, -d,   w, -h, -d,   w, -h,  d,  -w, -h,  d],
        // Right face
        vec![ w, -h, -d,   w,  h, -d,   w,  h,  d,   w, -h,  d],
        // Left face
        vec![-w, -h, -d,  -w, -h,  d,  -w,  h,  d,  -w,  h, -d],
    ]
}

/// Single flat quad on the z = 0 plane, wound around its perimeter so a fan
/// triangulation covers it exactly.
#[rustfmt::skip]
pub fn quad_vertices(size: f32) -> FaceList {
    let s = size;
    vec![vec![
        -s,  s, 0.0, // Top-left
         s,  s, 0.0, // Top-right
         s, -s, 0.0, // Bottom-right
        -s, -s, 0.0, // Bottom-left
    ]]
}

/// Outward per-vertex normals for [`box_vertices`], 72 values.
pub fn box_normals() -> Vec<f32> {
    const FACE_NORMALS: [[f32; 3]; 6] = [
        [0.0, 0.0, 1.0],  // Front
        [0.0, 0.0, -1.0], // Back
        [0.0, 1.0, 0.0],  // Top
        [0.0, -1.0, 0.0], // Bottom
        [1.0, 0.0, 0.0],  // Right
        [-1.0, 0.0, 0.0], // Left
    ];

    FACE_NORMALS
        .iter()
        .flat_map(|normal| std::iter::repeat(normal).take(4))
        .flatten()
        .copied()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cube_generation() {
        for size in [0.5_f32, 1.0, 3.25] {
            let cube = cube_vertices(size);
            assert_eq!(cube.len(), 6);
            for face in &cube {
                assert_eq!(face.len(), 12);
                assert!(face.iter().all(|c| (c.abs() - size).abs() < f32::EPSILON));
            }
        }
    }

    #[test]
    fn test_box_extents() {
        let faces = box_vertices(1.0, 2.0, 3.0);
        for face in &faces {
            for vertex in face.chunks_exact(3) {
                assert_eq!(vertex[0].abs(), 1.0);
                assert_eq!(vertex[1].abs(), 2.0);
                assert_eq!(vertex[2].abs(), 3.0);
            }
        }
        // front face sits on +depth, back on -depth
        assert!(faces[0].chunks_exact(3).all(|v| v[2] == 3.0));
        assert!(faces[1].chunks_exact(3).all(|v| v[2] == -3.0));
    }

    #[test]
    fn test_negative_size_mirrors() {
        let mirrored = cube_vertices(-1.0);
        assert_eq!(mirrored[0][2], -1.0);
    }

    #[test]
    fn test_quad_generation() {
        let quad = quad_vertices(2.0);
        assert_eq!(quad.len(), 1);
        assert_eq!(quad[0].len(), 12);
        assert!(quad[0].chunks_exact(3).all(|v| v[2] == 0.0));
    }

    #[test]
    fn test_quad_fan_triangles_share_winding() {
        let quad = &quad_vertices(1.0)[0];
        let point = |i: u32| (quad[3 * i as usize], quad[3 * i as usize + 1]);

        let signed_areas: Vec<f32> = crate::gfx::geometry::fan_indices(4, 0)
            .chunks_exact(3)
            .map(|t| {
                let (a, b, c) = (point(t[0]), point(t[1]), point(t[2]));
                (b.0 - a.0) * (c.1 - a.1) - (b.1 - a.1) * (c.0 - a.0)
            })
            .collect();

        assert_eq!(signed_areas, vec![-4.0, -4.0]);
    }

    #[test]
    fn test_box_normals_follow_face_order() {
        let normals = box_normals();
        let faces = box_vertices(1.0, 1.0, 1.0);
        assert_eq!(normals.len(), 72);

        // each normal points along the axis its face sits on
        for (face, normal) in faces.iter().zip(normals.chunks_exact(12)) {
            for (vertex, n) in face.chunks_exact(3).zip(normal.chunks_exact(3)) {
                let dot: f32 = vertex.iter().zip(n).map(|(a, b)| a * b).sum();
                assert_eq!(dot, 1.0);
            }
        }
    }
}
