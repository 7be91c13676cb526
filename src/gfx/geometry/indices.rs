//! Triangle-fan index generation.

use super::Face;

/// Upper bound on the fan emission loop for a single face.
///
/// The loop counter starts at 1 and stops once it reaches this value, so a
/// face never produces more than `FAN_TRIANGLE_LIMIT - 1` triangles.
pub const FAN_TRIANGLE_LIMIT: u32 = 1000;

/// Fan indices for one face of `vertex_count` vertices, shifted by `offset`.
///
/// Produces `[0,1,2, 0,2,3, 0,3,4, ...]` anchored at the first vertex. Faces
/// with fewer than three vertices are passed through as `0..vertex_count`.
pub fn fan_indices(vertex_count: u32, offset: u32) -> Vec<u32> {
    if vertex_count < 3 {
        return (0..vertex_count).map(|i| i + offset).collect();
    }

    let last = (vertex_count - 1).min(FAN_TRIANGLE_LIMIT);
    let mut indices = Vec::with_capacity(3 * (last as usize - 1));
    for t in 1..last {
        indices.extend_from_slice(&[offset, offset + t, offset + t + 1]);
    }
    indices
}

/// Fan indices for every face, offset by the vertices of all prior faces.
pub fn generate_indices(faces: &[Face]) -> Vec<Vec<u32>> {
    let mut offset = 0u32;
    faces
        .iter()
        .map(|face| {
            let count = (face.len() / 3) as u32;
            let indices = fan_indices(count, offset);
            offset += count;
            indices
        })
        .collect()
}

pub fn flatten_indices(indices: &[Vec<u32>]) -> Vec<u32> {
    indices.iter().flatten().copied().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::geometry::cube_vertices;

    #[test]
    fn test_quad_fan() {
        assert_eq!(fan_indices(4, 0), vec![0, 1, 2, 0, 2, 3]);
        assert_eq!(fan_indices(3, 10), vec![10, 11, 12]);
    }

    #[test]
    fn test_fan_properties() {
        for n in 3..40u32 {
            let indices = fan_indices(n, 0);
            assert_eq!(indices.len() as u32, 3 * (n - 2));
            assert_eq!(
                indices.iter().filter(|&&i| i == 0).count() as u32,
                n - 2,
                "anchor count for {n} vertices"
            );
            for vertex in 0..n {
                assert!(indices.contains(&vertex));
            }
            assert_eq!(*indices.iter().max().unwrap(), n - 1);
        }
    }

    #[test]
    fn test_degenerate_faces_pass_through() {
        assert_eq!(fan_indices(2, 5), vec![5, 6]);
        assert_eq!(fan_indices(1, 0), vec![0]);
        assert!(fan_indices(0, 3).is_empty());
    }

    #[test]
    fn test_offsets_across_faces() {
        let faces = vec![vec![0.0; 12], vec![0.0; 9], vec![0.0; 6], vec![0.0; 12]];
        let indices = generate_indices(&faces);

        assert_eq!(indices[0], vec![0, 1, 2, 0, 2, 3]);
        assert_eq!(indices[1], vec![4, 5, 6]);
        assert_eq!(indices[2], vec![7, 8]);
        assert_eq!(indices[3], vec![9, 10, 11, 9, 11, 12]);
    }

    #[test]
    fn test_cube_indices() {
        let indices = generate_indices(&cube_vertices(1.0));
        let flat = flatten_indices(&indices);

        assert_eq!(flat.len(), 36);
        assert!(flat.iter().all(|&i| i < 24));
    }

    #[test]
    fn test_loop_cap() {
        let indices = fan_indices(1500, 0);
        assert_eq!(indices.len(), 3 * (FAN_TRIANGLE_LIMIT as usize - 1));
        assert_eq!(indices[indices.len() - 1], FAN_TRIANGLE_LIMIT);
    }
}
