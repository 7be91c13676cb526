//! # Procedural Geometry Generation
//!
//! Meshes are described as a [`FaceList`]: one flat `Vec<f32>` of packed
//! `x, y, z` triples per planar face. Faces are triangulated as fans by
//! [`generate_indices`], which offsets each face so that the whole list can be
//! flattened into a single vertex buffer.
//!
//! ## Supported Primitives
//!
//! - **Cube / Box**: six quads in the order front, back, top, bottom, right, left
//! - **Quad**: a single flat face on the z = 0 plane
//! - **Circle / Cylinder**: a sampled ring, optionally extruded with linked side walls
//!
//! ## Usage
//!
//! ```rust
//! use canvas_playground::gfx::geometry::{cube_vertices, generate_indices};
//!
//! let faces = cube_vertices(1.0);
//! let indices = generate_indices(&faces);
//! assert_eq!(indices.iter().map(Vec::len).sum::<usize>(), 36);
//! ```

pub mod circle;
pub mod indices;
pub mod primitives;
pub mod rings;

pub use circle::{circle_faces, resolve_radius, CircleDescriptor, DEFAULT_CIRCLE_QUALITY, MAX_CIRCLE_QUALITY};
pub use indices::{fan_indices, flatten_indices, generate_indices, FAN_TRIANGLE_LIMIT};
pub use primitives::*;
pub use rings::link_rings;

use crate::error::{PlaygroundError, Result};

/// Packed `x, y, z` triples of one planar face.
pub type Face = Vec<f32>;
pub type FaceList = Vec<Face>;
/// One fan index run per face, already offset into the flattened buffer.
pub type IndexList = Vec<Vec<u32>>;

/// Normals supplied either flat or grouped per face.
#[derive(Debug, Clone, PartialEq)]
pub enum Normals {
    Flat(Vec<f32>),
    PerFace(Vec<Vec<f32>>),
}

impl Normals {
    pub fn flatten(self) -> Vec<f32> {
        match self {
            Normals::Flat(values) => values,
            Normals::PerFace(faces) => faces.into_iter().flatten().collect(),
        }
    }
}

impl From<Vec<f32>> for Normals {
    fn from(values: Vec<f32>) -> Self {
        Normals::Flat(values)
    }
}

impl From<Vec<Vec<f32>>> for Normals {
    fn from(faces: Vec<Vec<f32>>) -> Self {
        Normals::PerFace(faces)
    }
}

/// Checks that every face holds whole `x, y, z` triples.
pub fn validate_faces(faces: &[Face]) -> Result<()> {
    match faces.iter().position(|face| face.len() % 3 != 0) {
        Some(face) => Err(PlaygroundError::InvalidFace {
            face,
            len: faces[face].len(),
        }),
        None => Ok(()),
    }
}

/// Checks that every index addresses one of `vertex_count` vertices.
pub fn validate_indices(indices: &[Vec<u32>], vertex_count: usize) -> Result<()> {
    match indices
        .iter()
        .flatten()
        .find(|&&index| index as usize >= vertex_count)
    {
        Some(&index) => Err(PlaygroundError::IndexOutOfRange { index, vertex_count }),
        None => Ok(()),
    }
}

/// Row-major flattening, face by face.
pub fn flatten_faces(faces: &[Face]) -> Vec<f32> {
    faces.iter().flatten().copied().collect()
}

pub fn vertex_count(faces: &[Face]) -> usize {
    faces.iter().map(|face| face.len() / 3).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_faces() {
        assert!(validate_faces(&cube_vertices(1.0)).is_ok());

        let bad = vec![vec![0.0; 9], vec![0.0; 7]];
        assert!(matches!(
            validate_faces(&bad),
            Err(PlaygroundError::InvalidFace { face: 1, len: 7 })
        ));
    }

    #[test]
    fn test_validate_indices() {
        let faces = cube_vertices(1.0);
        assert!(validate_indices(&generate_indices(&faces), vertex_count(&faces)).is_ok());

        assert!(matches!(
            validate_indices(&[vec![0, 1, 2], vec![0, 2, 3]], 3),
            Err(PlaygroundError::IndexOutOfRange { index: 3, vertex_count: 3 })
        ));
        assert!(validate_indices(&[], 0).is_ok());
    }

    #[test]
    fn test_normals_flatten() {
        let normals = Normals::PerFace(vec![vec![0.0, 0.0, 1.0], vec![0.0, 1.0, 0.0]]);
        assert_eq!(normals.flatten(), vec![0.0, 0.0, 1.0, 0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_flatten_and_count() {
        let faces = quad_vertices(1.0);
        assert_eq!(flatten_faces(&faces).len(), 12);
        assert_eq!(vertex_count(&cube_vertices(2.0)), 24);
    }
}
