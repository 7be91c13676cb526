//! Circle and cylinder generation.
//!
//! A circle is one ring face sampled every `quality` radians. With a depth it
//! becomes a cylinder: a front ring at `+depth`, a back ring at `-depth` and
//! the side walls produced by [`link_rings`].

use super::{link_rings, FaceList, Normals};
use crate::error::{PlaygroundError, Result};
use crate::gfx::resources::texture::TextureBuffer;
use crate::math::{unit_circle, Vector3, TWO_PI};

/// Angular step used when no quality is given.
pub const DEFAULT_CIRCLE_QUALITY: f32 = 0.1;
/// Coarsest accepted angular step.
pub const MAX_CIRCLE_QUALITY: f32 = 0.7;

/// Parameters for [`crate::gfx::scene::Mesh::circle`].
#[derive(Debug, Clone)]
pub struct CircleDescriptor {
    pub center: Vector3,
    /// Angular step in radians, `(0, 0.7]`.
    pub quality: Option<f32>,
    pub radius: Option<f32>,
    /// Extrusion half-depth along Z. Zero keeps the circle flat.
    pub depth: f32,
    pub texture: Option<TextureBuffer>,
    pub normals: Option<Normals>,
}

impl CircleDescriptor {
    pub fn new(center: impl Into<Vector3>) -> Self {
        Self {
            center: center.into(),
            quality: None,
            radius: None,
            depth: 0.0,
            texture: None,
            normals: None,
        }
    }

    pub fn with_quality(mut self, quality: f32) -> Self {
        self.quality = Some(quality);
        self
    }

    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = Some(radius);
        self
    }

    pub fn with_depth(mut self, depth: f32) -> Self {
        self.depth = depth;
        self
    }

    pub fn with_texture(mut self, texture: TextureBuffer) -> Self {
        self.texture = Some(texture);
        self
    }

    pub fn with_normals(mut self, normals: impl Into<Normals>) -> Self {
        self.normals = Some(normals.into());
        self
    }
}

/// Samples `ceil(2π / quality) + 1` points on a circle of `radius` at height
/// `z`, closing exactly at 2π.
pub fn sample_ring(quality: f32, radius: f32, z: f32) -> Vec<f32> {
    let steps = (TWO_PI / quality).ceil() as usize;
    (0..steps)
        .map(|k| k as f32 * quality)
        .chain(std::iter::once(TWO_PI))
        .flat_map(|theta| {
            let mut point = unit_circle(theta);
            point.mul_scalar(radius);
            [point.x(), point.y(), z]
        })
        .collect()
}

/// Radius to build with. Missing, zero and non-finite radii fall back to 1.
pub fn resolve_radius(radius: Option<f32>) -> f32 {
    match radius {
        Some(radius) if radius != 0.0 && radius.is_finite() => radius,
        Some(radius) if radius != 0.0 => {
            log::warn!("Circle creation: radius {radius} treated as 1");
            1.0
        }
        _ => 1.0,
    }
}

/// Faces of a flat circle, or of a capped cylinder when `depth > 0`.
///
/// Cylinder faces are ordered front cap, back cap, then the side quads.
pub fn circle_faces(quality: Option<f32>, radius: Option<f32>, depth: f32) -> Result<FaceList> {
    let quality = quality.unwrap_or(DEFAULT_CIRCLE_QUALITY);
    if !(quality > 0.0 && quality <= MAX_CIRCLE_QUALITY) {
        log::error!("Circle creation: quality must lie in (0, {MAX_CIRCLE_QUALITY}], got {quality}");
        return Err(PlaygroundError::InvalidQuality(quality));
    }
    let radius = resolve_radius(radius);

    let depth = if depth > 0.0 && depth.is_finite() {
        depth
    } else {
        if depth != 0.0 {
            log::warn!("Circle creation: depth {depth} treated as 0");
        }
        0.0
    };

    if depth == 0.0 {
        return Ok(vec![sample_ring(quality, radius, 0.0)]);
    }

    let front = sample_ring(quality, radius, depth);
    let back = sample_ring(quality, radius, -depth);
    let sides = link_rings(&front, &back)?;

    let mut faces = Vec::with_capacity(2 + sides.len());
    faces.push(front);
    faces.push(back);
    faces.extend(sides);
    Ok(faces)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ring_point_count_and_radius() {
        for &(quality, radius) in &[(0.1_f32, 1.0_f32), (0.7, 2.5), (0.33, 0.5), (0.05, 10.0)] {
            let faces = circle_faces(Some(quality), Some(radius), 0.0).unwrap();
            assert_eq!(faces.len(), 1);

            let expected = (TWO_PI / quality).ceil() as usize + 1;
            assert_eq!(faces[0].len() / 3, expected);

            for p in faces[0].chunks_exact(3) {
                let distance = (p[0] * p[0] + p[1] * p[1]).sqrt();
                assert!((distance - radius).abs() < 1e-4 * radius.max(1.0));
                assert_eq!(p[2], 0.0);
            }
        }
    }

    #[test]
    fn test_ring_closes_at_two_pi() {
        let ring = sample_ring(0.3, 1.0, 0.0);
        let n = ring.len();
        assert!((ring[n - 3] - 1.0).abs() < 1e-6);
        assert!(ring[n - 2].abs() < 1e-5);
    }

    #[test]
    fn test_defaults() {
        let faces = circle_faces(None, None, 0.0).unwrap();
        let expected = (TWO_PI / DEFAULT_CIRCLE_QUALITY).ceil() as usize + 1;
        assert_eq!(faces[0].len() / 3, expected);
        assert!((faces[0][0] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_invalid_quality() {
        for quality in [0.0_f32, -0.1, 0.71, 2.0, f32::NAN] {
            assert!(matches!(
                circle_faces(Some(quality), None, 0.0),
                Err(PlaygroundError::InvalidQuality(_))
            ));
        }
        assert!(circle_faces(Some(MAX_CIRCLE_QUALITY), None, 0.0).is_ok());
    }

    #[test]
    fn test_cylinder_faces() {
        let quality = 0.5;
        let faces = circle_faces(Some(quality), Some(1.0), 2.0).unwrap();
        let ring_len = (TWO_PI / quality).ceil() as usize + 1;

        assert_eq!(faces.len(), 2 + ring_len);
        assert!(faces[0].chunks_exact(3).all(|p| p[2] == 2.0));
        assert!(faces[1].chunks_exact(3).all(|p| p[2] == -2.0));
        assert!(faces[2..].iter().all(|quad| quad.len() == 12));
    }

    #[test]
    fn test_negative_depth_is_flat() {
        let faces = circle_faces(Some(0.5), None, -3.0).unwrap();
        assert_eq!(faces.len(), 1);
    }

    #[test]
    fn test_non_finite_depth_is_flat() {
        for depth in [f32::NAN, f32::INFINITY, f32::NEG_INFINITY] {
            let faces = circle_faces(Some(0.5), Some(1.0), depth).unwrap();
            assert_eq!(faces.len(), 1);
            assert!(faces[0].iter().all(|v| v.is_finite()));
        }
    }

    #[test]
    fn test_unusable_radius_falls_back_to_one() {
        for radius in [f32::NAN, f32::INFINITY, 0.0] {
            let faces = circle_faces(Some(0.5), Some(radius), 0.0).unwrap();
            for p in faces[0].chunks_exact(3) {
                assert!(p.iter().all(|v| v.is_finite()));
                assert!(((p[0] * p[0] + p[1] * p[1]).sqrt() - 1.0).abs() < 1e-5);
            }
        }
        assert_eq!(resolve_radius(Some(-2.0)), -2.0);
        assert_eq!(resolve_radius(None), 1.0);
    }
}
