//! Stitching two rings of points into a band of quads.
//!
//! Used for cylinder side walls: the front and back rings of an extruded
//! circle are walked in lock-step, two points at a time, alternating rings.
//! Point `k` and `k + 1` of both rings end up in one quad, with the starting
//! ring alternating from quad to quad:
//!
//! ```text
//! (A0, B0, B1, A1) (B1, A1, A2, B2) (A2, B2, B3, A3) ...
//! ```
//!
//! After the last pair the final partial quad is completed by wrapping back
//! to the start of the rings (`B0`, then `A1`), so the band has no gap. The
//! seam quad does not follow the angular order of the others.

use super::{Face, FaceList};
use crate::error::{PlaygroundError, Result};

const POINTS_PER_QUAD: usize = 4;

/// Links ring `first` to ring `second`, both flat `x, y, z` sequences of the
/// same length. Returns one 12-value face per quad.
pub fn link_rings(first: &[f32], second: &[f32]) -> Result<FaceList> {
    if first.len() != second.len() || first.len() % 3 != 0 {
        return Err(PlaygroundError::RingLengthMismatch {
            first: first.len(),
            second: second.len(),
        });
    }

    let rings: [Vec<&[f32]>; 2] = [
        first.chunks_exact(3).collect(),
        second.chunks_exact(3).collect(),
    ];
    let len = rings[0].len();
    if len == 0 {
        return Ok(Vec::new());
    }

    let mut quads = Vec::with_capacity(len);
    let mut pending: Vec<&[f32]> = Vec::with_capacity(POINTS_PER_QUAD);
    let mut carried: Vec<&[f32]> = Vec::with_capacity(2);
    let mut carrying = false;
    let mut ring = 0;
    let mut point = 0;

    for step in 0..2 * len {
        let pair_end = step % 2 == 1;
        if pair_end {
            ring ^= 1;
        }

        let p = rings[ring][point];
        pending.push(p);
        if carrying {
            carried.push(p);
        }

        if pending.len() == POINTS_PER_QUAD {
            quads.push(to_face(&pending));
            pending.clear();
        }

        // The pair just emitted also opens the next quad.
        if pair_end {
            point += 1;
            pending.append(&mut carried);
            carrying = true;
        }
    }

    if !pending.is_empty() {
        let (mut ring, mut point) = (1, 0);
        while pending.len() < POINTS_PER_QUAD {
            pending.push(rings[ring][point % len]);
            point += 1;
            ring ^= 1;
        }
        quads.push(to_face(&pending));
    }

    log::trace!("Linked two rings of {len} points into {} quads", quads.len());
    Ok(quads)
}

fn to_face(points: &[&[f32]]) -> Face {
    points.iter().flat_map(|p| p.iter().copied()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring(len: usize, z: f32) -> Vec<f32> {
        (0..len)
            .flat_map(|i| [i as f32, (i * 10) as f32, z])
            .collect()
    }

    fn points(face: &[f32]) -> Vec<[f32; 3]> {
        face.chunks_exact(3).map(|p| [p[0], p[1], p[2]]).collect()
    }

    #[test]
    fn test_quad_sequence() {
        let a = ring(4, 1.0);
        let b = ring(4, -1.0);
        let quads = link_rings(&a, &b).unwrap();

        let pa = |i: usize| [i as f32, (i * 10) as f32, 1.0];
        let pb = |i: usize| [i as f32, (i * 10) as f32, -1.0];

        assert_eq!(points(&quads[0]), vec![pa(0), pb(0), pb(1), pa(1)]);
        assert_eq!(points(&quads[1]), vec![pb(1), pa(1), pa(2), pb(2)]);
        assert_eq!(points(&quads[2]), vec![pa(2), pb(2), pb(3), pa(3)]);
    }

    #[test]
    fn test_seam_wraps_to_start() {
        let a = ring(5, 1.0);
        let b = ring(5, -1.0);
        let quads = link_rings(&a, &b).unwrap();
        let seam = points(quads.last().unwrap());

        assert!(seam.contains(&[0.0, 0.0, -1.0])); // B0
        assert!(seam.contains(&[1.0, 10.0, 1.0])); // A1
        assert!(seam.contains(&[4.0, 40.0, 1.0]));
        assert!(seam.contains(&[4.0, 40.0, -1.0]));
    }

    #[test]
    fn test_closure_and_membership() {
        for len in 1..20 {
            let a = ring(len, 2.0);
            let b = ring(len, -2.0);
            let quads = link_rings(&a, &b).unwrap();

            assert_eq!(quads.len(), len);
            let all: Vec<[f32; 3]> = quads.iter().flat_map(|q| points(q)).collect();
            assert_eq!(all.len(), 4 * quads.len());

            let inputs: Vec<[f32; 3]> = points(&a).into_iter().chain(points(&b)).collect();
            for p in &all {
                assert!(inputs.contains(p), "synthesized point {p:?}");
            }
            for p in &inputs {
                assert!(all.contains(p), "ring point {p:?} left unlinked");
            }
        }
    }

    #[test]
    fn test_single_point_rings() {
        let quads = link_rings(&[1.0, 0.0, 1.0], &[1.0, 0.0, -1.0]).unwrap();
        assert_eq!(quads.len(), 1);
        assert_eq!(quads[0].len(), 12);
    }

    #[test]
    fn test_empty_and_mismatched_rings() {
        assert!(link_rings(&[], &[]).unwrap().is_empty());
        assert!(matches!(
            link_rings(&ring(3, 0.0), &ring(4, 0.0)),
            Err(PlaygroundError::RingLengthMismatch { first: 9, second: 12 })
        ));
    }
}
