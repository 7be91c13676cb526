// src/math/random.rs
//! Random number helpers backed by the thread-local `rand` generator.

use rand::Rng;

/// Uniform value in `[min, max)`. Returns `min` when the range is empty.
pub fn random_range(min: f32, max: f32) -> f32 {
    if min >= max || min.is_nan() || max.is_nan() {
        return min;
    }
    rand::rng().random_range(min..max)
}

/// Uniform value in `[0, 1)`.
pub fn random_unit() -> f32 {
    rand::rng().random::<f32>()
}

/// A random unsigned 32-bit seed.
pub fn random_seed() -> u32 {
    rand::rng().random::<u32>()
}

/// Normally distributed value (polar Box-Muller).
pub fn random_gaussian(mean: f32, standard_deviation: f32) -> f32 {
    let mut rng = rand::rng();
    loop {
        let x1: f32 = rng.random_range(-1.0..1.0);
        let x2: f32 = rng.random_range(-1.0..1.0);
        let w = x1 * x1 + x2 * x2;
        if w > 0.0 && w < 1.0 {
            let scale = (-2.0 * w.ln() / w).sqrt();
            return mean + x1 * scale * standard_deviation;
        }
    }
}

/// Random opaque RGBA color.
pub fn random_color() -> [u8; 4] {
    let mut rng = rand::rng();
    [rng.random(), rng.random(), rng.random(), 255]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_range_bounds() {
        for _ in 0..1000 {
            let v = random_range(-2.0, 3.0);
            assert!((-2.0..3.0).contains(&v));
        }
        assert_eq!(random_range(4.0, 4.0), 4.0);
    }

    #[test]
    fn test_gaussian_is_centred() {
        let samples = 5000;
        let mean: f32 = (0..samples)
            .map(|_| random_gaussian(10.0, 1.0))
            .sum::<f32>()
            / samples as f32;
        assert!((mean - 10.0).abs() < 0.2);
    }

    #[test]
    fn test_random_color_is_opaque() {
        assert_eq!(random_color()[3], 255);
    }
}
