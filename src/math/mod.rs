// src/math/mod.rs
//! Math helpers: the [`Vector`] type, a few scalar formulas and random numbers.

pub mod random;
pub mod vector;

pub use vector::{dist, within, Size2, Vector, Vector2, Vector3};

pub const PI: f32 = std::f32::consts::PI;
pub const TWO_PI: f32 = std::f32::consts::TAU;
pub const HALF_PI: f32 = std::f32::consts::FRAC_PI_2;

/// Point on the unit circle at angle `theta` (radians), on the z = 0 plane.
pub fn unit_circle(theta: f32) -> Vector3 {
    Vector3::new(theta.cos(), theta.sin(), 0.0)
}

/// Re-maps `n` from the range `[start1, stop1]` into `[start2, stop2]`.
pub fn map_range(n: f32, start1: f32, stop1: f32, start2: f32, stop2: f32) -> f32 {
    (n - start1) / (stop1 - start1) * (stop2 - start2) + start2
}

pub fn is_power_of_two(value: u32) -> bool {
    value != 0 && (value & (value - 1)) == 0
}

pub fn squared(n: f32) -> f32 {
    n * n
}
