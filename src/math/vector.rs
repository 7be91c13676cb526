// src/math/vector.rs
//! # Vector Math
//!
//! A single fixed-size vector type used for positions and sizes throughout the
//! playground. [`Vector2`] and [`Vector3`] are aliases over the same generic
//! type, so every operation is written once.
//!
//! ## Mutating arithmetic
//!
//! Each arithmetic verb has a vector-vector and a vector-scalar form. They
//! mutate the receiver in place and return it, which allows chaining:
//!
//! ```rust
//! use canvas_playground::math::Vector3;
//!
//! let mut v = Vector3::new(1.0, 2.0, 3.0);
//! v.add_scalar(1.0).mul_scalar(2.0);
//! assert_eq!(v.to_array(), [4.0, 6.0, 8.0]);
//! ```
//!
//! Use [`Vector::copy`] (or plain `Copy` semantics) to keep the original.

use std::ops::{Add, AddAssign, Div, Index, IndexMut, Mul, Sub, SubAssign};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vector<const N: usize> {
    components: [f32; N],
}

pub type Vector2 = Vector<2>;
pub type Vector3 = Vector<3>;

/// Width and height of an axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size2 {
    pub width: f32,
    pub height: f32,
}

impl Size2 {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

impl<const N: usize> Default for Vector<N> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<const N: usize> Vector<N> {
    pub const fn from_array(components: [f32; N]) -> Self {
        Self { components }
    }

    pub const fn zero() -> Self {
        Self {
            components: [0.0; N],
        }
    }

    pub fn add_vector(&mut self, other: &Self) -> &mut Self {
        for (c, o) in self.components.iter_mut().zip(other.components) {
            *c += o;
        }
        self
    }

    pub fn add_scalar(&mut self, value: f32) -> &mut Self {
        self.components.iter_mut().for_each(|c| *c += value);
        self
    }

    pub fn sub_vector(&mut self, other: &Self) -> &mut Self {
        for (c, o) in self.components.iter_mut().zip(other.components) {
            *c -= o;
        }
        self
    }

    pub fn sub_scalar(&mut self, value: f32) -> &mut Self {
        self.components.iter_mut().for_each(|c| *c -= value);
        self
    }

    /// Component-wise multiplication.
    pub fn mul_vector(&mut self, other: &Self) -> &mut Self {
        for (c, o) in self.components.iter_mut().zip(other.components) {
            *c *= o;
        }
        self
    }

    pub fn mul_scalar(&mut self, value: f32) -> &mut Self {
        self.components.iter_mut().for_each(|c| *c *= value);
        self
    }

    /// Component-wise division. Division by zero yields infinities, as with `f32`.
    pub fn div_vector(&mut self, other: &Self) -> &mut Self {
        for (c, o) in self.components.iter_mut().zip(other.components) {
            *c /= o;
        }
        self
    }

    pub fn div_scalar(&mut self, value: f32) -> &mut Self {
        self.components.iter_mut().for_each(|c| *c /= value);
        self
    }

    /// Returns an independent copy of this vector.
    pub fn copy(&self) -> Self {
        *self
    }

    pub fn to_array(&self) -> [f32; N] {
        self.components
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.components
    }

    /// Euclidean distance between two points.
    pub fn distance(&self, other: &Self) -> f32 {
        self.components
            .iter()
            .zip(other.components.iter())
            .map(|(a, b)| (a - b) * (a - b))
            .sum::<f32>()
            .sqrt()
    }
}

impl Vector<2> {
    pub const fn new(x: f32, y: f32) -> Self {
        Self::from_array([x, y])
    }

    pub fn x(&self) -> f32 {
        self.components[0]
    }

    pub fn y(&self) -> f32 {
        self.components[1]
    }

    pub fn extend(&self, z: f32) -> Vector3 {
        Vector3::new(self.x(), self.y(), z)
    }
}

impl Vector<3> {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self::from_array([x, y, z])
    }

    pub fn x(&self) -> f32 {
        self.components[0]
    }

    pub fn y(&self) -> f32 {
        self.components[1]
    }

    pub fn z(&self) -> f32 {
        self.components[2]
    }

    pub fn truncate(&self) -> Vector2 {
        Vector2::new(self.x(), self.y())
    }
}

impl From<Vector2> for Vector3 {
    /// Lifts a 2D point onto the z = 0 plane.
    fn from(v: Vector2) -> Self {
        v.extend(0.0)
    }
}

impl From<[f32; 3]> for Vector3 {
    fn from(components: [f32; 3]) -> Self {
        Self::from_array(components)
    }
}

impl From<[f32; 2]> for Vector2 {
    fn from(components: [f32; 2]) -> Self {
        Self::from_array(components)
    }
}

impl From<Vector3> for cgmath::Vector3<f32> {
    fn from(v: Vector3) -> Self {
        cgmath::Vector3::new(v.x(), v.y(), v.z())
    }
}

impl From<cgmath::Vector3<f32>> for Vector3 {
    fn from(v: cgmath::Vector3<f32>) -> Self {
        Vector3::new(v.x, v.y, v.z)
    }
}

impl From<Vector2> for cgmath::Vector2<f32> {
    fn from(v: Vector2) -> Self {
        cgmath::Vector2::new(v.x(), v.y())
    }
}

impl<const N: usize> Index<usize> for Vector<N> {
    type Output = f32;

    fn index(&self, index: usize) -> &f32 {
        &self.components[index]
    }
}

impl<const N: usize> IndexMut<usize> for Vector<N> {
    fn index_mut(&mut self, index: usize) -> &mut f32 {
        &mut self.components[index]
    }
}

impl<const N: usize> Add for Vector<N> {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self {
        self.add_vector(&rhs);
        self
    }
}

impl<const N: usize> Sub for Vector<N> {
    type Output = Self;

    fn sub(mut self, rhs: Self) -> Self {
        self.sub_vector(&rhs);
        self
    }
}

impl<const N: usize> Mul<f32> for Vector<N> {
    type Output = Self;

    fn mul(mut self, rhs: f32) -> Self {
        self.mul_scalar(rhs);
        self
    }
}

impl<const N: usize> Div<f32> for Vector<N> {
    type Output = Self;

    fn div(mut self, rhs: f32) -> Self {
        self.div_scalar(rhs);
        self
    }
}

impl<const N: usize> AddAssign for Vector<N> {
    fn add_assign(&mut self, rhs: Self) {
        self.add_vector(&rhs);
    }
}

impl<const N: usize> SubAssign for Vector<N> {
    fn sub_assign(&mut self, rhs: Self) {
        self.sub_vector(&rhs);
    }
}

/// Distance between two 2D points given as raw coordinates.
pub fn dist(x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    ((x1 - x2).powi(2) + (y1 - y2).powi(2)).sqrt()
}

/// Returns true when two centred rectangles overlap on both axes.
///
/// Touching edges do not count as overlap.
pub fn within(a: &Vector2, a_size: Size2, b: &Vector2, b_size: Size2) -> bool {
    a.x() - a_size.width / 2.0 < b.x() + b_size.width / 2.0
        && a.x() + a_size.width / 2.0 > b.x() - b_size.width / 2.0
        && a.y() - a_size.height / 2.0 < b.y() + b_size.height / 2.0
        && a.y() + a_size.height / 2.0 > b.y() - b_size.height / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chained_arithmetic_mutates_receiver() {
        let mut v = Vector3::new(1.0, 2.0, 3.0);
        v.add_vector(&Vector3::new(1.0, 1.0, 1.0))
            .mul_scalar(2.0)
            .sub_scalar(1.0);
        assert_eq!(v.to_array(), [3.0, 5.0, 7.0]);

        v.div_vector(&Vector3::new(3.0, 5.0, 7.0));
        assert_eq!(v.to_array(), [1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_copy_is_independent() {
        let mut original = Vector2::new(4.0, 5.0);
        let copy = original.copy();
        original.add_scalar(10.0);

        assert_eq!(copy.to_array(), [4.0, 5.0]);
        assert_eq!(original.to_array(), [14.0, 15.0]);
    }

    #[test]
    fn test_value_operators() {
        let a = Vector3::new(1.0, 2.0, 3.0);
        let b = Vector3::new(0.5, 0.5, 0.5);

        assert_eq!((a + b).to_array(), [1.5, 2.5, 3.5]);
        assert_eq!((a - b).to_array(), [0.5, 1.5, 2.5]);
        assert_eq!((a * 2.0).to_array(), [2.0, 4.0, 6.0]);
        assert_eq!((a / 2.0).to_array(), [0.5, 1.0, 1.5]);
        // operands untouched
        assert_eq!(a.to_array(), [1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_distance() {
        let a = Vector2::new(0.0, 0.0);
        let b = Vector2::new(3.0, 4.0);
        assert!((a.distance(&b) - 5.0).abs() < 1e-6);
        assert!((dist(0.0, 0.0, 3.0, 4.0) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_within_overlap() {
        let size = Size2::new(2.0, 2.0);
        let a = Vector2::new(0.0, 0.0);

        assert!(within(&a, size, &Vector2::new(1.0, 1.0), size));
        assert!(!within(&a, size, &Vector2::new(2.0, 0.0), size));
        assert!(!within(&a, size, &Vector2::new(0.0, 5.0), size));
    }

    #[test]
    fn test_conversions() {
        let v: Vector3 = Vector2::new(1.0, 2.0).into();
        assert_eq!(v.to_array(), [1.0, 2.0, 0.0]);

        let c: cgmath::Vector3<f32> = v.into();
        assert_eq!(c, cgmath::Vector3::new(1.0, 2.0, 0.0));
        assert_eq!(Vector3::from(c).truncate(), Vector2::new(1.0, 2.0));
    }
}
