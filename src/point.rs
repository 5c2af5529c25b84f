//! Point primitive used for node bounds and payload locations.
//!
//! A point always has `x` and `y`. The optional `z` is carried along but never
//! used for partitioning. An absent `z` is distinct from `Some(0.0)` for
//! equality, and counts as zero for arithmetic and length.

use std::ops::{Add, Mul, Sub};

/// 2-D point with an optional third coordinate
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    /// Horizontal coordinate
    pub x: f64,
    /// Vertical coordinate, increasing upward
    pub y: f64,
    /// Optional depth coordinate
    pub z: Option<f64>,
}

impl Point {
    /// Creates a 2-D point
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y, z: None }
    }

    /// Creates a point carrying a `z` coordinate
    #[must_use]
    pub const fn new_3d(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z: Some(z) }
    }

    /// `z`, or `0.0` when absent
    #[inline]
    #[must_use]
    pub fn z_or_zero(&self) -> f64 {
        self.z.unwrap_or(0.0)
    }

    /// Euclidean length
    #[must_use]
    pub fn length(&self) -> f64 {
        let z = self.z_or_zero();
        (self.x * self.x + self.y * self.y + z * z).sqrt()
    }

    /// Euclidean distance to `other`
    #[must_use]
    pub fn distance(&self, other: &Self) -> f64 {
        (*self - *other).length()
    }
}

#[inline]
fn combine_z(a: Option<f64>, b: Option<f64>, op: impl Fn(f64, f64) -> f64) -> Option<f64> {
    match (a, b) {
        (None, None) => None,
        (a, b) => Some(op(a.unwrap_or(0.0), b.unwrap_or(0.0))),
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
            z: combine_z(self.z, rhs.z, |a, b| a + b),
        }
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
            z: combine_z(self.z, rhs.z, |a, b| a - b),
        }
    }
}

impl Mul<f64> for Point {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self {
            x: self.x * rhs,
            y: self.y * rhs,
            z: self.z.map(|z| z * rhs),
        }
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl From<[f64; 2]> for Point {
    fn from([x, y]: [f64; 2]) -> Self {
        Self::new(x, y)
    }
}

impl From<[f64; 3]> for Point {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self::new_3d(x, y, z)
    }
}

#[cfg(test)]
mod tests {
    use super::Point;

    #[test]
    fn test_construction() {
        let v = Point::new_3d(1.0, 2.0, 3.0);
        assert_eq!(v, Point::from([1.0, 2.0, 3.0]), "array construction should match");
        assert_eq!(Point::new(1.0, 2.0), Point::from((1.0, 2.0)));
        assert_eq!(Point::new(1.0, 2.0).z, None, "2-D point has no z");
    }

    #[test]
    fn test_multiply() {
        assert_eq!(Point::new(2.0, 3.0) * 2.0, Point::new(4.0, 6.0));
        assert_eq!(Point::new(0.0, 1.0) * -10.0, Point::new(0.0, -10.0));
        assert_eq!(Point::new_3d(-0.5, 1.0, -10.0) * -10.0, Point::new_3d(5.0, -10.0, 100.0));
    }

    #[test]
    fn test_add() {
        assert_eq!(Point::new(1.0, 1.0) + Point::new(1.0, 2.0), Point::new(2.0, 3.0));
        assert_eq!(Point::new(-1.0, 10.0) + Point::new(3.0, -7.0), Point::new(2.0, 3.0));
        assert_eq!(
            Point::new_3d(-1.0, 10.0, 2.0) + Point::new_3d(3.0, -7.0, -3.0),
            Point::new_3d(2.0, 3.0, -1.0)
        );
    }

    #[test]
    fn test_add_mixed_dimensions_treats_missing_z_as_zero() {
        let sum = Point::new(1.0, 1.0) + Point::new_3d(1.0, 1.0, 4.0);
        assert_eq!(sum, Point::new_3d(2.0, 2.0, 4.0));
    }

    #[test]
    fn test_subtract() {
        assert_eq!(Point::new(4.0, 4.0) - Point::new(2.0, 1.0), Point::new(2.0, 3.0));
        assert_eq!(Point::new(-1.0, 10.0) - Point::new(-6.0, 11.0), Point::new(5.0, -1.0));
        assert_eq!(
            Point::new_3d(-1.0, 10.0, 12.0) - Point::new_3d(-6.0, 11.0, 2.0),
            Point::new_3d(5.0, -1.0, 10.0)
        );
    }

    #[test]
    fn test_length() {
        assert_eq!(Point::new(5.0, 0.0).length(), 5.0);
        assert_eq!(Point::new_3d(0.0, 5.0, 0.0).length(), 5.0);
        assert_eq!(Point::new_3d(3.0, 4.0, 0.0).length(), 5.0);
        assert_eq!(Point::new_3d(0.0, 3.0, 4.0).length(), 5.0);
        assert_eq!(Point::new(0.0, 0.0).distance(&Point::new(3.0, 4.0)), 5.0);
    }

    #[test]
    fn test_equality() {
        assert_eq!(Point::new(5.0, 0.0), Point::new(5.0, 0.0));
        assert_eq!(Point::new_3d(-1.0, -2.0, -4.0), Point::new_3d(-1.0, -2.0, -4.0));
        assert_ne!(Point::new_3d(-1.0, -2.0, 5.0), Point::new_3d(-1.0, -2.0, 4.0));
        assert_ne!(Point::new(-1.0, -2.0), Point::new_3d(-1.0, -2.0, 4.0));
        assert_ne!(Point::new(-2.0, -2.0), Point::new(-1.0, -2.0));
        assert_ne!(Point::new(1.0, 1.0), Point::new_3d(1.0, 1.0, 0.0), "absent z is not zero");
    }
}
