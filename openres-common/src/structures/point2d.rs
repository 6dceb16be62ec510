/*
This code is part of the OpenRES hydrogeomorphic analysis library.
Authors: OpenRES developers
Created: 02/06/2025
Last Modified: 16/10/2026
License: MIT
*/

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

/// A 2-D point, with x and y fields. Also used as a 2-D vector.
#[derive(Default, Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl fmt::Display for Point2D {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "(x: {}, y: {})", self.x, self.y)
    }
}

impl Point2D {
    /// Creates a new Point2D,
    pub fn new(x: f64, y: f64) -> Point2D {
        Point2D { x, y }
    }

    /// Calculate Euclidean distance between the point and another.
    pub fn distance(&self, other: &Self) -> f64 {
        self.distance_squared(other).sqrt()
    }

    pub fn distance_squared(&self, other: &Self) -> f64 {
        (self.x - other.x) * (self.x - other.x) + (self.y - other.y) * (self.y - other.y)
    }

    /// Signed area of the parallelogram spanned by the two vectors,
    /// positive when `other` is counter-clockwise of `self`.
    pub fn cross(&self, other: Point2D) -> f64 {
        self.x * other.y - self.y * other.x
    }

    pub fn scale(&self, factor: f64) -> Point2D {
        Point2D::new(self.x * factor, self.y * factor)
    }

    pub fn translate(&self, delta_x: f64, delta_y: f64) -> Point2D {
        Point2D::new(self.x + delta_x, self.y + delta_y)
    }

    /// Bearing of the vector from this point to `other`, in degrees
    /// counter-clockwise from the positive x axis, within [0, 360).
    pub fn bearing_to(&self, other: &Self) -> f64 {
        let angle = (other.y - self.y).atan2(other.x - self.x).to_degrees();
        normalize_degrees(angle)
    }

    /// Tests whether the point lies inside the axis-aligned box spanned by `p1` and `p2`.
    pub fn is_between(&self, p1: &Point2D, p2: &Point2D) -> bool {
        self.x >= p1.x.min(p2.x)
            && self.x <= p1.x.max(p2.x)
            && self.y >= p1.y.min(p2.y)
            && self.y <= p1.y.max(p2.y)
    }
}

/// Wraps an angle in degrees into [0, 360).
pub fn normalize_degrees(angle: f64) -> f64 {
    let a = angle % 360f64;
    if a < 0f64 {
        a + 360f64
    } else {
        a
    }
}

impl Add for Point2D {
    type Output = Point2D;
    fn add(self, rhs: Self) -> Point2D {
        Point2D {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

impl Sub for Point2D {
    type Output = Point2D;
    fn sub(self, rhs: Self) -> Point2D {
        Point2D {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

#[cfg(test)]
mod test {
    use super::{normalize_degrees, Point2D};
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_distance() {
        let p1 = Point2D::new(0.0, 0.0);
        let p2 = Point2D::new(3.0, 4.0);
        assert_eq!(p1.distance(&p2), 5.0);
        assert_eq!(p1.distance_squared(&p2), 25.0);
    }

    #[test]
    fn test_cross_sign() {
        let east = Point2D::new(1.0, 0.0);
        assert!(east.cross(Point2D::new(0.0, 1.0)) > 0.0);
        assert!(east.cross(Point2D::new(0.0, -1.0)) < 0.0);
        assert_eq!(east.cross(Point2D::new(5.0, 0.0)), 0.0);
    }

    #[test]
    fn test_bearing() {
        let origin = Point2D::new(10.0, 10.0);
        assert_abs_diff_eq!(origin.bearing_to(&Point2D::new(20.0, 10.0)), 0.0);
        assert_abs_diff_eq!(origin.bearing_to(&Point2D::new(10.0, 20.0)), 90.0);
        assert_abs_diff_eq!(origin.bearing_to(&Point2D::new(10.0, 0.0)), 270.0);
    }

    #[test]
    fn test_normalize_degrees() {
        assert_eq!(normalize_degrees(450.0), 90.0);
        assert_eq!(normalize_degrees(-90.0), 270.0);
        assert_eq!(normalize_degrees(360.0), 0.0);
    }
}
