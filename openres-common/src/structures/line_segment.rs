/*
This code is part of the OpenRES hydrogeomorphic analysis library.
Authors: OpenRES developers
Created: 02/06/2025
Last Modified: 16/10/2026
License: MIT
*/

use super::{BoundingBox, Point2D};

const EPSILON: f64 = f64::EPSILON;

/// A data structure to hold line segments, defined by
/// starting and ending points.
#[derive(Default, Copy, Clone, Debug, PartialEq)]
pub struct LineSegment {
    pub p1: Point2D,
    pub p2: Point2D,
}

/// The result of intersecting two line segments. Segments can meet at a
/// single point or share a collinear stretch.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum SegmentIntersection {
    Point(Point2D),
    Overlap(LineSegment),
}

impl LineSegment {
    /// Creates a new LineSegment.
    pub fn new(p1: Point2D, p2: Point2D) -> LineSegment {
        LineSegment { p1, p2 }
    }

    pub fn length(&self) -> f64 {
        self.p1.distance(&self.p2)
    }

    pub fn is_degenerate(&self) -> bool {
        self.p1 == self.p2
    }

    /// Finds the intersection between two line segments.
    ///
    /// Based on https://en.wikipedia.org/wiki/Line%E2%80%93line_intersection
    pub fn get_intersection(&self, other: &Self) -> Option<SegmentIntersection> {
        if self.is_degenerate() || other.is_degenerate() {
            return None;
        }
        if !self.get_bounding_box().overlaps(other.get_bounding_box()) {
            return None;
        }
        let denom = (self.p1.x - self.p2.x) * (other.p1.y - other.p2.y)
            - (self.p1.y - self.p2.y) * (other.p1.x - other.p2.x);
        if denom != 0f64 {
            let t = ((self.p1.x - other.p1.x) * (other.p1.y - other.p2.y)
                - (self.p1.y - other.p1.y) * (other.p1.x - other.p2.x))
                / denom;
            let u = -((self.p1.x - self.p2.x) * (self.p1.y - other.p1.y)
                - (self.p1.y - self.p2.y) * (self.p1.x - other.p1.x))
                / denom;
            if (0f64..=1f64).contains(&t) && (0f64..=1f64).contains(&u) {
                return Some(SegmentIntersection::Point(Point2D::new(
                    self.p1.x + t * (self.p2.x - self.p1.x),
                    self.p1.y + t * (self.p2.y - self.p1.y),
                )));
            }
            return None;
        }

        // parallel; only collinear segments can share anything
        if !self.is_point_on_line(other.p1) {
            return None;
        }
        let candidates = [self.p1, other.p1, self.p2, other.p2];
        let inside: Vec<Point2D> = candidates
            .iter()
            .enumerate()
            .filter(|(i, p)| {
                if i % 2 == 0 {
                    p.is_between(&other.p1, &other.p2)
                } else {
                    p.is_between(&self.p1, &self.p2)
                }
            })
            .map(|(_, p)| *p)
            .collect();
        match (inside.first(), inside.last()) {
            (Some(a), Some(b)) if a == b => Some(SegmentIntersection::Point(*a)),
            (Some(a), Some(b)) => Some(SegmentIntersection::Overlap(LineSegment::new(*a, *b))),
            _ => None,
        }
    }

    pub fn get_bounding_box(&self) -> BoundingBox {
        BoundingBox::from_two_points(self.p1, self.p2)
    }

    /// Checks if a point is on the infinite line passing through this segment.
    fn is_point_on_line(&self, p: Point2D) -> bool {
        let r = (self.p2 - self.p1).cross(p - self.p1);
        r.abs() < EPSILON
    }
}

#[cfg(test)]
mod test {
    use super::{LineSegment, SegmentIntersection};
    use crate::structures::Point2D;

    #[test]
    fn test_crossing_segments() {
        let a = LineSegment::new(Point2D::new(0.0, 0.0), Point2D::new(10.0, 10.0));
        let b = LineSegment::new(Point2D::new(0.0, 10.0), Point2D::new(10.0, 0.0));
        assert_eq!(
            a.get_intersection(&b),
            Some(SegmentIntersection::Point(Point2D::new(5.0, 5.0)))
        );
    }

    #[test]
    fn test_touching_at_endpoint() {
        let a = LineSegment::new(Point2D::new(0.0, 0.0), Point2D::new(0.0, 5.0));
        let b = LineSegment::new(Point2D::new(-5.0, 5.0), Point2D::new(5.0, 5.0));
        assert_eq!(
            a.get_intersection(&b),
            Some(SegmentIntersection::Point(Point2D::new(0.0, 5.0)))
        );
    }

    #[test]
    fn test_disjoint_segments() {
        let a = LineSegment::new(Point2D::new(0.0, 0.0), Point2D::new(1.0, 1.0));
        let b = LineSegment::new(Point2D::new(2.0, 0.0), Point2D::new(3.0, -1.0));
        assert_eq!(a.get_intersection(&b), None);
        let parallel = LineSegment::new(Point2D::new(0.0, 1.0), Point2D::new(1.0, 2.0));
        assert_eq!(a.get_intersection(&parallel), None);
    }

    #[test]
    fn test_collinear_overlap() {
        let a = LineSegment::new(Point2D::new(0.0, 0.0), Point2D::new(10.0, 0.0));
        let b = LineSegment::new(Point2D::new(5.0, 0.0), Point2D::new(18.0, 0.0));
        assert_eq!(
            a.get_intersection(&b),
            Some(SegmentIntersection::Overlap(LineSegment::new(
                Point2D::new(5.0, 0.0),
                Point2D::new(10.0, 0.0)
            )))
        );
    }
}
