use super::{BoundingBox, Point2D};
use crate::algorithms::point_in_poly;
use serde::{Deserialize, Serialize};

/// A polygon with one exterior ring and zero or more holes. Rings are
/// closed, i.e. the last vertex repeats the first.
#[derive(Default, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    pub exterior: Vec<Point2D>,
    pub holes: Vec<Vec<Point2D>>,
}

impl Polygon {
    /// Creates a polygon, closing any ring whose last vertex differs from its first.
    pub fn new(exterior: Vec<Point2D>, holes: Vec<Vec<Point2D>>) -> Polygon {
        Polygon {
            exterior: close_ring(exterior),
            holes: holes.into_iter().map(close_ring).collect(),
        }
    }

    pub fn get_bounding_box(&self) -> BoundingBox {
        BoundingBox::from_points(&self.exterior)
    }

    /// Points lying exactly on a ring may fall either way.
    pub fn contains(&self, p: &Point2D) -> bool {
        if self.exterior.len() < 4 || !self.get_bounding_box().is_point_in_box(p.x, p.y) {
            return false;
        }
        point_in_poly(p, &self.exterior) && !self.holes.iter().any(|h| point_in_poly(p, h))
    }
}

fn close_ring(mut ring: Vec<Point2D>) -> Vec<Point2D> {
    if let (Some(first), Some(last)) = (ring.first().copied(), ring.last().copied()) {
        if first != last {
            ring.push(first);
        }
    }
    ring
}
