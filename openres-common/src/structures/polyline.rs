/*
This code is part of the OpenRES hydrogeomorphic analysis library.
Authors: OpenRES developers
Created: 02/06/2025
Last Modified: 16/10/2026
License: MIT
*/

use super::{BoundingBox, LineSegment, Point2D};
use serde::{Deserialize, Serialize};
use std::ops::Index;

/// A storage container for the parts of a multi-part line feature.
#[derive(Default, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MultiPolyline {
    parts: Vec<Polyline>,
    pub id: usize,
    bounding_box: BoundingBox,
}

impl Index<usize> for MultiPolyline {
    type Output = Polyline;

    fn index(&self, index: usize) -> &Polyline {
        &self.parts[index]
    }
}

impl MultiPolyline {
    /// Creates a new MultiPolyline
    pub fn new(id: usize) -> MultiPolyline {
        MultiPolyline {
            parts: vec![],
            bounding_box: BoundingBox::default(),
            id,
        }
    }

    pub fn from_parts(id: usize, parts: Vec<Polyline>) -> MultiPolyline {
        let mut ret = MultiPolyline::new(id);
        for part in parts {
            ret.push(part);
        }
        ret
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    pub fn push(&mut self, polyline: Polyline) {
        self.bounding_box.expand_to(polyline.get_bounding_box());
        self.parts.push(polyline);
    }

    pub fn parts(&self) -> &[Polyline] {
        &self.parts
    }

    pub fn get_bounding_box(&self) -> BoundingBox {
        self.bounding_box
    }
}

impl From<Polyline> for MultiPolyline {
    fn from(polyline: Polyline) -> MultiPolyline {
        let id = polyline.id;
        MultiPolyline::from_parts(id, vec![polyline])
    }
}

/// An ordered sequence of vertices.
#[derive(Default, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    pub vertices: Vec<Point2D>,
    pub id: usize,
}

impl Index<usize> for Polyline {
    type Output = Point2D;

    fn index(&self, index: usize) -> &Point2D {
        &self.vertices[index]
    }
}

impl Polyline {
    /// Creates a new Polyline from vertices
    pub fn new(vertices: &[Point2D], id: usize) -> Polyline {
        Polyline {
            vertices: vertices.to_vec(),
            id,
        }
    }

    /// Creates a new empty Polyline
    pub fn new_empty(id: usize) -> Polyline {
        Polyline {
            vertices: vec![],
            id,
        }
    }

    /// returns the number of vertices
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Returns the feature geometric length.
    pub fn length(&self) -> f64 {
        self.vertices
            .windows(2)
            .map(|w| w[0].distance(&w[1]))
            .sum()
    }

    pub fn first_vertex(&self) -> Option<Point2D> {
        self.vertices.first().copied()
    }

    pub fn last_vertex(&self) -> Option<Point2D> {
        self.vertices.last().copied()
    }

    /// Inserts a point vertex at the end of the line.
    pub fn push(&mut self, v: Point2D) {
        self.vertices.push(v);
    }

    /// Iterates over the straight segments joining consecutive vertices.
    pub fn segments(&self) -> impl Iterator<Item = LineSegment> + '_ {
        self.vertices
            .windows(2)
            .map(|w| LineSegment::new(w[0], w[1]))
    }

    /// Returns the point located `distance` units along the line from its first
    /// vertex. Distances beyond either end are clamped to that end; an empty line
    /// yields `None`.
    pub fn point_at_distance(&self, distance: f64) -> Option<Point2D> {
        let first = self.first_vertex()?;
        if distance <= 0f64 {
            return Some(first);
        }
        let mut travelled = 0f64;
        for seg in self.segments() {
            let seg_len = seg.length();
            if seg_len > 0f64 && travelled + seg_len >= distance {
                let t = (distance - travelled) / seg_len;
                return Some(Point2D::new(
                    seg.p1.x + t * (seg.p2.x - seg.p1.x),
                    seg.p1.y + t * (seg.p2.y - seg.p1.y),
                ));
            }
            travelled += seg_len;
        }
        self.last_vertex()
    }

    /// The point at half the line's arc length.
    pub fn midpoint(&self) -> Option<Point2D> {
        self.point_at_distance(self.length() / 2f64)
    }

    pub fn get_bounding_box(&self) -> BoundingBox {
        BoundingBox::from_points(&self.vertices)
    }
}
