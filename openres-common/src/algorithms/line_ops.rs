/*
This code is part of the OpenRES hydrogeomorphic analysis library.
Authors: OpenRES developers
Created: 02/06/2025
Last Modified: 16/10/2026
License: MIT
*/

use crate::structures::{Point2D, Polyline, SegmentIntersection};

/// Finds the points where two polylines cross or touch. Collinear overlaps
/// are not point-type results and are skipped. A crossing that falls on a
/// shared vertex of consecutive segments is reported once.
pub fn find_line_intersections(line1: &Polyline, line2: &Polyline) -> Vec<Point2D> {
    let mut ret: Vec<Point2D> = vec![];
    if line1.len() < 2 || line2.len() < 2 {
        return ret;
    }
    if !line1.get_bounding_box().overlaps(line2.get_bounding_box()) {
        return ret;
    }
    for ls1 in line1.segments() {
        for ls2 in line2.segments() {
            if let Some(SegmentIntersection::Point(p)) = ls1.get_intersection(&ls2) {
                if !ret.contains(&p) {
                    ret.push(p);
                }
            }
        }
    }
    ret
}

/// Appends each point of `candidates` to `points` unless it lies within
/// `tolerance` of a point already present. Returns the number appended.
pub fn dedup_points(points: &mut Vec<Point2D>, candidates: &[Point2D], tolerance: f64) -> usize {
    let mut added = 0;
    for p in candidates {
        if points.iter().all(|existing| existing.distance(p) > tolerance) {
            points.push(*p);
            added += 1;
        }
    }
    added
}
