/*
This code is part of the OpenRES hydrogeomorphic analysis library.
Authors: OpenRES developers
Created: 02/06/2025
Last Modified: 16/10/2026
License: MIT
*/

use crate::center_points::{CenterPoint, CenterPoints};
use crate::intersections::IntersectionPoint;
use openres_common::structures::Point2D;
use openres_raster::RasterSampler;
use std::collections::HashMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WidthField {
    Vw,
    Vfw,
}

impl WidthField {
    fn slot(self, cp: &mut CenterPoint) -> &mut Option<f64> {
        match self {
            WidthField::Vw => &mut cp.vw,
            WidthField::Vfw => &mut cp.vfw,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlopeField {
    Lvs,
    Rvs,
}

impl SlopeField {
    fn slot(self, cp: &mut CenterPoint) -> &mut Option<f64> {
        match self {
            SlopeField::Lvs => &mut cp.lvs,
            SlopeField::Rvs => &mut cp.rvs,
        }
    }
}

fn distance_sums(points: &[IntersectionPoint]) -> HashMap<usize, f64> {
    let mut sums = HashMap::new();
    for p in points {
        *sums.entry(p.segment_id).or_insert(0f64) += p.distance;
    }
    sums
}

/// Writes `field = sum(left distances) + sum(right distances)` to every
/// center point. A side with no points contributes 0, so a segment with no
/// points at all gets a width of 0 rather than null.
pub fn aggregate_width(
    mut center_points: CenterPoints,
    left_points: &[IntersectionPoint],
    right_points: &[IntersectionPoint],
    field: WidthField,
) -> CenterPoints {
    let left = distance_sums(left_points);
    let right = distance_sums(right_points);
    for (segment_id, cp) in center_points.iter_mut() {
        let width = left.get(segment_id).copied().unwrap_or(0f64)
            + right.get(segment_id).copied().unwrap_or(0f64);
        *field.slot(cp) = Some(width);
    }
    center_points
}

/// A valley-edge crossing and the valley-floor crossing on the same bank of
/// the same segment, with their sampled elevations.
struct SlopePair {
    vw: Point2D,
    vfw: Point2D,
    vw_elevation: Option<f64>,
    vfw_elevation: Option<f64>,
}

impl SlopePair {
    /// Percent slope between the two points. `None` when either elevation is
    /// unavailable or the points coincide.
    fn slope(&self) -> Option<f64> {
        let rise = (self.vw_elevation? - self.vfw_elevation?).abs();
        let run = self.vw.distance(&self.vfw);
        if run > 0f64 {
            Some(rise / run * 100f64)
        } else {
            None
        }
    }
}

/// Side slope for one bank. VW and VFW points are paired by `segment_id`;
/// segments without a pair, without both elevations, or whose paired points
/// coincide get a null slope.
pub fn aggregate_slope<S: RasterSampler + ?Sized>(
    mut center_points: CenterPoints,
    vw_points: &[IntersectionPoint],
    vfw_points: &[IntersectionPoint],
    dem: &S,
    field: SlopeField,
) -> CenterPoints {
    let vfw_by_id: HashMap<usize, Point2D> = vfw_points
        .iter()
        .map(|p| (p.segment_id, p.location))
        .collect();
    let pairs: HashMap<usize, SlopePair> = vw_points
        .iter()
        .filter_map(|p| {
            let vfw = *vfw_by_id.get(&p.segment_id)?;
            Some((
                p.segment_id,
                SlopePair {
                    vw: p.location,
                    vfw,
                    vw_elevation: dem.sample_at(p.location),
                    vfw_elevation: dem.sample_at(vfw),
                },
            ))
        })
        .collect();

    for (segment_id, cp) in center_points.iter_mut() {
        *field.slot(cp) = pairs.get(segment_id).and_then(|pair| pair.slope());
    }
    center_points
}
