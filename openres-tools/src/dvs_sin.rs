use crate::center_points::CenterPoints;
use crate::layers::Segment;
use openres_raster::RasterSampler;
use std::collections::HashMap;

/// Downstream vertical slope, in percent: the elevation drop from the
/// segment's first vertex to its last over its length.
pub fn downstream_vertical_slope<S: RasterSampler + ?Sized>(
    segment: &Segment,
    dem: &S,
) -> Option<f64> {
    let line = &segment.geometry;
    let length = line.length();
    if line.len() < 2 || length <= 0f64 {
        return None;
    }
    let start = dem.sample_at(line.first_vertex()?)?;
    let end = dem.sample_at(line.last_vertex()?)?;
    Some((start - end) / length * 100f64)
}

/// Channel length over the straight-line distance between the end
/// vertices. Closed loops have no sinuosity.
pub fn sinuosity(segment: &Segment) -> Option<f64> {
    let line = &segment.geometry;
    if line.len() < 2 {
        return None;
    }
    let straight = line.first_vertex()?.distance(&line.last_vertex()?);
    if straight > 0f64 {
        Some(line.length() / straight)
    } else {
        None
    }
}

/// Attaches DVS and SIN to every center point with a matching segment.
pub fn compute_dvs_sin<S: RasterSampler + ?Sized>(
    mut center_points: CenterPoints,
    segments: &[Segment],
    dem: &S,
) -> CenterPoints {
    let by_id: HashMap<usize, &Segment> = segments.iter().map(|s| (s.segment_id, s)).collect();
    for (segment_id, cp) in center_points.iter_mut() {
        if let Some(segment) = by_id.get(segment_id) {
            cp.dvs = downstream_vertical_slope(segment, dem);
            cp.sin = sinuosity(segment);
        }
    }
    center_points
}
