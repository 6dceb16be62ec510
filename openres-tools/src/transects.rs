/*
This code is part of the OpenRES hydrogeomorphic analysis library.
Authors: OpenRES developers
Created: 02/06/2025
Last Modified: 16/10/2026
License: MIT
*/

use crate::layers::{LineLayer, Segment};
use crate::side::Side;
use crate::DISTINCT_TOLERANCE;
use log::{debug, error, info};
use openres_common::algorithms::dedup_points;
use openres_common::configs::{Configs, TransectSettings};
use openres_common::structures::{normalize_degrees, Point2D, Polyline};
use openres_common::utils::{get_formatted_elapsed_time, Progress};
use openres_common::{Error, Result};
use rayon::prelude::*;
use serde::Serialize;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

/// Distance either side of the midpoint used to estimate flow direction.
const FLOW_DIRECTION_OFFSET: f64 = 500.0;

/// Ray-growth parameters, validated on construction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransectParameters {
    increment: f64,
    max_length: f64,
}

impl TransectParameters {
    pub fn new(increment: f64, max_length: f64) -> Result<TransectParameters> {
        if !increment.is_finite() || increment <= 0f64 {
            error!("The extension increment must be a positive number.");
            return Err(Error::invalid_parameter(
                "extension_increment",
                increment,
                "must be greater than zero",
            ));
        }
        if !max_length.is_finite() || max_length <= increment {
            error!("The maximum transect length must exceed the extension increment.");
            return Err(Error::invalid_parameter(
                "max_length",
                max_length,
                "must be greater than the extension increment",
            ));
        }
        Ok(TransectParameters {
            increment,
            max_length,
        })
    }

    pub fn increment(&self) -> f64 {
        self.increment
    }

    pub fn max_length(&self) -> f64 {
        self.max_length
    }
}

impl TryFrom<&TransectSettings> for TransectParameters {
    type Error = Error;

    fn try_from(settings: &TransectSettings) -> Result<TransectParameters> {
        TransectParameters::new(settings.extension_increment, settings.max_length)
    }
}

/// A cross-section through a segment's center point. The line runs from the
/// end of the left ray, through the center, to the end of the right ray.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Transect {
    pub segment_id: usize,
    pub center: Point2D,
    pub line: Polyline,
    pub left_count: usize,
    pub right_count: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub enum ExclusionReason {
    /// Fewer than two vertices or zero length.
    DegenerateSegment,
    /// The points straddling the midpoint coincide, so there is no bearing.
    UndefinedFlowDirection,
    /// The ray on `side` found fewer than two boundary crossings before
    /// reaching the maximum length.
    BoundaryNotReached { side: Side, found: usize },
}

impl fmt::Display for ExclusionReason {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ExclusionReason::DegenerateSegment => write!(f, "degenerate segment"),
            ExclusionReason::UndefinedFlowDirection => write!(f, "undefined flow direction"),
            ExclusionReason::BoundaryNotReached { side, found } => write!(
                f,
                "{} ray found {} of 2 boundary intersections",
                side, found
            ),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum TransectOutcome {
    Built(Transect),
    Excluded {
        segment_id: usize,
        reason: ExclusionReason,
    },
}

impl TransectOutcome {
    pub fn segment_id(&self) -> usize {
        match self {
            TransectOutcome::Built(t) => t.segment_id,
            TransectOutcome::Excluded { segment_id, .. } => *segment_id,
        }
    }

    pub fn transect(&self) -> Option<&Transect> {
        match self {
            TransectOutcome::Built(t) => Some(t),
            TransectOutcome::Excluded { .. } => None,
        }
    }
}

/// Grows perpendicular rays from segment midpoints until they cross the
/// valley edge lines twice on each side.
///
/// The left ray points along the perpendicular bearing times -1 and the
/// right ray along it times +1. These are ray labels only; the bank of the
/// river a boundary point lies on is decided later against flow direction.
pub struct TransectBuilder<'a> {
    valley_edges: &'a LineLayer,
    params: TransectParameters,
}

impl<'a> TransectBuilder<'a> {
    pub fn new(valley_edges: &'a LineLayer, params: TransectParameters) -> TransectBuilder<'a> {
        TransectBuilder {
            valley_edges,
            params,
        }
    }

    pub fn build(&self, segment: &Segment) -> TransectOutcome {
        let segment_id = segment.segment_id;
        let excluded = |reason| TransectOutcome::Excluded { segment_id, reason };

        let line = &segment.geometry;
        let length = line.length();
        if line.len() < 2 || length.is_nan() || length <= 0f64 {
            return excluded(ExclusionReason::DegenerateSegment);
        }
        let half = length / 2f64;
        let (center, before, after) = match (
            line.point_at_distance(half),
            line.point_at_distance(half - flow_offset(half)),
            line.point_at_distance(half + flow_offset(half)),
        ) {
            (Some(c), Some(b), Some(a)) => (c, b, a),
            _ => return excluded(ExclusionReason::DegenerateSegment),
        };
        if before == after {
            return excluded(ExclusionReason::UndefinedFlowDirection);
        }

        let angle = normalize_degrees(before.bearing_to(&after) + 90f64).to_radians();
        let unit = Point2D::new(angle.cos(), angle.sin());

        let (left_end, left_points) = self.grow_ray(center, unit.scale(-1f64));
        if left_points.len() < 2 {
            return excluded(ExclusionReason::BoundaryNotReached {
                side: Side::Left,
                found: left_points.len(),
            });
        }
        let (right_end, right_points) = self.grow_ray(center, unit);
        if right_points.len() < 2 {
            return excluded(ExclusionReason::BoundaryNotReached {
                side: Side::Right,
                found: right_points.len(),
            });
        }

        TransectOutcome::Built(Transect {
            segment_id,
            center,
            line: Polyline::new(&[left_end, center, right_end], segment_id),
            left_count: left_points.len(),
            right_count: right_points.len(),
        })
    }

    /// Re-casts the whole ray at each step rather than extending the last
    /// one, collecting distinct crossings until two are found or the ray
    /// reaches the maximum length.
    fn grow_ray(&self, origin: Point2D, unit: Point2D) -> (Point2D, Vec<Point2D>) {
        let mut points: Vec<Point2D> = vec![];
        let mut length = 0f64;
        let mut end = origin;
        while points.len() < 2 && length < self.params.max_length {
            length += self.params.increment;
            end = origin + unit.scale(length);
            let ray = Polyline::new(&[origin, end], 0);
            dedup_points(
                &mut points,
                &self.valley_edges.intersections_with(&ray),
                DISTINCT_TOLERANCE,
            );
        }
        (end, points)
    }

    /// Builds transects for every segment on a worker pool sized by
    /// `configs.max_procs`. Outcomes come back in input order. When `cancel`
    /// is raised no further segment is started and the call returns
    /// `Error::Cancelled`.
    pub fn build_all(
        &self,
        segments: &[Segment],
        configs: &Configs,
        cancel: Option<&AtomicBool>,
    ) -> Result<Vec<TransectOutcome>> {
        let start = Instant::now();
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(configs.num_procs())
            .build()
            .map_err(|e| Error::ThreadPool(e.to_string()))?;
        let progress = Progress::new("Generating transects", segments.len(), configs.verbose_mode);

        let outcomes = pool.install(|| {
            segments
                .par_iter()
                .map(|segment| {
                    if cancel.map_or(false, |c| c.load(Ordering::SeqCst)) {
                        return Err(Error::Cancelled);
                    }
                    let outcome = self.build(segment);
                    if let TransectOutcome::Excluded { segment_id, reason } = &outcome {
                        debug!("Segment {} excluded: {}", segment_id, reason);
                    }
                    progress.increment();
                    Ok(outcome)
                })
                .collect::<Result<Vec<TransectOutcome>>>()
        })?;

        if configs.verbose_mode {
            let built = outcomes.iter().filter(|o| o.transect().is_some()).count();
            info!(
                "Built {} of {} transects (elapsed time: {})",
                built,
                segments.len(),
                get_formatted_elapsed_time(start)
            );
        }
        Ok(outcomes)
    }
}

/// Offset used to straddle the midpoint, kept inside very short segments.
fn flow_offset(half: f64) -> f64 {
    let offset = FLOW_DIRECTION_OFFSET.min(half - 1f64);
    if offset > 0f64 {
        offset
    } else {
        half
    }
}
