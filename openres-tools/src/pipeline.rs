/*
This code is part of the OpenRES hydrogeomorphic analysis library.
Authors: OpenRES developers
Created: 02/06/2025
Last Modified: 16/10/2026
License: MIT
*/

use crate::center_points::{CenterPoint, CenterPoints};
use crate::dvs_sin::compute_dvs_sin;
use crate::intersections::{select, IntersectionPoint};
use crate::layers::{LineLayer, PolygonLayer, Segment};
use crate::metrics::{aggregate_slope, aggregate_width, SlopeField, WidthField};
use crate::point_data::extract_point_data;
use crate::sink::FeatureSink;
use crate::transects::{
    ExclusionReason, Transect, TransectBuilder, TransectOutcome, TransectParameters,
};
use log::{debug, info};
use openres_common::configs::Configs;
use openres_common::utils::get_formatted_elapsed_time;
use openres_common::{Error, Result};
use openres_raster::RasterSampler;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Instant;

/// The processing stages, in the only order they may run. Each stage owns
/// the center-point fields it writes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    GenerateTransects,
    ExtractPointData,
    ExtractWidths,
    ExtractSideSlopes,
    ExtractDvsSin,
}

impl Stage {
    pub const ORDER: [Stage; 5] = [
        Stage::GenerateTransects,
        Stage::ExtractPointData,
        Stage::ExtractWidths,
        Stage::ExtractSideSlopes,
        Stage::ExtractDvsSin,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Stage::GenerateTransects => "generate transects",
            Stage::ExtractPointData => "extract point data",
            Stage::ExtractWidths => "extract VW and VFW",
            Stage::ExtractSideSlopes => "extract side slopes",
            Stage::ExtractDvsSin => "extract DVS and SIN",
        }
    }
}

/// Where the valley boundaries come from.
pub enum ValleyBoundaries<'a> {
    /// One layer holding both boundaries: on each bank the nearest crossing
    /// is the valley-floor edge and the second nearest the valley edge.
    Nested(&'a LineLayer),
    /// Separate layers; the nearest crossing per bank is taken from each.
    Separate {
        valley_edges: &'a LineLayer,
        valley_floor_edges: &'a LineLayer,
    },
}

impl<'a> ValleyBoundaries<'a> {
    /// The layer transect rays are grown against.
    pub fn valley_edges(&self) -> &'a LineLayer {
        match self {
            ValleyBoundaries::Nested(layer) => *layer,
            ValleyBoundaries::Separate { valley_edges, .. } => *valley_edges,
        }
    }
}

pub struct PointDataInputs<'a> {
    pub elevation: &'a dyn RasterSampler,
    pub precipitation: &'a dyn RasterSampler,
    pub geology: &'a PolygonLayer,
}

pub struct PipelineInputs<'a> {
    pub segments: &'a [Segment],
    pub boundaries: ValleyBoundaries<'a>,
    /// Elevation used for side slopes and DVS.
    pub dem: &'a dyn RasterSampler,
    /// The point-data stage is skipped when this is `None`.
    pub point_data: Option<PointDataInputs<'a>>,
}

/// The selected boundary crossings behind VW and VFW, per bank.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ReferencePoints {
    pub left_vw: Vec<IntersectionPoint>,
    pub right_vw: Vec<IntersectionPoint>,
    pub left_vfw: Vec<IntersectionPoint>,
    pub right_vfw: Vec<IntersectionPoint>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct PipelineOutput {
    pub center_points: CenterPoints,
    pub transects: Vec<Transect>,
    pub reference_points: ReferencePoints,
    /// Segments that produced no transect.
    pub excluded: Vec<(usize, ExclusionReason)>,
    /// Transects without a matching flow reference segment.
    pub skipped: Vec<usize>,
}

impl PipelineOutput {
    /// Writes the center points, in `segment_id` order, to `sink`.
    pub fn write_center_points<K: FeatureSink<CenterPoint>>(&self, sink: &mut K) {
        sink.add_features(self.center_points.values().cloned());
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Runs every stage over a river network.
pub struct Pipeline {
    configs: Configs,
    params: TransectParameters,
    cancel: Option<Arc<AtomicBool>>,
}

impl Pipeline {
    /// Fails before any processing when the transect settings are invalid.
    pub fn new(configs: Configs) -> Result<Pipeline> {
        let params = TransectParameters::try_from(&configs.transects)?;
        Ok(Pipeline {
            configs,
            params,
            cancel: None,
        })
    }

    /// Once `flag` is raised no new segment or stage is started.
    pub fn with_cancellation(mut self, flag: Arc<AtomicBool>) -> Pipeline {
        self.cancel = Some(flag);
        self
    }

    fn check_cancelled(&self) -> Result<()> {
        match &self.cancel {
            Some(flag) if flag.load(Ordering::SeqCst) => Err(Error::Cancelled),
            _ => Ok(()),
        }
    }

    /// Fails before any stage runs when two segments share a `segment_id`.
    pub fn run(&self, inputs: &PipelineInputs) -> Result<PipelineOutput> {
        let start = Instant::now();
        check_unique_ids(inputs.segments)?;
        let mut output = PipelineOutput::default();
        for stage in Stage::ORDER {
            self.check_cancelled()?;
            if self.configs.verbose_mode {
                info!("Running stage: {}", stage.name());
            }
            let center_points = std::mem::take(&mut output.center_points);
            output.center_points = match stage {
                Stage::GenerateTransects => self.generate_transects(inputs, &mut output)?,
                Stage::ExtractPointData => match &inputs.point_data {
                    Some(pd) => extract_point_data(
                        center_points,
                        pd.elevation,
                        pd.precipitation,
                        pd.geology,
                    ),
                    None => {
                        debug!("No point data inputs; ELE, PRE and GEO are left empty.");
                        center_points
                    }
                },
                Stage::ExtractWidths => extract_widths(center_points, inputs, &mut output),
                Stage::ExtractSideSlopes => {
                    let refs = &output.reference_points;
                    let center_points = aggregate_slope(
                        center_points,
                        &refs.left_vw,
                        &refs.left_vfw,
                        inputs.dem,
                        SlopeField::Lvs,
                    );
                    aggregate_slope(
                        center_points,
                        &refs.right_vw,
                        &refs.right_vfw,
                        inputs.dem,
                        SlopeField::Rvs,
                    )
                }
                Stage::ExtractDvsSin => {
                    compute_dvs_sin(center_points, inputs.segments, inputs.dem)
                }
            };
        }
        if self.configs.verbose_mode {
            info!(
                "{} center points, {} segments excluded (elapsed time: {})",
                output.center_points.len(),
                output.excluded.len(),
                get_formatted_elapsed_time(start)
            );
        }
        Ok(output)
    }

    fn generate_transects(
        &self,
        inputs: &PipelineInputs,
        output: &mut PipelineOutput,
    ) -> Result<CenterPoints> {
        let builder = TransectBuilder::new(inputs.boundaries.valley_edges(), self.params);
        let outcomes =
            builder.build_all(inputs.segments, &self.configs, self.cancel.as_deref())?;
        let mut center_points = CenterPoints::new();
        for outcome in outcomes {
            match outcome {
                TransectOutcome::Built(t) => {
                    center_points.insert(t.segment_id, CenterPoint::new(t.segment_id, t.center));
                    output.transects.push(t);
                }
                TransectOutcome::Excluded { segment_id, reason } => {
                    output.excluded.push((segment_id, reason));
                }
            }
        }
        Ok(center_points)
    }
}

fn check_unique_ids(segments: &[Segment]) -> Result<()> {
    let mut seen = BTreeSet::new();
    for segment in segments {
        if !seen.insert(segment.segment_id) {
            return Err(Error::InvalidParameter {
                name: "segment_id",
                value: segment.segment_id.to_string(),
                reason: "segment ids must be unique".to_string(),
            });
        }
    }
    Ok(())
}

fn extract_widths(
    center_points: CenterPoints,
    inputs: &PipelineInputs,
    output: &mut PipelineOutput,
) -> CenterPoints {
    let refs = match inputs.boundaries {
        ValleyBoundaries::Nested(layer) => {
            let s = select(&output.transects, layer, inputs.segments);
            output.skipped = s.skipped;
            ReferencePoints {
                left_vw: s.left_second,
                right_vw: s.right_second,
                left_vfw: s.left_first,
                right_vfw: s.right_first,
            }
        }
        ValleyBoundaries::Separate {
            valley_edges,
            valley_floor_edges,
        } => {
            let edges = select(&output.transects, valley_edges, inputs.segments);
            let floors = select(&output.transects, valley_floor_edges, inputs.segments);
            // both selections skip the same transects
            output.skipped = edges.skipped;
            ReferencePoints {
                left_vw: edges.left_first,
                right_vw: edges.right_first,
                left_vfw: floors.left_first,
                right_vfw: floors.right_first,
            }
        }
    };
    let center_points = aggregate_width(
        center_points,
        &refs.left_vfw,
        &refs.right_vfw,
        WidthField::Vfw,
    );
    let center_points =
        aggregate_width(center_points, &refs.left_vw, &refs.right_vw, WidthField::Vw);
    output.reference_points = refs;
    center_points
}
