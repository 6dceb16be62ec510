/*
This code is part of the OpenRES hydrogeomorphic analysis library.
Authors: OpenRES developers
Created: 02/06/2025
Last Modified: 16/10/2026
License: MIT
*/

//! Hydrogeomorphic metrics for river networks.
//!
//! A transect is grown perpendicular to flow at the midpoint of every river
//! segment until it meets the valley boundary on both sides. The boundary
//! intersections then give valley width (VW), valley-floor width (VFW) and
//! the side slopes (LVS, RVS). Downstream vertical slope (DVS), sinuosity
//! (SIN) and the ELE/PRE/GEO point data are sampled directly.

pub mod center_points;
pub mod dvs_sin;
pub mod intersections;
pub mod layers;
pub mod metrics;
pub mod pipeline;
pub mod point_data;
pub mod side;
pub mod sink;
pub mod transects;

pub use center_points::{CenterPoint, CenterPoints};
pub use intersections::{IntersectionPoint, SelectedIntersections};
pub use layers::{LineLayer, PolygonFeature, PolygonLayer, Segment};
pub use pipeline::{
    Pipeline, PipelineInputs, PipelineOutput, PointDataInputs, ReferencePoints, Stage,
    ValleyBoundaries,
};
pub use side::Side;
pub use sink::FeatureSink;
pub use transects::{
    ExclusionReason, Transect, TransectBuilder, TransectOutcome, TransectParameters,
};

/// Two intersection points closer than this are the same point.
pub const DISTINCT_TOLERANCE: f64 = 1e-8;
