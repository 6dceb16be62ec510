use openres_common::structures::Point2D;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The per-segment record that every stage writes into. Each attribute is
/// owned by exactly one stage; `None` means the stage has not run or the
/// value is null for this segment.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CenterPoint {
    pub segment_id: usize,
    pub location: Point2D,
    /// Valley width.
    pub vw: Option<f64>,
    /// Valley-floor width.
    pub vfw: Option<f64>,
    /// Left valley side slope, in percent.
    pub lvs: Option<f64>,
    /// Right valley side slope, in percent.
    pub rvs: Option<f64>,
    /// Downstream vertical slope, in percent.
    pub dvs: Option<f64>,
    /// Sinuosity.
    pub sin: Option<f64>,
    pub ele: Option<f64>,
    pub pre: Option<f64>,
    pub geo: Option<String>,
}

impl CenterPoint {
    pub fn new(segment_id: usize, location: Point2D) -> CenterPoint {
        CenterPoint {
            segment_id,
            location,
            ..Default::default()
        }
    }
}

/// Center points keyed by `segment_id`. Stages merge by key, never by
/// position.
pub type CenterPoints = BTreeMap<usize, CenterPoint>;

#[cfg(test)]
mod test {
    use super::{CenterPoint, CenterPoints};
    use openres_common::structures::Point2D;

    #[test]
    fn test_new_center_point_has_no_metrics() {
        let cp = CenterPoint::new(3, Point2D::new(1.0, 2.0));
        assert_eq!(cp.segment_id, 3);
        assert!(cp.vw.is_none() && cp.lvs.is_none() && cp.geo.is_none());
    }

    #[test]
    fn test_serializes_nulls() {
        let mut points = CenterPoints::new();
        points.insert(3, CenterPoint::new(3, Point2D::new(1.0, 2.0)));
        let json = serde_json::to_value(&points[&3]).unwrap();
        assert_eq!(json["segment_id"], 3);
        assert!(json["sin"].is_null());
    }
}
