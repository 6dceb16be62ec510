//! Read-only input layers: the river network, boundary lines and
//! attributed polygons. Line and polygon layers keep an R-tree over their
//! feature bounding boxes for candidate pruning.

use openres_common::algorithms::find_line_intersections;
use openres_common::structures::{
    BoundingBox, FeatureIndex, MultiPolyline, Point2D, Polygon, Polyline,
};
use serde::{Deserialize, Serialize};

/// One reach of the river network. `segment_id` is the join key for every
/// per-segment record downstream.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub segment_id: usize,
    pub geometry: Polyline,
}

impl Segment {
    pub fn new(segment_id: usize, vertices: &[Point2D]) -> Segment {
        Segment {
            segment_id,
            geometry: Polyline::new(vertices, segment_id),
        }
    }
}

/// A layer of (possibly multi-part) line features such as valley edges.
pub struct LineLayer {
    features: Vec<MultiPolyline>,
    index: FeatureIndex,
}

impl LineLayer {
    /// Features are ordered by id; that order decides which of two equally
    /// distant intersections is reported first.
    pub fn new(mut features: Vec<MultiPolyline>) -> LineLayer {
        features.sort_by_key(|f| f.id);
        let index = FeatureIndex::new(
            features
                .iter()
                .enumerate()
                .map(|(i, f)| (i, f.get_bounding_box())),
        );
        LineLayer { features, index }
    }

    pub fn from_polylines(lines: Vec<Polyline>) -> LineLayer {
        LineLayer::new(lines.into_iter().map(MultiPolyline::from).collect())
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn features(&self) -> &[MultiPolyline] {
        &self.features
    }

    /// All point-type intersections between `line` and the layer, feature by
    /// feature and part by part. Near-coincident points are not merged here.
    pub fn intersections_with(&self, line: &Polyline) -> Vec<Point2D> {
        let mut points = vec![];
        for i in self.index.query(&line.get_bounding_box()) {
            for part in self.features[i].parts() {
                points.extend(find_line_intersections(line, part));
            }
        }
        points
    }
}

/// A polygon feature carrying one text attribute (e.g. a geology class).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PolygonFeature {
    pub id: usize,
    pub parts: Vec<Polygon>,
    pub value: String,
}

impl PolygonFeature {
    pub fn get_bounding_box(&self) -> BoundingBox {
        let mut bb = BoundingBox::default();
        for p in &self.parts {
            bb.expand_to(p.get_bounding_box());
        }
        bb
    }

    pub fn contains(&self, p: &Point2D) -> bool {
        self.parts.iter().any(|part| part.contains(p))
    }
}

pub struct PolygonLayer {
    features: Vec<PolygonFeature>,
    index: FeatureIndex,
}

impl PolygonLayer {
    pub fn new(mut features: Vec<PolygonFeature>) -> PolygonLayer {
        features.sort_by_key(|f| f.id);
        let index = FeatureIndex::new(
            features
                .iter()
                .enumerate()
                .map(|(i, f)| (i, f.get_bounding_box())),
        );
        PolygonLayer { features, index }
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Attribute of the lowest-id feature containing the point.
    pub fn value_at(&self, p: &Point2D) -> Option<&str> {
        let query = BoundingBox::from_two_points(*p, *p);
        self.index
            .query(&query)
            .into_iter()
            .map(|i| &self.features[i])
            .find(|f| f.contains(p))
            .map(|f| f.value.as_str())
    }
}

#[cfg(test)]
mod test {
    use super::{LineLayer, PolygonFeature, PolygonLayer};
    use approx::assert_abs_diff_eq;
    use openres_common::structures::{MultiPolyline, Point2D, Polygon, Polyline};

    fn horizontal(id: usize, y: f64) -> Polyline {
        Polyline::new(&[Point2D::new(-10.0, y), Point2D::new(110.0, y)], id)
    }

    fn square(id: usize, min: f64, max: f64, value: &str) -> PolygonFeature {
        PolygonFeature {
            id,
            parts: vec![Polygon::new(
                vec![
                    Point2D::new(min, min),
                    Point2D::new(max, min),
                    Point2D::new(max, max),
                    Point2D::new(min, max),
                ],
                vec![],
            )],
            value: value.to_string(),
        }
    }

    #[test]
    fn test_intersections_with_multipart_feature() {
        let mut two_parts = MultiPolyline::new(4);
        two_parts.push(horizontal(4, 20.0));
        two_parts.push(horizontal(4, 30.0));
        let layer = LineLayer::new(vec![two_parts, MultiPolyline::from(horizontal(1, -20.0))]);
        assert_eq!(layer.len(), 2);
        assert_eq!(layer.features()[0].id, 1);

        let ray = Polyline::new(&[Point2D::new(50.0, 0.0), Point2D::new(50.0, 35.0)], 0);
        let points = layer.intersections_with(&ray);
        assert_eq!(points.len(), 2);
        assert_abs_diff_eq!(points[0].y, 20.0, epsilon = 1e-9);
        assert_abs_diff_eq!(points[1].y, 30.0, epsilon = 1e-9);
        assert_abs_diff_eq!(points[1].x, 50.0, epsilon = 1e-9);

        let short = Polyline::new(&[Point2D::new(50.0, 0.0), Point2D::new(50.0, 5.0)], 0);
        assert!(layer.intersections_with(&short).is_empty());
    }

    #[test]
    fn test_polygon_value_prefers_lowest_id() {
        let layer = PolygonLayer::new(vec![
            square(7, 0.0, 10.0, "shale"),
            square(2, 5.0, 20.0, "granite"),
        ]);
        assert_eq!(layer.value_at(&Point2D::new(1.0, 1.0)), Some("shale"));
        assert_eq!(layer.value_at(&Point2D::new(7.0, 7.0)), Some("granite"));
        assert_eq!(layer.value_at(&Point2D::new(15.0, 15.0)), Some("granite"));
        assert_eq!(layer.value_at(&Point2D::new(50.0, 50.0)), None);
    }
}
