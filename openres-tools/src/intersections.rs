use crate::layers::{LineLayer, Segment};
use crate::side::{classify, Side};
use crate::transects::Transect;
use crate::DISTINCT_TOLERANCE;
use log::debug;
use openres_common::algorithms::dedup_points;
use openres_common::structures::Point2D;
use serde::Serialize;
use std::collections::HashMap;

/// A boundary crossing on a transect, labelled with the river bank it lies
/// on and its distance from the transect's center point.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct IntersectionPoint {
    pub location: Point2D,
    pub segment_id: usize,
    pub distance: f64,
    pub side: Side,
}

/// The nearest and second-nearest crossings on each bank, one entry per
/// transect at most in each list. Transects without a matching flow
/// reference segment are listed in `skipped`.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct SelectedIntersections {
    pub left_first: Vec<IntersectionPoint>,
    pub left_second: Vec<IntersectionPoint>,
    pub right_first: Vec<IntersectionPoint>,
    pub right_second: Vec<IntersectionPoint>,
    pub skipped: Vec<usize>,
}

/// Flow direction of a segment, taken from its first vertex to its midpoint
/// and anchored at the midpoint.
fn flow_direction(segment: &Segment) -> Option<(Point2D, Point2D)> {
    let start = segment.geometry.first_vertex()?;
    let mid = segment.geometry.midpoint()?;
    Some((mid, mid - start))
}

/// Finds where each transect crosses `boundaries` and keeps the two nearest
/// crossings per bank. Banks are decided against the flow direction of the
/// matching segment in `flow_reference`, not the transect's orientation.
pub fn select(
    transects: &[Transect],
    boundaries: &LineLayer,
    flow_reference: &[Segment],
) -> SelectedIntersections {
    let reference: HashMap<usize, &Segment> = flow_reference
        .iter()
        .map(|s| (s.segment_id, s))
        .collect();

    let mut selected = SelectedIntersections::default();
    for transect in transects {
        let segment_id = transect.segment_id;
        let (anchor, direction) = match reference.get(&segment_id).and_then(|s| flow_direction(s)) {
            Some(flow) => flow,
            None => {
                debug!("No flow reference for transect {}; skipped.", segment_id);
                selected.skipped.push(segment_id);
                continue;
            }
        };

        let mut points: Vec<Point2D> = vec![];
        dedup_points(
            &mut points,
            &boundaries.intersections_with(&transect.line),
            DISTINCT_TOLERANCE,
        );

        let mut left: Vec<IntersectionPoint> = vec![];
        let mut right: Vec<IntersectionPoint> = vec![];
        for location in points {
            let distance = transect.center.distance(&location);
            if distance < DISTINCT_TOLERANCE {
                continue;
            }
            let side = classify(anchor, direction, location);
            let point = IntersectionPoint {
                location,
                segment_id,
                distance,
                side,
            };
            match side {
                Side::Left => left.push(point),
                Side::Right => right.push(point),
            }
        }

        // stable, so equal distances keep feature order
        left.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        right.sort_by(|a, b| a.distance.total_cmp(&b.distance));

        let mut left = left.into_iter();
        selected.left_first.extend(left.next());
        selected.left_second.extend(left.next());
        let mut right = right.into_iter();
        selected.right_first.extend(right.next());
        selected.right_second.extend(right.next());
    }
    selected
}

#[cfg(test)]
mod test {
    use super::select;
    use crate::layers::{LineLayer, Segment};
    use crate::side::Side;
    use crate::transects::Transect;
    use approx::assert_abs_diff_eq;
    use openres_common::structures::{Point2D, Polyline};

    fn horizontal(id: usize, y: f64) -> Polyline {
        Polyline::new(&[Point2D::new(-10.0, y), Point2D::new(110.0, y)], id)
    }

    fn vertical_transect(id: usize, half_length: f64) -> Transect {
        let center = Point2D::new(50.0, 0.0);
        Transect {
            segment_id: id,
            center,
            line: Polyline::new(
                &[
                    Point2D::new(50.0, -half_length),
                    center,
                    Point2D::new(50.0, half_length),
                ],
                id,
            ),
            left_count: 2,
            right_count: 2,
        }
    }

    fn eastward(id: usize) -> Segment {
        Segment::new(id, &[Point2D::new(0.0, 0.0), Point2D::new(100.0, 0.0)])
    }

    #[test]
    fn test_nearest_two_per_side() {
        let layer = LineLayer::from_polylines(vec![
            horizontal(0, 60.0),
            horizontal(1, 30.0),
            horizontal(2, 20.0),
            horizontal(3, -20.0),
            horizontal(4, -45.0),
        ]);
        let selected = select(&[vertical_transect(7, 70.0)], &layer, &[eastward(7)]);

        // north of an eastward flow is the left bank
        assert_eq!(selected.left_first.len(), 1);
        assert_eq!(selected.left_first[0].side, Side::Left);
        assert_abs_diff_eq!(selected.left_first[0].distance, 20.0, epsilon = 1e-9);
        assert_abs_diff_eq!(selected.left_second[0].distance, 30.0, epsilon = 1e-9);
        assert_abs_diff_eq!(selected.right_first[0].distance, 20.0, epsilon = 1e-9);
        assert_abs_diff_eq!(selected.right_second[0].location.y, -45.0, epsilon = 1e-9);
        assert_eq!(selected.right_second[0].segment_id, 7);
        assert!(selected.skipped.is_empty());
    }

    #[test]
    fn test_sides_follow_flow_not_transect() {
        let layer = LineLayer::from_polylines(vec![horizontal(0, 20.0), horizontal(1, -20.0)]);
        let westward = Segment::new(3, &[Point2D::new(100.0, 0.0), Point2D::new(0.0, 0.0)]);
        let selected = select(&[vertical_transect(3, 30.0)], &layer, &[westward]);
        assert_abs_diff_eq!(selected.left_first[0].location.y, -20.0, epsilon = 1e-9);
        assert_abs_diff_eq!(selected.right_first[0].location.y, 20.0, epsilon = 1e-9);
        assert!(selected.left_second.is_empty());
        assert!(selected.right_second.is_empty());
    }

    #[test]
    fn test_missing_reference_is_skipped() {
        let layer = LineLayer::from_polylines(vec![horizontal(0, 20.0)]);
        let selected = select(
            &[vertical_transect(1, 30.0), vertical_transect(2, 30.0)],
            &layer,
            &[eastward(2)],
        );
        assert_eq!(selected.skipped, vec![1]);
        assert_eq!(selected.left_first.len(), 1);
        assert_eq!(selected.left_first[0].segment_id, 2);
    }

    #[test]
    fn test_center_and_repeated_crossings_are_dropped() {
        // a line through the center, and two features meeting at one point
        let layer = LineLayer::from_polylines(vec![
            horizontal(0, 0.0),
            Polyline::new(&[Point2D::new(40.0, 10.0), Point2D::new(50.0, 25.0)], 1),
            Polyline::new(&[Point2D::new(50.0, 25.0), Point2D::new(60.0, 10.0)], 2),
            horizontal(3, 28.0),
        ]);
        let selected = select(&[vertical_transect(4, 30.0)], &layer, &[eastward(4)]);
        assert_abs_diff_eq!(selected.left_first[0].distance, 25.0, epsilon = 1e-9);
        assert_abs_diff_eq!(selected.left_second[0].distance, 28.0, epsilon = 1e-9);
        assert!(selected.right_first.is_empty());
    }

    #[test]
    fn test_at_most_two_sorted_entries_per_side() {
        let zigzag = Polyline::new(
            &[
                Point2D::new(40.0, 5.0),
                Point2D::new(60.0, 9.0),
                Point2D::new(40.0, 13.0),
                Point2D::new(60.0, 17.0),
                Point2D::new(40.0, 21.0),
            ],
            0,
        );
        let layer = LineLayer::from_polylines(vec![zigzag]);
        let selected = select(&[vertical_transect(0, 30.0)], &layer, &[eastward(0)]);
        assert_eq!(selected.left_first.len(), 1);
        assert_eq!(selected.left_second.len(), 1);
        assert!(selected.left_first[0].distance <= selected.left_second[0].distance);
        assert_abs_diff_eq!(selected.left_first[0].distance, 7.0, epsilon = 1e-9);
        assert_abs_diff_eq!(selected.left_second[0].distance, 11.0, epsilon = 1e-9);
    }
}
