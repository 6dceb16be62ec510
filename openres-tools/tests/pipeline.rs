use approx::assert_abs_diff_eq;
use openres_common::configs::Configs;
use openres_common::structures::{Point2D, Polygon, Polyline};
use openres_common::Error;
use openres_tools::{
    CenterPoint, ExclusionReason, LineLayer, Pipeline, PipelineInputs, PointDataInputs,
    PolygonFeature, PolygonLayer, Segment, Side, ValleyBoundaries,
};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn configs() -> Configs {
    let mut configs = Configs::new();
    configs.verbose_mode = false;
    configs.max_procs = 2;
    configs.transects.extension_increment = 7.0;
    configs.transects.max_length = 100.0;
    configs
}

fn lines_at(ys: &[f64]) -> LineLayer {
    LineLayer::from_polylines(
        ys.iter()
            .enumerate()
            .map(|(i, y)| Polyline::new(&[Point2D::new(-10.0, *y), Point2D::new(110.0, *y)], i))
            .collect(),
    )
}

fn eastward(id: usize, y: f64) -> Segment {
    Segment::new(id, &[Point2D::new(0.0, y), Point2D::new(100.0, y)])
}

fn flat(_: Point2D) -> Option<f64> {
    Some(0.0)
}

#[test]
fn valley_edges_twenty_units_away_give_width_forty() {
    init();
    let edges = lines_at(&[20.0, 30.0, -20.0, -30.0]);
    let floors = lines_at(&[10.0, -10.0]);
    let segments = vec![eastward(1, 0.0)];
    let inputs = PipelineInputs {
        segments: &segments,
        boundaries: ValleyBoundaries::Separate {
            valley_edges: &edges,
            valley_floor_edges: &floors,
        },
        dem: &flat,
        point_data: None,
    };
    let output = Pipeline::new(configs()).unwrap().run(&inputs).unwrap();

    let cp = &output.center_points[&1];
    assert_eq!(cp.location, Point2D::new(50.0, 0.0));
    assert_abs_diff_eq!(cp.vw.unwrap(), 40.0, epsilon = 1e-6);
    assert_abs_diff_eq!(cp.vfw.unwrap(), 20.0, epsilon = 1e-6);
    assert_eq!(cp.lvs, Some(0.0));
    assert!(cp.ele.is_none() && cp.geo.is_none());
    assert_eq!(output.transects.len(), 1);
    assert_eq!(output.reference_points.left_vw.len(), 1);
    assert_eq!(output.reference_points.left_vw[0].side, Side::Left);
    assert_abs_diff_eq!(output.reference_points.left_vw[0].location.y, 20.0, epsilon = 1e-6);
}

#[test]
fn unreachable_right_edge_excludes_segment() {
    init();
    let edges = lines_at(&[-20.0, -30.0, 150.0, 160.0]);
    let segments = vec![eastward(2, 0.0)];
    let inputs = PipelineInputs {
        segments: &segments,
        boundaries: ValleyBoundaries::Nested(&edges),
        dem: &flat,
        point_data: None,
    };
    let output = Pipeline::new(configs()).unwrap().run(&inputs).unwrap();

    assert!(output.center_points.is_empty());
    assert!(output.transects.is_empty());
    assert_eq!(
        output.excluded,
        vec![(
            2,
            ExclusionReason::BoundaryNotReached {
                side: Side::Right,
                found: 0
            }
        )]
    );
}

#[test]
fn side_slope_from_boundary_elevations() {
    init();
    let nested = lines_at(&[20.0, 60.0, -20.0, -60.0]);
    let segments = vec![eastward(3, 0.0)];
    let dem = |p: Point2D| if p.y.abs() > 40.0 { Some(100.0) } else { Some(80.0) };
    let inputs = PipelineInputs {
        segments: &segments,
        boundaries: ValleyBoundaries::Nested(&nested),
        dem: &dem,
        point_data: None,
    };
    let output = Pipeline::new(configs()).unwrap().run(&inputs).unwrap();

    let cp = &output.center_points[&3];
    assert_abs_diff_eq!(cp.lvs.unwrap(), 50.0, epsilon = 1e-6);
    assert_abs_diff_eq!(cp.rvs.unwrap(), 50.0, epsilon = 1e-6);
    assert_abs_diff_eq!(cp.vfw.unwrap(), 40.0, epsilon = 1e-6);
    assert_abs_diff_eq!(cp.vw.unwrap(), 120.0, epsilon = 1e-6);
    assert_eq!(cp.dvs, Some(0.0));
}

#[test]
fn full_run_over_a_tilted_valley() {
    init();
    let nested = lines_at(&[20.0, 50.0, -20.0, -50.0]);
    // segment 11 lies far outside the valley
    let segments = vec![eastward(10, 0.0), eastward(11, 500.0)];
    let dem = |p: Point2D| Some(200.0 - 0.1 * p.x + p.y.abs());
    let rain = |_: Point2D| Some(900.0);
    let geology = PolygonLayer::new(vec![PolygonFeature {
        id: 0,
        parts: vec![Polygon::new(
            vec![
                Point2D::new(0.0, -10.0),
                Point2D::new(100.0, -10.0),
                Point2D::new(100.0, 10.0),
                Point2D::new(0.0, 10.0),
            ],
            vec![],
        )],
        value: "till".to_string(),
    }]);
    let inputs = PipelineInputs {
        segments: &segments,
        boundaries: ValleyBoundaries::Nested(&nested),
        dem: &dem,
        point_data: Some(PointDataInputs {
            elevation: &dem,
            precipitation: &rain,
            geology: &geology,
        }),
    };
    let output = Pipeline::new(configs()).unwrap().run(&inputs).unwrap();

    assert_eq!(output.center_points.len(), 1);
    assert_eq!(output.excluded.len(), 1);
    assert_eq!(output.excluded[0].0, 11);
    assert!(output.skipped.is_empty());

    let cp = &output.center_points[&10];
    assert_abs_diff_eq!(cp.vfw.unwrap(), 40.0, epsilon = 1e-6);
    assert_abs_diff_eq!(cp.vw.unwrap(), 100.0, epsilon = 1e-6);
    assert_abs_diff_eq!(cp.lvs.unwrap(), 100.0, epsilon = 1e-6);
    assert_abs_diff_eq!(cp.rvs.unwrap(), 100.0, epsilon = 1e-6);
    assert_abs_diff_eq!(cp.dvs.unwrap(), 10.0, epsilon = 1e-9);
    assert_eq!(cp.sin, Some(1.0));
    assert_abs_diff_eq!(cp.ele.unwrap(), 195.0, epsilon = 1e-9);
    assert_eq!(cp.pre, Some(900.0));
    assert_eq!(cp.geo.as_deref(), Some("till"));

    let mut sink: Vec<CenterPoint> = vec![];
    output.write_center_points(&mut sink);
    assert_eq!(sink.len(), 1);
    assert_eq!(sink[0].segment_id, 10);

    let json = output.to_json().unwrap();
    assert!(json.contains("\"vw\""));
    assert!(json.contains("BoundaryNotReached"));
}

#[test]
fn cancelled_run_stops_before_processing() {
    init();
    let edges = lines_at(&[20.0, 30.0, -20.0, -30.0]);
    let segments = vec![eastward(1, 0.0)];
    let inputs = PipelineInputs {
        segments: &segments,
        boundaries: ValleyBoundaries::Nested(&edges),
        dem: &flat,
        point_data: None,
    };
    let flag = Arc::new(AtomicBool::new(true));
    let pipeline = Pipeline::new(configs()).unwrap().with_cancellation(flag);
    assert!(matches!(pipeline.run(&inputs), Err(Error::Cancelled)));
}

#[test]
fn repeated_segment_ids_stop_the_run() {
    init();
    let edges = lines_at(&[20.0, -20.0]);
    let segments = vec![eastward(3, 0.0), eastward(3, 5.0)];
    let inputs = PipelineInputs {
        segments: &segments,
        boundaries: ValleyBoundaries::Nested(&edges),
        dem: &flat,
        point_data: None,
    };
    assert!(matches!(
        Pipeline::new(configs()).unwrap().run(&inputs),
        Err(Error::InvalidParameter { name: "segment_id", .. })
    ));
}
