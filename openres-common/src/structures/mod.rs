// private sub-module defined in other files
mod bounding_box;
mod feature_index;
mod line_segment;
mod point2d;
mod polygon;
mod polyline;

// exports identifiers from private sub-modules in the current module namespace
pub use self::bounding_box::BoundingBox;
pub use self::feature_index::FeatureIndex;
pub use self::line_segment::{LineSegment, SegmentIntersection};
pub use self::point2d::{normalize_degrees, Point2D};
pub use self::polygon::Polygon;
pub use self::polyline::{MultiPolyline, Polyline};
