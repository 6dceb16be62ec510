use crate::structures::Point2D;

/// Tests if a point is Left|On|Right of an infinite line,
/// based on http://geomalgorithms.com/a03-_inclusion.html.
///
/// Return: > 0 for p2 left of the line through p0 and p1
///         = 0 for p2 on the line through p0 and p1
///         < 0 for p2 right of the line through p0 and p1
fn is_left(p0: &Point2D, p1: &Point2D, p2: &Point2D) -> f64 {
    (p1.x - p0.x) * (p2.y - p0.y) - (p2.x - p0.x) * (p1.y - p0.y)
}

/// Tests whether a point is within a closed ring using the winding number.
/// Points on the edge of the ring may fall either way. A ring that is not
/// closed contains nothing.
pub fn point_in_poly(p: &Point2D, poly: &[Point2D]) -> bool {
    winding_number(p, poly) % 2 != 0i32
}

/// Winding number of a closed ring (poly[n] == poly[0]) around a point.
/// Returns 0 for rings that are too short or not closed.
pub fn winding_number(p: &Point2D, poly: &[Point2D]) -> i32 {
    if poly.len() < 4 || poly[0] != poly[poly.len() - 1] {
        return 0i32;
    }
    let mut wn = 0i32;
    for edge in poly.windows(2) {
        if edge[0].y <= p.y {
            // an upward crossing with p left of edge
            if edge[1].y > p.y && is_left(&edge[0], &edge[1], p) > 0f64 {
                wn += 1i32;
            }
        } else if edge[1].y <= p.y && is_left(&edge[0], &edge[1], p) < 0f64 {
            // a downward crossing with p right of edge
            wn -= 1i32;
        }
    }
    wn
}
