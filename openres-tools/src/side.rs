use openres_common::structures::Point2D;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Side::Left => write!(f, "left"),
            Side::Right => write!(f, "right"),
        }
    }
}

/// Which side of the directed line through `origin` along `direction` the
/// point falls on. Points exactly on the line are assigned to the right.
pub fn classify(origin: Point2D, direction: Point2D, point: Point2D) -> Side {
    if direction.cross(point - origin) > 0f64 {
        Side::Left
    } else {
        Side::Right
    }
}
