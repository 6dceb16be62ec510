/*
This code is part of the OpenRES hydrogeomorphic analysis library.
Authors: OpenRES developers
Created: 02/06/2025
Last Modified: 16/10/2026
License: MIT
*/
// private sub-module defined in other files
mod line_ops;
mod poly_ops;

// exports identifiers from private sub-modules in the current module namespace
pub use self::line_ops::{dedup_points, find_line_intersections};
pub use self::poly_ops::{point_in_poly, winding_number};
