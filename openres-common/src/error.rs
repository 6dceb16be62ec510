/*
This code is part of the OpenRES hydrogeomorphic analysis library.
Authors: OpenRES developers
Created: 02/06/2025
Last Modified: 16/10/2026
License: MIT
*/

//! Error types shared by the OpenRES crates.

use thiserror::Error;

/// Main error type for OpenRES operations.
///
/// Per-segment data-quality problems (a ray that never reaches the valley
/// edge, a transect without a flow reference) are not errors; they are
/// reported as excluded segments. Only problems that make the whole run
/// meaningless end up here.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        name: &'static str,
        value: String,
        reason: String,
    },

    #[error("Raster format error: {0}")]
    RasterFormat(String),

    #[error("Unable to build worker pool: {0}")]
    ThreadPool(String),

    #[error("Processing was cancelled")]
    Cancelled,
}

impl Error {
    pub fn invalid_parameter(name: &'static str, value: f64, reason: &str) -> Error {
        Error::InvalidParameter {
            name,
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Result type alias for OpenRES operations.
pub type Result<T> = std::result::Result<T, Error>;
