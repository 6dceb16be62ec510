/*
This code is part of the OpenRES hydrogeomorphic analysis library.
Authors: OpenRES developers
Created: 02/06/2025
Last Modified: 16/10/2026
License: MIT
*/

mod arcascii_raster;
mod sampler;

use self::arcascii_raster::*;
pub use self::sampler::RasterSampler;
use log::debug;
use num_traits::cast::AsPrimitive;
use openres_common::error::{Error, Result};
use openres_common::structures::BoundingBox;
use std::ops::Index;
use std::path::Path;

/// Raster is an in-memory, georeferenced grid of cell values.
///
/// Examples:
///
/// ```no_run
/// use openres_raster::Raster;
/// # fn main() -> openres_common::Result<()> {
/// // Read an existing raster file
/// let dem = Raster::new("dem.asc")?;
///
/// // Create a new raster with the dimensions
/// // and location of an existing file.
/// let output = Raster::initialize_using_config("out.asc", &dem.configs)?;
/// output.write()?;
/// # Ok(())
/// # }
/// ```
#[derive(Default, Clone, Debug)]
pub struct Raster {
    pub file_name: String,
    pub raster_type: RasterType,
    pub configs: RasterConfigs,
    data: Vec<f64>,
}

impl Index<(isize, isize)> for Raster {
    type Output = f64;

    fn index(&self, index: (isize, isize)) -> &f64 {
        match self.cell_index(index.0, index.1) {
            Some(idx) => &self.data[idx],
            None => &self.configs.nodata,
        }
    }
}

impl Raster {
    /// Reads a raster from an existing file. The format is determined by
    /// the file extension.
    pub fn new(file_name: &str) -> Result<Raster> {
        let mut r = Raster {
            file_name: file_name.to_string(),
            raster_type: get_raster_type_from_file(file_name),
            ..Default::default()
        };
        match r.raster_type {
            RasterType::ArcAscii => {
                read_arcascii(&r.file_name, &mut r.configs, &mut r.data)?;
                debug!(
                    "Read {} ({} rows x {} columns)",
                    r.file_name, r.configs.rows, r.configs.columns
                );
                Ok(r)
            }
            RasterType::Unknown => Err(Error::RasterFormat(format!(
                "unrecognized raster type: {}",
                file_name
            ))),
        }
    }

    /// Creates a new in-memory `Raster` object with grid extent and location
    /// based on specified configurations contained within a `RasterConfigs`.
    /// Every cell starts out as nodata.
    pub fn initialize_using_config(file_name: &str, configs: &RasterConfigs) -> Result<Raster> {
        let num_cells = configs.num_cells()?;
        Ok(Raster {
            file_name: file_name.to_string(),
            raster_type: get_raster_type_from_file(file_name),
            configs: configs.clone(),
            data: vec![configs.nodata; num_cells],
        })
    }

    /// Creates a raster from row-major cell values, northernmost row first.
    pub fn initialize_using_rows<T: AsPrimitive<f64>>(
        file_name: &str,
        configs: &RasterConfigs,
        rows: &[Vec<T>],
    ) -> Result<Raster> {
        if rows.len() != configs.rows || rows.iter().any(|r| r.len() != configs.columns) {
            return Err(Error::RasterFormat(format!(
                "cell values do not match the {} x {} grid",
                configs.rows, configs.columns
            )));
        }
        let mut output = Raster::initialize_using_config(file_name, configs)?;
        output.data = rows
            .iter()
            .flat_map(|r| r.iter().map(|v| v.as_()))
            .collect();
        Ok(output)
    }

    fn cell_index(&self, row: isize, column: isize) -> Option<usize> {
        if row < 0 || column < 0 {
            return None;
        }
        let (r, c) = (row as usize, column as usize);
        if r >= self.configs.rows || c >= self.configs.columns {
            return None;
        }
        Some(r * self.configs.columns + c)
    }

    /// Returns the value contained within a grid cell specified
    /// by `row` and `column`, or the nodata value off the grid.
    pub fn get_value(&self, row: isize, column: isize) -> f64 {
        self[(row, column)]
    }

    pub fn set_value(&mut self, row: isize, column: isize, value: f64) {
        if let Some(idx) = self.cell_index(row, column) {
            self.data[idx] = value;
        }
    }

    pub fn num_cells(&self) -> usize {
        self.data.len()
    }

    pub fn get_x_from_column(&self, column: isize) -> f64 {
        self.configs.west
            + self.configs.resolution_x / 2f64
            + column as f64 * self.configs.resolution_x
    }

    pub fn get_y_from_row(&self, row: isize) -> f64 {
        self.configs.north
            - self.configs.resolution_y / 2f64
            - row as f64 * self.configs.resolution_y
    }

    pub fn get_column_from_x(&self, x: f64) -> isize {
        ((x - self.configs.west) / self.configs.resolution_x).floor() as isize
    }

    pub fn get_row_from_y(&self, y: f64) -> isize {
        ((self.configs.north - y) / self.configs.resolution_y).floor() as isize
    }

    /// Value of the cell containing the coordinate, or `None` when the
    /// coordinate is off the grid or the cell holds nodata.
    pub fn get_value_at(&self, x: f64, y: f64) -> Option<f64> {
        if !x.is_finite() || !y.is_finite() {
            return None;
        }
        let idx = self.cell_index(self.get_row_from_y(y), self.get_column_from_x(x))?;
        let z = self.data[idx];
        if z == self.configs.nodata || z.is_nan() {
            None
        } else {
            Some(z)
        }
    }

    pub fn write(&self) -> Result<()> {
        match self.raster_type {
            RasterType::ArcAscii => write_arcascii(self),
            RasterType::Unknown => Err(Error::RasterFormat(format!(
                "unrecognized raster type: {}",
                self.file_name
            ))),
        }
    }

    pub fn get_bounding_box(&self) -> BoundingBox {
        BoundingBox::new(
            self.configs.west,
            self.configs.east,
            self.configs.south,
            self.configs.north,
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RasterConfigs {
    pub rows: usize,
    pub columns: usize,
    pub nodata: f64,
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
    pub resolution_x: f64,
    pub resolution_y: f64,
}

impl Default for RasterConfigs {
    fn default() -> RasterConfigs {
        RasterConfigs {
            rows: 0,
            columns: 0,
            nodata: -32768.0,
            north: f64::NEG_INFINITY,
            south: f64::INFINITY,
            east: f64::NEG_INFINITY,
            west: f64::INFINITY,
            resolution_x: f64::NEG_INFINITY,
            resolution_y: f64::NEG_INFINITY,
        }
    }
}

impl RasterConfigs {
    /// Grid configuration anchored at its north-west corner with square cells.
    pub fn from_origin(
        west: f64,
        north: f64,
        cell_size: f64,
        rows: usize,
        columns: usize,
    ) -> RasterConfigs {
        RasterConfigs {
            rows,
            columns,
            north,
            west,
            south: north - rows as f64 * cell_size,
            east: west + columns as f64 * cell_size,
            resolution_x: cell_size,
            resolution_y: cell_size,
            ..Default::default()
        }
    }

    /// Total number of grid cells, or an error when `rows * columns`
    /// does not fit in memory addressing.
    pub fn num_cells(&self) -> Result<usize> {
        self.rows.checked_mul(self.columns).ok_or_else(|| {
            Error::RasterFormat(format!(
                "a {} x {} grid is too large to address",
                self.rows, self.columns
            ))
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RasterType {
    #[default]
    Unknown,
    ArcAscii,
}

fn get_raster_type_from_file(file_name: &str) -> RasterType {
    let extension = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "asc" | "txt" => RasterType::ArcAscii,
        _ => RasterType::Unknown,
    }
}
