use super::{Raster, RasterConfigs};
use openres_common::error::{Error, Result};
use std::fs::File;
use std::io::prelude::*;
use std::io::{BufReader, BufWriter};

fn parse_header_value<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .parse::<T>()
        .map_err(|_| Error::RasterFormat(format!("invalid {} value '{}'", key, value)))
}

/// Reads an ArcGIS ASCII grid. Cell values are stored row-major, starting
/// with the northernmost row.
pub fn read_arcascii(
    file_name: &str,
    configs: &mut RasterConfigs,
    data: &mut Vec<f64>,
) -> Result<()> {
    let f = File::open(file_name)?;
    let f = BufReader::new(f);

    let mut xllcenter = f64::NEG_INFINITY;
    let mut yllcenter = f64::NEG_INFINITY;
    let mut xllcorner = f64::NEG_INFINITY;
    let mut yllcorner = f64::NEG_INFINITY;
    for line in f.lines() {
        let line = line?;
        let vec: Vec<&str> = line.split_whitespace().collect();
        if vec.is_empty() {
            continue;
        }
        let key = vec[0].to_lowercase();
        let is_header = key.chars().next().map_or(false, |c| c.is_ascii_alphabetic())
            && key != "nan"
            && !key.starts_with("inf");
        if !is_header {
            // it's a data line
            for val in vec {
                data.push(parse_header_value::<f64>("cell", val)?);
            }
            continue;
        }
        let value = vec.last().copied().unwrap_or_default();
        match key.as_str() {
            "ncols" => configs.columns = parse_header_value::<f64>("ncols", value)? as usize,
            "nrows" => configs.rows = parse_header_value::<f64>("nrows", value)? as usize,
            "xllcorner" => xllcorner = parse_header_value("xllcorner", value)?,
            "yllcorner" => yllcorner = parse_header_value("yllcorner", value)?,
            "xllcenter" => xllcenter = parse_header_value("xllcenter", value)?,
            "yllcenter" => yllcenter = parse_header_value("yllcenter", value)?,
            "cellsize" => {
                configs.resolution_x = parse_header_value("cellsize", value)?;
                configs.resolution_y = configs.resolution_x;
            }
            "nodata_value" => configs.nodata = parse_header_value("nodata_value", value)?,
            _ => {
                return Err(Error::RasterFormat(format!(
                    "unrecognized header entry '{}'",
                    vec[0]
                )))
            }
        }
    }

    if configs.rows == 0
        || configs.columns == 0
        || configs.resolution_x.is_nan()
        || configs.resolution_x <= 0f64
    {
        return Err(Error::RasterFormat(format!(
            "{} is missing its grid dimensions or cell size",
            file_name
        )));
    }
    let num_cells = configs.num_cells()?;
    if data.len() != num_cells {
        return Err(Error::RasterFormat(format!(
            "{} holds {} cells but its header declares {} x {}",
            file_name,
            data.len(),
            configs.rows,
            configs.columns
        )));
    }

    // set the North, East, South, and West coordinates
    let (west, south) = if xllcorner.is_finite() && yllcorner.is_finite() {
        (xllcorner, yllcorner)
    } else if xllcenter.is_finite() && yllcenter.is_finite() {
        (
            xllcenter - 0.5 * configs.resolution_x,
            yllcenter - 0.5 * configs.resolution_y,
        )
    } else {
        return Err(Error::RasterFormat(format!(
            "{} does not locate its lower-left cell",
            file_name
        )));
    };
    configs.west = west;
    configs.south = south;
    configs.east = west + configs.columns as f64 * configs.resolution_x;
    configs.north = south + configs.rows as f64 * configs.resolution_y;

    Ok(())
}

pub fn write_arcascii(r: &Raster) -> Result<()> {
    let f = File::create(&r.file_name)?;
    let mut writer = BufWriter::new(f);

    writeln!(writer, "NCOLS {}", r.configs.columns)?;
    writeln!(writer, "NROWS {}", r.configs.rows)?;
    writeln!(writer, "XLLCORNER {}", r.configs.west)?;
    writeln!(writer, "YLLCORNER {}", r.configs.south)?;
    writeln!(
        writer,
        "CELLSIZE {}",
        (r.configs.resolution_x + r.configs.resolution_y) / 2.0
    )?;
    writeln!(writer, "NODATA_VALUE {}", r.configs.nodata)?;

    for row in r.data.chunks(r.configs.columns.max(1)) {
        let line: Vec<String> = row.iter().map(|v| v.to_string()).collect();
        writeln!(writer, "{}", line.join(" "))?;
    }

    writer.flush()?;
    Ok(())
}
