use crate::center_points::CenterPoints;
use crate::layers::PolygonLayer;
use openres_raster::RasterSampler;

/// Written to ELE and PRE when the raster has no value at the center point.
pub const NODATA_SENTINEL: f64 = -9999.0;

/// Written to GEO when no polygon contains the center point.
pub const NO_DATA_LABEL: &str = "No Data";

/// Samples ELE and PRE from their rasters and GEO from the polygon layer at
/// every center point.
pub fn extract_point_data<E, P>(
    mut center_points: CenterPoints,
    elevation: &E,
    precipitation: &P,
    geology: &PolygonLayer,
) -> CenterPoints
where
    E: RasterSampler + ?Sized,
    P: RasterSampler + ?Sized,
{
    for cp in center_points.values_mut() {
        cp.ele = Some(elevation.sample_at(cp.location).unwrap_or(NODATA_SENTINEL));
        cp.pre = Some(precipitation.sample_at(cp.location).unwrap_or(NODATA_SENTINEL));
        cp.geo = Some(
            geology
                .value_at(&cp.location)
                .unwrap_or(NO_DATA_LABEL)
                .to_string(),
        );
    }
    center_points
}
