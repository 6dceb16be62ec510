use super::Raster;
use openres_common::structures::Point2D;

/// Point lookup into a continuous surface such as a DEM or a precipitation
/// grid. `None` means the value is unavailable at that location.
pub trait RasterSampler {
    fn sample_at(&self, point: Point2D) -> Option<f64>;
}

impl RasterSampler for Raster {
    fn sample_at(&self, point: Point2D) -> Option<f64> {
        self.get_value_at(point.x, point.y)
    }
}

/// Closures work as samplers, which is handy for analytic surfaces.
impl<F> RasterSampler for F
where
    F: Fn(Point2D) -> Option<f64>,
{
    fn sample_at(&self, point: Point2D) -> Option<f64> {
        self(point)
    }
}

#[cfg(test)]
mod test {
    use super::RasterSampler;
    use crate::{Raster, RasterConfigs};
    use openres_common::structures::Point2D;

    fn sample_twice<S: RasterSampler + ?Sized>(s: &S, p: Point2D) -> (Option<f64>, Option<f64>) {
        (s.sample_at(p), s.sample_at(p.translate(1000.0, 0.0)))
    }

    #[test]
    fn test_raster_sampler() {
        let configs = RasterConfigs::from_origin(0.0, 10.0, 5.0, 2, 2);
        let dem = Raster::initialize_using_rows("dem.asc", &configs, &[vec![1.0, 2.0], vec![3.0, 4.0]])
            .unwrap();
        assert_eq!(sample_twice(&dem, Point2D::new(7.0, 2.0)), (Some(4.0), None));
    }

    #[test]
    fn test_closure_sampler() {
        let plane = |p: Point2D| if p.x < 500.0 { Some(p.x * 2.0) } else { None };
        assert_eq!(sample_twice(&plane, Point2D::new(3.0, 0.0)), (Some(6.0), None));
    }
}
