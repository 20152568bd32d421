use std::marker::PhantomData;

use crate::geo::datum::Datum;
use crate::geo::point::{GeoPoint, NewGeoPoint};
use crate::screen::{NewPlanarPoint, PlanarPoint};

/// Conversion between two coordinate spaces.
pub trait Projection {
    /// Type of the input point.
    type InPoint;
    /// Type of the output point.
    type OutPoint;

    /// Projects the point, returns `None` if the point cannot be represented in the output space.
    fn project(&self, input: &Self::InPoint) -> Option<Self::OutPoint>;
    /// Inverse of [`Projection::project`].
    fn unproject(&self, input: &Self::OutPoint) -> Option<Self::InPoint>;
}

/// Spherical Mercator projection (EPSG:3857). Output coordinates are in meters.
#[derive(Debug, Copy, Clone)]
pub struct WebMercator<In, Out> {
    datum: Datum,
    phantom_in: PhantomData<In>,
    phantom_out: PhantomData<Out>,
}

impl<In, Out> WebMercator<In, Out> {
    /// Creates a projection on the given datum.
    pub fn new(datum: Datum) -> Self {
        Self {
            datum,
            phantom_in: Default::default(),
            phantom_out: Default::default(),
        }
    }
}

impl<In, Out> Default for WebMercator<In, Out> {
    fn default() -> Self {
        Self::new(Datum::WGS84)
    }
}

impl<In: NewGeoPoint<f64>, Out: NewPlanarPoint> Projection for WebMercator<In, Out> {
    type InPoint = In;
    type OutPoint = Out;

    fn project(&self, input: &Self::InPoint) -> Option<Self::OutPoint> {
        let x = self.datum.semimajor() * input.lon_rad();
        let y = self.datum.semimajor()
            * (std::f64::consts::FRAC_PI_4 + input.lat_rad() / 2.0)
                .tan()
                .ln();

        if x.is_finite() && y.is_finite() {
            Some(Out::new(x, y))
        } else {
            None
        }
    }

    fn unproject(&self, input: &Self::OutPoint) -> Option<Self::InPoint> {
        let lat = 2.0 * (input.y() / self.datum.semimajor()).exp().atan()
            - std::f64::consts::FRAC_PI_2;
        let lon = input.x() / self.datum.semimajor();

        if lat.is_finite() && lon.is_finite() {
            Some(In::latlon(lat.to_degrees(), lon.to_degrees()))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::geo::GeoPoint2d;
    use crate::latlon;
    use crate::screen::MapPoint;

    #[test]
    fn project_origin() {
        let projection = WebMercator::<GeoPoint2d, MapPoint>::default();
        let projected = projection.project(&latlon!(0.0, 0.0)).unwrap();
        assert_abs_diff_eq!(projected.x, 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(projected.y, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn project_and_back() {
        let projection = WebMercator::<GeoPoint2d, MapPoint>::default();
        let denver = latlon!(39.7392, -104.9903);
        let projected = projection.project(&denver).unwrap();
        assert_abs_diff_eq!(projected.x, -11_687_466.73, epsilon = 0.01);

        let restored = projection.unproject(&projected).unwrap();
        assert_abs_diff_eq!(restored, denver, epsilon = 1e-9);
    }
}
