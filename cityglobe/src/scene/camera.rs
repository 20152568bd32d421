use cityglobe_types::geo::{GeoPoint2d, Projection, WebMercator};
use cityglobe_types::screen::{MapPoint, ScreenPoint};
use cityglobe_types::Size;
use nalgebra::{Rotation2, Vector2};

/// Ground resolution at zoom level `0` on the equator, meters per pixel.
pub const ZOOM_0_RESOLUTION: f64 = 156543.03392800014;
/// Minimum allowed zoom level.
pub const MIN_ZOOM: f64 = 0.0;
/// Maximum allowed zoom level.
pub const MAX_ZOOM: f64 = 24.0;
/// Maximum allowed tilt in degrees. At `90` the camera looks at the horizon.
pub const MAX_TILT: f64 = 90.0;

/// Position and orientation of the scene camera.
///
/// The screen model used for hit-testing is planar: the map is projected with Web Mercator and
/// looked at from above, rotated by `heading`. Tilt is kept as camera state only.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    center: GeoPoint2d,
    zoom: f64,
    tilt: f64,
    heading: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            center: GeoPoint2d::default(),
            zoom: MIN_ZOOM,
            tilt: 0.0,
            heading: 0.0,
        }
    }
}

impl Camera {
    /// Creates a camera looking straight down at `center`.
    pub fn new(center: GeoPoint2d, zoom: f64) -> Self {
        Self::default().with_center(center).with_zoom(zoom)
    }

    /// Creates a camera hanging `altitude` meters above `center`, with the zoom level chosen so
    /// that the visible ground height matches a 90 degree field of view in a viewport of the
    /// given size.
    pub fn from_altitude(center: GeoPoint2d, altitude: f64, viewport: Size) -> Self {
        let zoom = if altitude > 0.0 && viewport.height() > 0.0 {
            let resolution = 2.0 * altitude / viewport.height();
            (ZOOM_0_RESOLUTION / resolution).log2()
        } else {
            MIN_ZOOM
        };

        Self::new(center, zoom)
    }

    /// Point the camera looks at.
    pub fn center(&self) -> GeoPoint2d {
        self.center
    }

    /// Zoom level.
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Tilt from the vertical in degrees.
    pub fn tilt(&self) -> f64 {
        self.tilt
    }

    /// Heading in degrees clockwise from north.
    pub fn heading(&self) -> f64 {
        self.heading
    }

    /// Meters per pixel at the current zoom level.
    pub fn resolution(&self) -> f64 {
        ZOOM_0_RESOLUTION / 2f64.powf(self.zoom)
    }

    /// Returns a camera with the new center.
    pub fn with_center(&self, center: GeoPoint2d) -> Self {
        Self { center, ..*self }
    }

    /// Returns a camera with the new zoom level, clamped to `MIN_ZOOM..=MAX_ZOOM`.
    pub fn with_zoom(&self, zoom: f64) -> Self {
        Self {
            zoom: zoom.clamp(MIN_ZOOM, MAX_ZOOM),
            ..*self
        }
    }

    /// Returns a camera with the new tilt, clamped to `0..=MAX_TILT`.
    pub fn with_tilt(&self, tilt: f64) -> Self {
        Self {
            tilt: tilt.clamp(0.0, MAX_TILT),
            ..*self
        }
    }

    /// Returns a camera with the new heading, normalized to `0..360`.
    pub fn with_heading(&self, heading: f64) -> Self {
        Self {
            heading: heading.rem_euclid(360.0),
            ..*self
        }
    }

    fn projection() -> WebMercator<GeoPoint2d, MapPoint> {
        WebMercator::default()
    }

    fn rotation(&self) -> Rotation2<f64> {
        Rotation2::new(self.heading.to_radians())
    }

    /// Projects a geographic point into screen pixels of a viewport of the given size.
    pub fn geo_to_screen(&self, point: &GeoPoint2d, viewport: Size) -> Option<ScreenPoint> {
        let projection = Self::projection();
        let center = projection.project(&self.center)?;
        let point = projection.project(point)?;
        Some(self.map_to_screen(&center, &point, viewport))
    }

    /// Converts screen pixels into a geographic point.
    pub fn screen_to_geo(&self, point: ScreenPoint, viewport: Size) -> Option<GeoPoint2d> {
        let projection = Self::projection();
        let center = projection.project(&self.center)?;
        projection.unproject(&self.screen_to_map(&center, point, viewport))
    }

    pub(crate) fn map_to_screen(
        &self,
        center: &MapPoint,
        point: &MapPoint,
        viewport: Size,
    ) -> ScreenPoint {
        let resolution = self.resolution();
        let rotated = self.rotation() * (point - center);
        ScreenPoint::new(
            viewport.half_width() + rotated.x / resolution,
            viewport.half_height() - rotated.y / resolution,
        )
    }

    pub(crate) fn screen_to_map(
        &self,
        center: &MapPoint,
        point: ScreenPoint,
        viewport: Size,
    ) -> MapPoint {
        let resolution = self.resolution();
        let offset = Vector2::new(
            (point.x - viewport.half_width()) * resolution,
            (viewport.half_height() - point.y) * resolution,
        );
        *center + self.rotation().inverse() * offset
    }

    /// Camera between `self` (`k == 0`) and `target` (`k == 1`).
    ///
    /// The center moves along a straight line in projected space, heading takes the shorter way
    /// around the circle.
    pub fn interpolate(&self, target: &Camera, k: f64) -> Self {
        let projection = Self::projection();
        let center = match (
            projection.project(&self.center),
            projection.project(&target.center),
        ) {
            (Some(from), Some(to)) => {
                let moved = from + (to - from) * k;
                projection.unproject(&moved).unwrap_or(target.center)
            }
            _ => target.center,
        };

        let mut heading_delta = (target.heading - self.heading).rem_euclid(360.0);
        if heading_delta > 180.0 {
            heading_delta -= 360.0;
        }

        Self {
            center,
            zoom: self.zoom + (target.zoom - self.zoom) * k,
            tilt: self.tilt + (target.tilt - self.tilt) * k,
            heading: (self.heading + heading_delta * k).rem_euclid(360.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use cityglobe_types::{latlon, GeoPoint};

    use super::*;

    #[test]
    fn map_to_screen_size() {
        let camera = Camera::new(GeoPoint2d::default(), 0.0);
        let resolution = camera.resolution();
        let center = MapPoint::new(0.0, 0.0);

        let viewport = Size::new(100.0, 100.0);
        assert_abs_diff_eq!(
            camera.map_to_screen(&center, &MapPoint::new(0.0, 0.0), viewport),
            ScreenPoint::new(50.0, 50.0),
            epsilon = 0.0001,
        );
        assert_abs_diff_eq!(
            camera.map_to_screen(
                &center,
                &MapPoint::new(-50.0 * resolution, 50.0 * resolution),
                viewport
            ),
            ScreenPoint::new(0.0, 0.0),
            epsilon = 0.0001,
        );

        let viewport = Size::new(200.0, 50.0);
        assert_abs_diff_eq!(
            camera.screen_to_map(&center, ScreenPoint::new(25.0, 49.0), viewport),
            MapPoint::new(-75.0 * resolution, -24.0 * resolution),
            epsilon = 0.0001,
        );
    }

    #[test]
    fn screen_to_map_heading() {
        let camera = Camera::new(GeoPoint2d::default(), 0.0).with_heading(90.0);
        let resolution = camera.resolution();
        let center = MapPoint::new(0.0, 0.0);
        let viewport = Size::new(100.0, 100.0);

        // With the camera facing east, the top of the screen shows what is east of the center.
        let top = camera.screen_to_map(&center, ScreenPoint::new(50.0, 0.0), viewport);
        assert_abs_diff_eq!(top, MapPoint::new(50.0 * resolution, 0.0), epsilon = 0.0001);

        let back = camera.map_to_screen(&center, &top, viewport);
        assert_abs_diff_eq!(back, ScreenPoint::new(50.0, 0.0), epsilon = 0.0001);
    }

    #[test]
    fn geo_round_trip() {
        let camera = Camera::new(latlon!(39.7392, -104.9903), 10.0).with_heading(30.0);
        let viewport = Size::new(800.0, 600.0);

        let center = camera
            .geo_to_screen(&camera.center(), viewport)
            .unwrap();
        assert_abs_diff_eq!(center, ScreenPoint::new(400.0, 300.0), epsilon = 0.0001);

        let geo = camera
            .screen_to_geo(ScreenPoint::new(120.0, 530.0), viewport)
            .unwrap();
        let screen = camera.geo_to_screen(&geo, viewport).unwrap();
        assert_abs_diff_eq!(screen, ScreenPoint::new(120.0, 530.0), epsilon = 0.0001);
    }

    #[test]
    fn resolution_halves_with_every_zoom_level() {
        let camera = Camera::new(GeoPoint2d::default(), 4.0);
        assert_abs_diff_eq!(camera.resolution(), ZOOM_0_RESOLUTION / 16.0);
        let camera = camera.with_zoom(5.0);
        assert_abs_diff_eq!(camera.resolution(), ZOOM_0_RESOLUTION / 32.0);
    }

    #[test]
    fn from_altitude() {
        let viewport = Size::new(1280.0, 720.0);
        let camera = Camera::from_altitude(latlon!(44.27, -105.503), 20_000_000.0, viewport);
        assert_abs_diff_eq!(camera.resolution(), 2.0 * 20_000_000.0 / 720.0, epsilon = 0.001);

        let camera = Camera::from_altitude(latlon!(44.27, -105.503), 0.0, viewport);
        assert_eq!(camera.zoom(), MIN_ZOOM);
    }

    #[test]
    fn values_are_clamped() {
        let camera = Camera::default()
            .with_zoom(40.0)
            .with_tilt(120.0)
            .with_heading(-30.0);
        assert_eq!(camera.zoom(), MAX_ZOOM);
        assert_eq!(camera.tilt(), MAX_TILT);
        assert_eq!(camera.heading(), 330.0);
    }

    #[test]
    fn interpolate() {
        let from = Camera::new(latlon!(40.0, -105.0), 4.0)
            .with_tilt(10.0)
            .with_heading(350.0);
        let to = Camera::new(latlon!(41.0, -104.0), 12.0)
            .with_tilt(60.0)
            .with_heading(30.0);

        let start = from.interpolate(&to, 0.0);
        assert_abs_diff_eq!(start.center(), from.center(), epsilon = 1e-9);
        assert_abs_diff_eq!(start.zoom(), 4.0);

        let middle = from.interpolate(&to, 0.5);
        assert_abs_diff_eq!(middle.zoom(), 8.0);
        assert_abs_diff_eq!(middle.tilt(), 35.0);
        assert_abs_diff_eq!(middle.heading(), 10.0, epsilon = 1e-9);
        assert_abs_diff_eq!(middle.center().lon(), -104.5, epsilon = 1e-9);

        let end = from.interpolate(&to, 1.0);
        assert_abs_diff_eq!(end.center(), to.center(), epsilon = 1e-9);
        assert_abs_diff_eq!(end.heading(), 30.0, epsilon = 1e-9);
    }
}
