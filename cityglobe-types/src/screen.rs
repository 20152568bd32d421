//! Planar coordinates: projected map meters and screen pixels.

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Position on the screen in pixels from the top-left corner.
pub type ScreenPoint = Point2<f64>;

/// Position on the projected (Web Mercator) plane in meters.
pub type MapPoint = Point2<f64>;

/// Point on a plane.
pub trait PlanarPoint {
    /// X coordinate.
    fn x(&self) -> f64;
    /// Y coordinate.
    fn y(&self) -> f64;

    /// Euclidean distance to the other point.
    fn distance(&self, other: &impl PlanarPoint) -> f64 {
        let dx = self.x() - other.x();
        let dy = self.y() - other.y();
        (dx * dx + dy * dy).sqrt()
    }
}

/// Planar point that can be constructed from its coordinates.
pub trait NewPlanarPoint: PlanarPoint + Sized {
    /// Creates a new point.
    fn new(x: f64, y: f64) -> Self;
}

impl PlanarPoint for Point2<f64> {
    fn x(&self) -> f64 {
        self.x
    }

    fn y(&self) -> f64 {
        self.y
    }
}

impl NewPlanarPoint for Point2<f64> {
    fn new(x: f64, y: f64) -> Self {
        Point2::new(x, y)
    }
}

/// Size of a rectangular area in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    width: f64,
    height: f64,
}

impl Size {
    /// Creates a new size.
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Width.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Half of the width.
    pub fn half_width(&self) -> f64 {
        self.width / 2.0
    }

    /// Height.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Half of the height.
    pub fn half_height(&self) -> f64 {
        self.height / 2.0
    }

    /// Returns true unless both dimensions are positive.
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    /// Center of the area.
    pub fn center(&self) -> ScreenPoint {
        ScreenPoint::new(self.half_width(), self.half_height())
    }

    /// Returns true if the point lies within `0..width` and `0..height`.
    pub fn contains(&self, point: &impl PlanarPoint) -> bool {
        (0.0..=self.width).contains(&point.x()) && (0.0..=self.height).contains(&point.y())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance() {
        let a = ScreenPoint::new(0.0, 0.0);
        let b = ScreenPoint::new(3.0, 4.0);
        assert_eq!(a.distance(&b), 5.0);
    }

    #[test]
    fn size_center_and_contains() {
        let size = Size::new(1280.0, 720.0);
        assert_eq!(size.center(), ScreenPoint::new(640.0, 360.0));
        assert!(size.contains(&ScreenPoint::new(0.0, 720.0)));
        assert!(!size.contains(&ScreenPoint::new(-1.0, 10.0)));
        assert!(!size.is_empty());
    }

    #[test]
    fn empty_sizes() {
        assert!(Size::new(0.0, 10.0).is_empty());
        assert!(Size::new(-800.0, 600.0).is_empty());
        assert!(Size::new(800.0, -1.0).is_empty());
        assert!(Size::new(f64::NAN, 600.0).is_empty());
    }
}
