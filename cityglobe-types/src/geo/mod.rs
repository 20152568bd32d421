//! Points in geographic coordinates (latitude and longitude) and their projection onto a plane.

mod datum;
mod point;
mod projection;

pub use datum::Datum;
pub use point::{GeoPoint, GeoPoint2d, NewGeoPoint};
pub use projection::{Projection, WebMercator};
