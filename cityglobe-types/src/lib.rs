//! Geographic and screen-space primitives shared by the `cityglobe` crates.
//!
//! * [`geo`] contains points on the surface of the Earth ([`GeoPoint2d`](geo::GeoPoint2d)), the
//!   [`Datum`](geo::Datum) they are defined on and the [`WebMercator`](geo::WebMercator)
//!   projection that maps them onto a plane.
//! * [`screen`] contains pixel-space types: [`ScreenPoint`](screen::ScreenPoint) and
//!   [`Size`](screen::Size).

pub mod error;
pub mod geo;
pub mod screen;

pub use error::GlobeTypesError;
pub use geo::{GeoPoint, GeoPoint2d, NewGeoPoint};
pub use screen::{ScreenPoint, Size};
