//! Conversion of registry places into renderable point features.

use std::fmt::{Display, Formatter};

use cityglobe_types::geo::GeoPoint2d;
use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::registry::PlaceRecord;

/// Identifier of a marker feature, unique within one [`MarkerProjector::project_all`] output.
pub type ObjectId = u32;

/// Default marker elevation above the ground in meters.
pub const DEFAULT_MARKER_ELEVATION: f64 = 10_000.0;

/// Appearance of a marker: a filled circle with an outline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerStyle {
    /// Fill color.
    pub fill: Color,
    /// Diameter of the marker in pixels.
    pub size: f64,
    /// Outline color.
    pub outline: Color,
    /// Outline width in pixels.
    pub outline_width: f64,
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            fill: Color::MARKER_ORANGE,
            size: 10.0,
            outline: Color::WHITE,
            outline_width: 1.5,
        }
    }
}

impl MarkerStyle {
    /// Radius of the drawn marker including its outline, in pixels.
    pub fn radius(&self) -> f64 {
        self.size / 2.0 + self.outline_width
    }
}

/// Content of the popup shown for a feature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopupContent {
    /// Popup title.
    pub title: String,
    /// Labeled values shown below the title.
    pub fields: Vec<(String, String)>,
}

impl Display for PopupContent {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.title)?;
        for (label, value) in &self.fields {
            write!(f, "\n  {label}: {value}")?;
        }
        Ok(())
    }
}

/// A renderable point derived from a [`PlaceRecord`].
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerFeature {
    object_id: ObjectId,
    name: String,
    city: String,
    state: String,
    position: GeoPoint2d,
    elevation: f64,
    style: MarkerStyle,
}

impl MarkerFeature {
    /// Unique id of the feature.
    pub fn object_id(&self) -> ObjectId {
        self.object_id
    }

    /// Name of the place the feature was created from.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// City display field.
    pub fn city(&self) -> &str {
        &self.city
    }

    /// State display field.
    pub fn state(&self) -> &str {
        &self.state
    }

    /// Geometry of the feature.
    pub fn position(&self) -> GeoPoint2d {
        self.position
    }

    /// Display elevation in meters.
    pub fn elevation(&self) -> f64 {
        self.elevation
    }

    /// Appearance of the feature.
    pub fn style(&self) -> &MarkerStyle {
        &self.style
    }

    /// Popup shown when the feature is selected.
    pub fn popup(&self) -> PopupContent {
        PopupContent {
            title: self.name.clone(),
            fields: vec![
                ("City".to_string(), self.city.clone()),
                ("State".to_string(), self.state.clone()),
            ],
        }
    }
}

/// Creates [`MarkerFeature`]s from places.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerProjector {
    style: MarkerStyle,
    elevation: f64,
}

impl Default for MarkerProjector {
    fn default() -> Self {
        Self::new(MarkerStyle::default(), DEFAULT_MARKER_ELEVATION)
    }
}

impl MarkerProjector {
    /// Creates a projector that gives every feature the same style and elevation.
    pub fn new(style: MarkerStyle, elevation: f64) -> Self {
        Self { style, elevation }
    }

    /// Creates one feature per record, in the order of the input.
    ///
    /// Object ids start from `1` and follow the input order, so projecting the same records twice
    /// gives equal outputs.
    pub fn project_all<'a>(
        &self,
        records: impl IntoIterator<Item = &'a PlaceRecord>,
    ) -> Vec<MarkerFeature> {
        records
            .into_iter()
            .zip(1..)
            .map(|(record, object_id)| self.project(record, object_id))
            .collect()
    }

    fn project(&self, record: &PlaceRecord, object_id: ObjectId) -> MarkerFeature {
        MarkerFeature {
            object_id,
            name: record.name().to_string(),
            city: record.city().to_string(),
            state: record.state().to_string(),
            position: record.coordinate(),
            elevation: self.elevation,
            style: self.style,
        }
    }
}
