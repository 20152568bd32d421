//! Configuration of the globe, loadable from a JSON file.
//!
//! Every field has a default, so a configuration file only needs the values it changes:
//!
//! ```json
//! {
//!   "view": { "initial_zoom": 5 },
//!   "markers": { "cluster_radius": 60 },
//!   "places": [
//!     { "name": "Boulder", "coord": [-105.2705, 40.015], "city": "Boulder", "state": "Colorado" }
//!   ]
//! }
//! ```

use std::path::Path;

use cityglobe_types::geo::GeoPoint2d;
use cityglobe_types::Size;
use serde::{Deserialize, Serialize};

use crate::error::GlobeError;
use crate::marker::{MarkerProjector, MarkerStyle, DEFAULT_MARKER_ELEVATION};
use crate::navigation::NavigationConfig;
use crate::registry::{LocationRegistry, PlaceEntry};
use crate::scene::{Camera, ViewOptions, MAX_TILT, MAX_ZOOM, MIN_ZOOM};
use crate::search::SearchConfig;

/// Root of the configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobeConfig {
    /// Scene view.
    pub view: ViewConfig,
    /// City markers.
    pub markers: MarkerConfig,
    /// Click and search camera moves.
    pub navigation: NavigationConfig,
    /// Search box.
    pub search: SearchConfig,
    /// Places to show instead of the built-in table.
    pub places: Option<Vec<PlaceEntry>>,
}

/// Camera position at start-up.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InitialCamera {
    /// `[longitude, latitude]` of the point under the camera, in degrees.
    pub position: [f64; 2],
    /// Height of the camera above the ground in meters.
    pub altitude: f64,
    /// Heading in degrees clockwise from north.
    pub heading: f64,
    /// Tilt in degrees.
    pub tilt: f64,
}

impl Default for InitialCamera {
    fn default() -> Self {
        Self {
            position: [-105.503, 44.27],
            altitude: 20_000_000.0,
            heading: 30.0,
            tilt: 10.0,
        }
    }
}

/// Scene view configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Id of the element the scene is drawn into.
    pub container_id: String,
    /// Basemap name.
    pub basemap: String,
    /// Elevation service used for the ground.
    pub elevation_url: Option<String>,
    /// Camera at start-up.
    pub initial_camera: InitialCamera,
    /// Zoom level set once the view is ready.
    pub initial_zoom: f64,
    /// Size of the viewport in pixels.
    pub viewport: Size,
    /// Dock popups to the side of the view.
    pub popup_docked: bool,
    /// Draw sun shadows.
    pub direct_shadows: bool,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            container_id: "map".to_string(),
            basemap: "hybrid".to_string(),
            elevation_url: Some(
                "https://elevation3d.arcgis.com/arcgis/rest/services/WorldElevation3D/Terrain3D/ImageServer"
                    .to_string(),
            ),
            initial_camera: InitialCamera::default(),
            initial_zoom: 4.0,
            viewport: Size::new(1280.0, 720.0),
            popup_docked: true,
            direct_shadows: false,
        }
    }
}

impl ViewConfig {
    /// Camera at start-up. Fails if the configured position is not a valid coordinate.
    pub fn start_camera(&self) -> Result<Camera, GlobeError> {
        let [lon, lat] = self.initial_camera.position;
        let center = GeoPoint2d::try_from_lonlat(lon, lat)?;
        Ok(
            Camera::from_altitude(center, self.initial_camera.altitude, self.viewport)
                .with_heading(self.initial_camera.heading)
                .with_tilt(self.initial_camera.tilt),
        )
    }

    /// Options for creating the scene.
    pub fn view_options(&self) -> Result<ViewOptions, GlobeError> {
        Ok(ViewOptions {
            container_id: self.container_id.clone(),
            initial_camera: self.start_camera()?,
            viewport: self.viewport,
            basemap: self.basemap.clone(),
            elevation_url: self.elevation_url.clone(),
            popup_docked: self.popup_docked,
            direct_shadows: self.direct_shadows,
        })
    }
}

/// Marker layer configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerConfig {
    /// Id of the marker layer.
    pub layer_id: String,
    /// Marker appearance.
    pub style: MarkerStyle,
    /// Display elevation of markers in meters.
    pub elevation: f64,
    /// Clustering radius in pixels. Zero disables clustering.
    pub cluster_radius: f64,
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            layer_id: "cities".to_string(),
            style: MarkerStyle::default(),
            elevation: DEFAULT_MARKER_ELEVATION,
            cluster_radius: 80.0,
        }
    }
}

impl MarkerConfig {
    /// Projector producing markers with this configuration.
    pub fn projector(&self) -> MarkerProjector {
        MarkerProjector::new(self.style, self.elevation)
    }
}

impl GlobeConfig {
    /// Parses configuration from a JSON string and validates it.
    pub fn from_json(json: &str) -> Result<Self, GlobeError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads configuration from a JSON file and validates it.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, GlobeError> {
        let path = path.as_ref();
        log::info!("Loading configuration from {}", path.display());
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Checks that all values are within their valid ranges.
    pub fn validate(&self) -> Result<(), GlobeError> {
        let [lon, lat] = self.view.initial_camera.position;
        GeoPoint2d::try_from_lonlat(lon, lat)?;

        let zooms = [
            ("view.initial_zoom", self.view.initial_zoom),
            ("navigation.click_zoom", self.navigation.click_zoom),
            ("navigation.search_zoom", self.navigation.search_zoom),
        ];
        for (name, zoom) in zooms {
            if !(MIN_ZOOM..=MAX_ZOOM).contains(&zoom) {
                return Err(GlobeError::Config(format!(
                    "{name} must be within {MIN_ZOOM}..={MAX_ZOOM}, got {zoom}"
                )));
            }
        }

        let tilts = [
            ("view.initial_camera.tilt", self.view.initial_camera.tilt),
            ("navigation.click_tilt", self.navigation.click_tilt),
            ("navigation.search_tilt", self.navigation.search_tilt),
        ];
        for (name, tilt) in tilts {
            if !(0.0..=MAX_TILT).contains(&tilt) {
                return Err(GlobeError::Config(format!(
                    "{name} must be within 0..={MAX_TILT}, got {tilt}"
                )));
            }
        }

        if self.view.viewport.is_empty() {
            return Err(GlobeError::Config(format!(
                "view.viewport must have positive width and height, got {}x{}",
                self.view.viewport.width(),
                self.view.viewport.height()
            )));
        }

        if self.markers.cluster_radius.is_nan() || self.markers.cluster_radius < 0.0 {
            return Err(GlobeError::Config(
                "markers.cluster_radius must not be negative".into(),
            ));
        }

        Ok(())
    }

    /// Builds the location registry: the configured places, or the built-in table if there are none.
    pub fn registry(&self) -> Result<LocationRegistry, GlobeError> {
        match &self.places {
            Some(places) => LocationRegistry::from_entries(places.iter().cloned()),
            None => Ok(LocationRegistry::default()),
        }
    }
}
