//! Turning user gestures into camera moves.

use std::time::Duration;

use cityglobe_types::geo::GeoPoint2d;
use cityglobe_types::screen::ScreenPoint;
use serde::{Deserialize, Serialize};

use crate::easing::Easing;
use crate::error::GlobeError;
use crate::registry::LocationRegistry;
use crate::scene::SceneCollaborator;

/// Parameters of a camera move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavigationTarget {
    /// Point the camera should look at.
    pub coordinate: GeoPoint2d,
    /// Target zoom level.
    pub zoom: f64,
    /// Target tilt in degrees.
    pub tilt: f64,
    /// Duration of the animation. `None` leaves it to the scene.
    pub duration: Option<Duration>,
    /// Easing of the animation. `None` leaves it to the scene.
    pub easing: Option<Easing>,
}

impl NavigationTarget {
    /// Creates a target with scene-default animation parameters.
    pub fn new(coordinate: GeoPoint2d, zoom: f64, tilt: f64) -> Self {
        Self {
            coordinate,
            zoom,
            tilt,
            duration: None,
            easing: None,
        }
    }

    /// Sets the duration of the animation.
    pub fn with_duration(self, duration: Duration) -> Self {
        Self {
            duration: Some(duration),
            ..self
        }
    }

    /// Sets the easing of the animation.
    pub fn with_easing(self, easing: Easing) -> Self {
        Self {
            easing: Some(easing),
            ..self
        }
    }
}

/// Camera parameters used by the two navigation paths.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// Zoom level after clicking a feature.
    pub click_zoom: f64,
    /// Tilt in degrees after clicking a feature.
    pub click_tilt: f64,
    /// Duration of the click animation in milliseconds.
    pub click_duration_ms: u64,
    /// Easing of the click animation.
    pub click_easing: Easing,
    /// Zoom level after a successful search.
    pub search_zoom: f64,
    /// Tilt in degrees after a successful search.
    pub search_tilt: f64,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            click_zoom: 12.0,
            click_tilt: 60.0,
            click_duration_ms: 1500,
            click_easing: Easing::InOutCubic,
            search_zoom: 10.0,
            search_tilt: 45.0,
        }
    }
}

impl NavigationConfig {
    /// Target for a clicked feature at `coordinate`.
    pub fn click_target(&self, coordinate: GeoPoint2d) -> NavigationTarget {
        NavigationTarget::new(coordinate, self.click_zoom, self.click_tilt)
            .with_duration(Duration::from_millis(self.click_duration_ms))
            .with_easing(self.click_easing)
    }

    /// Target for a found place at `coordinate`.
    pub fn search_target(&self, coordinate: GeoPoint2d) -> NavigationTarget {
        NavigationTarget::new(coordinate, self.search_zoom, self.search_tilt)
    }
}

/// Resolves clicks and searches into camera moves.
///
/// The controller is stateless: every call is independent, nothing is retried, and camera moves
/// are not awaited.
pub struct NavigationController<'a, S: SceneCollaborator + ?Sized> {
    scene: &'a S,
    registry: &'a LocationRegistry,
    config: &'a NavigationConfig,
}

impl<'a, S: SceneCollaborator + ?Sized> NavigationController<'a, S> {
    /// Creates a new controller.
    pub fn new(scene: &'a S, registry: &'a LocationRegistry, config: &'a NavigationConfig) -> Self {
        Self {
            scene,
            registry,
            config,
        }
    }

    /// Requests a camera move and returns without waiting for it to finish.
    pub fn navigate_to(&self, target: NavigationTarget) {
        log::debug!(
            "Navigating to ({}, {}), zoom {}, tilt {}",
            target.coordinate.to_lonlat()[0],
            target.coordinate.to_lonlat()[1],
            target.zoom,
            target.tilt
        );
        self.scene.animate_camera_to(target);
    }

    /// Flies to the feature under `point`.
    ///
    /// Uses the geometry of the topmost hit. Returns [`GlobeError::NoFeatureHit`] without moving
    /// the camera if nothing is under the pointer.
    pub async fn handle_click(&self, point: ScreenPoint) -> Result<NavigationTarget, GlobeError> {
        let hits = self.scene.hit_test(point).await;
        let Some(hit) = hits.into_iter().next() else {
            return Err(GlobeError::NoFeatureHit);
        };

        let target = self.config.click_target(hit.geometry);
        self.navigate_to(target);
        Ok(target)
    }

    /// Flies to the place named exactly `name`.
    ///
    /// Returns [`GlobeError::LocationNotFound`] without moving the camera if there is no such place.
    pub fn search(&self, name: &str) -> Result<NavigationTarget, GlobeError> {
        let record = self.registry.lookup(name)?;
        let target = self.config.search_target(record.coordinate());
        self.navigate_to(target);
        Ok(target)
    }
}
