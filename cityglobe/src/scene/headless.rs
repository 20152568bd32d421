use std::time::Duration;

use async_trait::async_trait;
use cityglobe_types::geo::GeoPoint2d;
use cityglobe_types::screen::{PlanarPoint, ScreenPoint};
use cityglobe_types::Size;
use parking_lot::RwLock;
use web_time::SystemTime;

use crate::easing::Easing;
use crate::marker::PopupContent;
use crate::navigation::NavigationTarget;
use crate::scene::camera::Camera;
use crate::scene::cluster::{group_features, ScreenGroup};
use crate::scene::{HitResult, HitTarget, PointLayerSpec, SceneCollaborator, ViewOptions};

/// Duration of a camera move that does not specify one.
pub const DEFAULT_ANIMATION_DURATION: Duration = Duration::from_millis(1000);

/// Extra pixels around a marker that still count as a hit.
const HIT_TOLERANCE: f64 = 2.0;

/// Scene that keeps camera, layers and animation state without drawing anything.
///
/// The animation is advanced either by the wall clock with [`HeadlessScene::tick`] or by an
/// explicit time step with [`HeadlessScene::advance`].
pub struct HeadlessScene {
    options: ViewOptions,
    state: RwLock<SceneState>,
}

struct SceneState {
    camera: Camera,
    layers: Vec<PointLayerSpec>,
    animation: Option<AnimationParameters>,
}

struct AnimationParameters {
    start: Camera,
    end: Camera,
    start_time: SystemTime,
    elapsed: Duration,
    duration: Duration,
    easing: Easing,
}

impl HeadlessScene {
    /// Creates a new scene with the camera at `options.initial_camera`.
    pub fn new(options: ViewOptions) -> Self {
        log::info!(
            "Creating scene in '{}' with '{}' basemap, {}x{} px",
            options.container_id,
            options.basemap,
            options.viewport.width(),
            options.viewport.height()
        );

        let state = SceneState {
            camera: options.initial_camera,
            layers: vec![],
            animation: None,
        };

        Self {
            options,
            state: RwLock::new(state),
        }
    }

    /// Options the scene was created with.
    pub fn options(&self) -> &ViewOptions {
        &self.options
    }

    /// Size of the viewport in pixels.
    pub fn viewport(&self) -> Size {
        self.options.viewport
    }

    /// Camera the current animation ends with, or the current camera if there is no animation.
    pub fn target_camera(&self) -> Camera {
        let state = self.state.read();
        state
            .animation
            .as_ref()
            .map(|animation| animation.end)
            .unwrap_or(state.camera)
    }

    /// Returns true if a camera move is in progress.
    pub fn is_animating(&self) -> bool {
        self.state.read().animation.is_some()
    }

    /// Number of layers added to the scene.
    pub fn layer_count(&self) -> usize {
        self.state.read().layers.len()
    }

    /// Total number of features in all layers.
    pub fn feature_count(&self) -> usize {
        self.state
            .read()
            .layers
            .iter()
            .map(|layer| layer.features.len())
            .sum()
    }

    /// Screen position of a geographic point with the current camera.
    pub fn screen_position(&self, point: &GeoPoint2d) -> Option<ScreenPoint> {
        self.state
            .read()
            .camera
            .geo_to_screen(point, self.options.viewport)
    }

    /// Updates the camera by the time passed since the animation started. Returns true if the
    /// animation is still running.
    pub fn tick(&self) -> bool {
        let mut state = self.state.write();
        if let Some(animation) = &mut state.animation {
            animation.elapsed = SystemTime::now()
                .duration_since(animation.start_time)
                .unwrap_or_default();
        }

        Self::update_camera(&mut state)
    }

    /// Moves the animation forward by `delta`. Returns true if the animation is still running.
    pub fn advance(&self, delta: Duration) -> bool {
        let mut state = self.state.write();
        if let Some(animation) = &mut state.animation {
            animation.elapsed += delta;
        }

        Self::update_camera(&mut state)
    }

    fn update_camera(state: &mut SceneState) -> bool {
        let Some(animation) = &state.animation else {
            return false;
        };

        let k = if animation.duration.is_zero() {
            1.0
        } else {
            animation.elapsed.as_secs_f64() / animation.duration.as_secs_f64()
        };

        if k >= 1.0 {
            state.camera = animation.end;
            state.animation = None;
            false
        } else {
            state.camera = animation
                .start
                .interpolate(&animation.end, animation.easing.apply(k));
            true
        }
    }

    fn hits(&self, point: ScreenPoint) -> Vec<HitResult> {
        let state = self.state.read();
        let viewport = self.options.viewport;

        let mut results = vec![];
        for layer in state.layers.iter().rev() {
            let groups = group_features(
                &layer.features,
                &state.camera,
                viewport,
                layer.cluster_radius,
            );

            let mut layer_hits: Vec<(f64, HitResult)> = groups
                .into_iter()
                .filter_map(|group| {
                    let distance = group.screen_position.distance(&point);
                    let marker_radius = group.members[0].style().radius() + HIT_TOLERANCE;
                    let reach = if group.is_cluster() {
                        marker_radius.max(layer.cluster_radius / 2.0)
                    } else {
                        marker_radius
                    };

                    (distance <= reach).then(|| (distance, Self::hit_result(layer, group)))
                })
                .collect();

            layer_hits.sort_by(|a, b| a.0.total_cmp(&b.0));
            results.extend(layer_hits.into_iter().map(|(_, hit)| hit));
        }

        log::trace!(
            "Hit-test at ({:.1}, {:.1}) found {} symbols",
            point.x,
            point.y,
            results.len()
        );

        results
    }

    fn hit_result(layer: &PointLayerSpec, group: ScreenGroup) -> HitResult {
        let (target, popup) = match &group.members[..] {
            [feature] => (HitTarget::Feature(feature.object_id()), feature.popup()),
            members => {
                let names: Vec<&str> = members.iter().map(|f| f.name()).collect();
                (
                    HitTarget::Cluster(members.iter().map(|f| f.object_id()).collect()),
                    PopupContent {
                        title: format!("{} places", members.len()),
                        fields: vec![("Places".to_string(), names.join(", "))],
                    },
                )
            }
        };

        HitResult {
            layer_id: layer.id.clone(),
            geometry: group.geometry,
            target,
            popup,
        }
    }
}

#[async_trait]
impl SceneCollaborator for HeadlessScene {
    fn add_layer(&self, layer: PointLayerSpec) {
        log::debug!(
            "Adding layer '{}' with {} features",
            layer.id,
            layer.features.len()
        );
        self.state.write().layers.push(layer);
    }

    async fn hit_test(&self, point: ScreenPoint) -> Vec<HitResult> {
        self.hits(point)
    }

    fn animate_camera_to(&self, target: NavigationTarget) {
        let mut state = self.state.write();
        let start = state.camera;
        let end = start
            .with_center(target.coordinate)
            .with_zoom(target.zoom)
            .with_tilt(target.tilt);
        let duration = target.duration.unwrap_or(DEFAULT_ANIMATION_DURATION);

        if duration.is_zero() {
            state.camera = end;
            state.animation = None;
            return;
        }

        state.animation = Some(AnimationParameters {
            start,
            end,
            start_time: SystemTime::now(),
            elapsed: Duration::ZERO,
            duration,
            easing: target.easing.unwrap_or_default(),
        });
    }

    fn set_zoom(&self, zoom: f64) {
        let mut state = self.state.write();
        state.animation = None;
        state.camera = state.camera.with_zoom(zoom);
    }

    fn camera(&self) -> Camera {
        self.state.read().camera
    }
}
