//! The scene collaborator: whatever draws the globe, clusters the markers, answers hit-tests and
//! animates the camera.
//!
//! The application talks to the scene only through the [`SceneCollaborator`] trait, and receives
//! user input from it as [`SceneEvent`]s. [`HeadlessScene`] is an in-process implementation that
//! keeps all the state but draws nothing.

use async_trait::async_trait;
use cityglobe_types::geo::GeoPoint2d;
use cityglobe_types::screen::ScreenPoint;
use cityglobe_types::Size;

use crate::marker::{MarkerFeature, ObjectId, PopupContent};
use crate::navigation::NavigationTarget;
use crate::search::Key;

mod camera;
mod cluster;
mod headless;

pub use camera::{Camera, MAX_TILT, MAX_ZOOM, MIN_ZOOM, ZOOM_0_RESOLUTION};
pub use headless::{HeadlessScene, DEFAULT_ANIMATION_DURATION};

/// Rendering backend of the globe.
///
/// All methods take `&self`: implementations keep their state behind interior mutability so that
/// the application can hold the scene while handing out references to it.
#[async_trait]
pub trait SceneCollaborator: Send + Sync {
    /// Adds a point layer to the scene.
    fn add_layer(&self, layer: PointLayerSpec);

    /// Returns the features under the given screen point, topmost first.
    async fn hit_test(&self, point: ScreenPoint) -> Vec<HitResult>;

    /// Starts an animated camera move. Returns immediately; the scene owns the animation.
    ///
    /// A new request replaces the animation in progress.
    fn animate_camera_to(&self, target: NavigationTarget);

    /// Sets the zoom level of the camera without animation.
    fn set_zoom(&self, zoom: f64);

    /// Current camera.
    fn camera(&self) -> Camera;
}

/// Display options of the scene, given when the view is created.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewOptions {
    /// Id of the element the scene is drawn into.
    pub container_id: String,
    /// Camera at creation time.
    pub initial_camera: Camera,
    /// Size of the viewport in pixels.
    pub viewport: Size,
    /// Name of the basemap.
    pub basemap: String,
    /// Url of the elevation service used for the ground surface.
    pub elevation_url: Option<String>,
    /// Popups are docked to the side of the view instead of pointing at the feature.
    pub popup_docked: bool,
    /// Sun shadows are drawn.
    pub direct_shadows: bool,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            container_id: "map".to_string(),
            initial_camera: Camera::default(),
            viewport: Size::new(1280.0, 720.0),
            basemap: "hybrid".to_string(),
            elevation_url: None,
            popup_docked: true,
            direct_shadows: false,
        }
    }
}

/// A layer of point markers.
#[derive(Debug, Clone, PartialEq)]
pub struct PointLayerSpec {
    /// Id of the layer, reported in hit results.
    pub id: String,
    /// Features of the layer.
    pub features: Vec<MarkerFeature>,
    /// Markers closer than this many pixels to each other are drawn as one cluster. Zero disables
    /// clustering.
    pub cluster_radius: f64,
}

/// What was hit by a hit-test.
#[derive(Debug, Clone, PartialEq)]
pub enum HitTarget {
    /// A single marker.
    Feature(ObjectId),
    /// A cluster of markers.
    Cluster(Vec<ObjectId>),
}

/// One entry of a hit-test response.
#[derive(Debug, Clone, PartialEq)]
pub struct HitResult {
    /// Layer the hit symbol belongs to.
    pub layer_id: String,
    /// Geometry of the hit symbol: the marker position or the cluster centroid.
    pub geometry: GeoPoint2d,
    /// Hit feature or cluster.
    pub target: HitTarget,
    /// Popup for the hit symbol.
    pub popup: PopupContent,
}

/// Event delivered by the scene to the application.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneEvent {
    /// The view finished loading.
    Ready,
    /// The user clicked at the screen point.
    Click(ScreenPoint),
    /// A key was pressed while the search box had focus.
    Key(Key),
}
