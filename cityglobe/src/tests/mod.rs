use async_trait::async_trait;
use cityglobe_types::geo::GeoPoint2d;
use cityglobe_types::screen::ScreenPoint;
use parking_lot::Mutex;

use crate::marker::{ObjectId, PopupContent};
use crate::navigation::NavigationTarget;
use crate::scene::{Camera, HitResult, HitTarget, PointLayerSpec, SceneCollaborator};
use crate::search::Notifier;

/// Scene that answers hit-tests with canned results and records every request.
#[derive(Default)]
pub struct RecordingScene {
    hits: Vec<HitResult>,
    hit_tests: Mutex<Vec<ScreenPoint>>,
    moves: Mutex<Vec<NavigationTarget>>,
    layers: Mutex<Vec<PointLayerSpec>>,
    zooms: Mutex<Vec<f64>>,
}

impl RecordingScene {
    pub fn with_hits(hits: Vec<HitResult>) -> Self {
        Self {
            hits,
            ..Default::default()
        }
    }

    pub fn feature_hit(object_id: ObjectId, geometry: GeoPoint2d) -> HitResult {
        HitResult {
            layer_id: "cities".to_string(),
            geometry,
            target: HitTarget::Feature(object_id),
            popup: PopupContent {
                title: format!("Feature {object_id}"),
                fields: vec![],
            },
        }
    }

    pub fn moves(&self) -> Vec<NavigationTarget> {
        self.moves.lock().clone()
    }

    pub fn hit_tests(&self) -> Vec<ScreenPoint> {
        self.hit_tests.lock().clone()
    }

    pub fn layers(&self) -> Vec<PointLayerSpec> {
        self.layers.lock().clone()
    }

    pub fn zooms(&self) -> Vec<f64> {
        self.zooms.lock().clone()
    }
}

#[async_trait]
impl SceneCollaborator for RecordingScene {
    fn add_layer(&self, layer: PointLayerSpec) {
        self.layers.lock().push(layer);
    }

    async fn hit_test(&self, point: ScreenPoint) -> Vec<HitResult> {
        self.hit_tests.lock().push(point);
        self.hits.clone()
    }

    fn animate_camera_to(&self, target: NavigationTarget) {
        self.moves.lock().push(target);
    }

    fn set_zoom(&self, zoom: f64) {
        self.zooms.lock().push(zoom);
    }

    fn camera(&self) -> Camera {
        Camera::default()
    }
}

/// Stores alert messages instead of showing them.
#[derive(Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn notifier(&self) -> impl Notifier + '_ {
        |message: &str| self.messages.lock().push(message.to_string())
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().clone()
    }
}
