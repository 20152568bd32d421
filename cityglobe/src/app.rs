use cityglobe_types::screen::ScreenPoint;

use crate::config::GlobeConfig;
use crate::error::GlobeError;
use crate::marker::PopupContent;
use crate::navigation::{NavigationController, NavigationTarget};
use crate::registry::LocationRegistry;
use crate::scene::{PointLayerSpec, SceneCollaborator, SceneEvent};
use crate::search::{KeyOutcome, Notifier, SearchBox};

/// Application context.
///
/// Constructed once at start-up, owns the registry, the search box, the scene and the notifier,
/// and routes [`SceneEvent`]s to them.
pub struct GlobeApp<S, N> {
    config: GlobeConfig,
    registry: LocationRegistry,
    search_box: SearchBox,
    scene: S,
    notifier: N,
}

impl<S: SceneCollaborator, N: Notifier> GlobeApp<S, N> {
    /// Creates a new application context.
    pub fn new(config: GlobeConfig, registry: LocationRegistry, scene: S, notifier: N) -> Self {
        let search_box = SearchBox::new(config.search.clone());
        Self {
            config,
            registry,
            search_box,
            scene,
            notifier,
        }
    }

    /// Validates the configuration and creates a context with the registry it describes.
    pub fn from_config(config: GlobeConfig, scene: S, notifier: N) -> Result<Self, GlobeError> {
        config.validate()?;
        let registry = config.registry()?;
        Ok(Self::new(config, registry, scene, notifier))
    }

    /// Creates the marker layer and hands it to the scene.
    pub fn init(&self) {
        let features = self.config.markers.projector().project_all(&self.registry);
        log::info!(
            "Adding {} city markers to layer '{}'",
            features.len(),
            self.config.markers.layer_id
        );

        self.scene.add_layer(PointLayerSpec {
            id: self.config.markers.layer_id.clone(),
            features,
            cluster_radius: self.config.markers.cluster_radius,
        });
    }

    /// Navigation controller working on this context's scene and registry.
    pub fn controller(&self) -> NavigationController<'_, S> {
        NavigationController::new(&self.scene, &self.registry, &self.config.navigation)
    }

    /// Handles an event from the scene. Returns the camera move it caused, if any.
    ///
    /// Clicks on empty space and unknown search terms are not errors: the first is ignored, the
    /// second is reported through the notifier.
    pub async fn handle_event(
        &mut self,
        event: SceneEvent,
    ) -> Result<Option<NavigationTarget>, GlobeError> {
        match event {
            SceneEvent::Ready => {
                log::debug!("View is ready, zooming to {}", self.config.view.initial_zoom);
                self.scene.set_zoom(self.config.view.initial_zoom);
                Ok(None)
            }
            SceneEvent::Click(point) => match self.controller().handle_click(point).await {
                Ok(target) => Ok(Some(target)),
                Err(GlobeError::NoFeatureHit) => Ok(None),
                Err(err) => Err(err),
            },
            SceneEvent::Key(key) => match self.search_box.handle_key(key) {
                KeyOutcome::Submitted(query) => {
                    self.search_box
                        .submit(&query, &self.controller(), &self.notifier)
                }
                KeyOutcome::Edited | KeyOutcome::Ignored => Ok(None),
            },
        }
    }

    /// Popup of the topmost symbol under `point`.
    pub async fn popup_at(&self, point: ScreenPoint) -> Option<PopupContent> {
        self.scene
            .hit_test(point)
            .await
            .into_iter()
            .next()
            .map(|hit| hit.popup)
    }

    /// Configuration the context was created with.
    pub fn config(&self) -> &GlobeConfig {
        &self.config
    }

    /// Places shown on the globe.
    pub fn registry(&self) -> &LocationRegistry {
        &self.registry
    }

    /// The search box.
    pub fn search_box(&self) -> &SearchBox {
        &self.search_box
    }

    /// The scene.
    pub fn scene(&self) -> &S {
        &self.scene
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use cityglobe_types::lonlat;

    use super::*;
    use crate::easing::Easing;
    use crate::scene::{Camera, HeadlessScene, ViewOptions};
    use crate::search::Key;
    use crate::tests::{RecordingNotifier, RecordingScene};

    fn type_and_submit<S: SceneCollaborator, N: Notifier>(
        app: &mut GlobeApp<S, N>,
        text: &str,
    ) -> Result<Option<NavigationTarget>, GlobeError> {
        tokio_test::block_on(async {
            for c in text.chars() {
                app.handle_event(SceneEvent::Key(Key::Char(c))).await?;
            }
            app.handle_event(SceneEvent::Key(Key::Enter)).await
        })
    }

    #[test]
    fn init_adds_marker_layer() {
        let scene = RecordingScene::default();
        let notifications = RecordingNotifier::default();
        let app = GlobeApp::from_config(GlobeConfig::default(), scene, notifications.notifier())
            .unwrap();
        app.init();

        let layers = app.scene().layers();
        assert_eq!(layers.len(), 1);
        assert_eq!(layers[0].id, "cities");
        assert_eq!(layers[0].cluster_radius, 80.0);
        let names: Vec<_> = layers[0].features.iter().map(|f| f.name()).collect();
        assert_eq!(names, ["Denver", "Cheyenne", "Casper", "Laramie"]);
    }

    #[test]
    fn ready_sets_initial_zoom() {
        let scene = RecordingScene::default();
        let notifications = RecordingNotifier::default();
        let mut app =
            GlobeApp::from_config(GlobeConfig::default(), scene, notifications.notifier())
                .unwrap();

        let result = tokio_test::block_on(app.handle_event(SceneEvent::Ready)).unwrap();
        assert_eq!(result, None);
        assert_eq!(app.scene().zooms(), [4.0]);
    }

    #[test]
    fn search_denver_via_enter() {
        let scene = RecordingScene::default();
        let notifications = RecordingNotifier::default();
        let mut app =
            GlobeApp::from_config(GlobeConfig::default(), scene, notifications.notifier())
                .unwrap();

        let target = type_and_submit(&mut app, "Denver").unwrap();

        let expected = NavigationTarget::new(lonlat!(-104.9903, 39.7392), 10.0, 45.0);
        assert_eq!(target, Some(expected));
        assert_eq!(app.scene().moves(), [expected]);
        assert!(notifications.messages().is_empty());
    }

    #[test]
    fn search_atlantis_alerts_once() {
        let scene = RecordingScene::default();
        let notifications = RecordingNotifier::default();
        let mut app =
            GlobeApp::from_config(GlobeConfig::default(), scene, notifications.notifier())
                .unwrap();

        let target = type_and_submit(&mut app, "Atlantis").unwrap();

        assert_eq!(target, None);
        assert_eq!(notifications.messages(), ["City not found in list."]);
        assert!(app.scene().moves().is_empty());
    }

    #[test]
    fn search_is_case_sensitive() {
        let scene = RecordingScene::default();
        let notifications = RecordingNotifier::default();
        let mut app =
            GlobeApp::from_config(GlobeConfig::default(), scene, notifications.notifier())
                .unwrap();

        type_and_submit(&mut app, "denver").unwrap();
        assert_eq!(notifications.messages().len(), 1);
        assert!(app.scene().moves().is_empty());
    }

    #[test]
    fn whitespace_is_trimmed_before_search() {
        let scene = RecordingScene::default();
        let notifications = RecordingNotifier::default();
        let mut app =
            GlobeApp::from_config(GlobeConfig::default(), scene, notifications.notifier())
                .unwrap();

        let target = type_and_submit(&mut app, "  Casper ").unwrap();
        assert_eq!(target.map(|t| t.coordinate), Some(lonlat!(-106.3131, 42.8666)));
        assert_eq!(app.search_box().value(), "  Casper ");
    }

    #[test]
    fn click_on_feature() {
        let point = lonlat!(-104.8202, 41.1399);
        let scene = RecordingScene::with_hits(vec![RecordingScene::feature_hit(2, point)]);
        let notifications = RecordingNotifier::default();
        let mut app =
            GlobeApp::from_config(GlobeConfig::default(), scene, notifications.notifier())
                .unwrap();

        let target = tokio_test::block_on(
            app.handle_event(SceneEvent::Click(ScreenPoint::new(100.0, 100.0))),
        )
        .unwrap();

        let expected = NavigationTarget::new(point, 12.0, 60.0)
            .with_duration(Duration::from_millis(1500))
            .with_easing(Easing::InOutCubic);
        assert_eq!(target, Some(expected));
        assert_eq!(app.scene().moves(), [expected]);
    }

    #[test]
    fn click_on_empty_space_is_ignored() {
        let scene = RecordingScene::default();
        let notifications = RecordingNotifier::default();
        let mut app =
            GlobeApp::from_config(GlobeConfig::default(), scene, notifications.notifier())
                .unwrap();

        let target = tokio_test::block_on(
            app.handle_event(SceneEvent::Click(ScreenPoint::new(100.0, 100.0))),
        )
        .unwrap();

        assert_eq!(target, None);
        assert!(app.scene().moves().is_empty());
        assert!(notifications.messages().is_empty());
    }

    #[test]
    fn headless_click_flies_to_marker() {
        let mut config = GlobeConfig::default();
        config.view.viewport = cityglobe_types::Size::new(800.0, 600.0);
        let scene = HeadlessScene::new(ViewOptions {
            initial_camera: Camera::new(lonlat!(-104.9903, 39.7392), 8.0),
            ..config.view.view_options().unwrap()
        });
        let notifications = RecordingNotifier::default();
        let mut app = GlobeApp::from_config(config, scene, notifications.notifier()).unwrap();
        app.init();

        let denver = lonlat!(-104.9903, 39.7392);
        let position = app.scene().screen_position(&denver).unwrap();
        let popup = tokio_test::block_on(app.popup_at(position)).unwrap();
        assert_eq!(popup.title, "Denver");

        let target =
            tokio_test::block_on(app.handle_event(SceneEvent::Click(position))).unwrap();
        assert_eq!(target.map(|t| t.coordinate), Some(denver));

        app.scene().advance(Duration::from_millis(1500));
        let camera = app.scene().camera();
        assert_eq!(camera.center(), denver);
        assert_eq!(camera.zoom(), 12.0);
        assert_eq!(camera.tilt(), 60.0);
    }

    #[test]
    fn headless_search_flies_to_city() {
        let config = GlobeConfig::default();
        let scene = HeadlessScene::new(config.view.view_options().unwrap());
        let notifications = RecordingNotifier::default();
        let mut app = GlobeApp::from_config(config, scene, notifications.notifier()).unwrap();
        app.init();
        tokio_test::block_on(app.handle_event(SceneEvent::Ready)).unwrap();
        assert_eq!(app.scene().camera().zoom(), 4.0);

        type_and_submit(&mut app, "Cheyenne").unwrap();
        assert!(app.scene().is_animating());
        assert_eq!(
            app.scene().target_camera().center(),
            lonlat!(-104.8202, 41.1399)
        );
    }
}
