//! Cityglobe shows a globe with city markers and lets the user fly to a city either by clicking
//! its marker or by typing its name into a search box.
//!
//! # Quick start
//!
//! ```no_run
//! use cityglobe::config::GlobeConfig;
//! use cityglobe::scene::{HeadlessScene, SceneEvent};
//! use cityglobe::search::Key;
//! use cityglobe::GlobeApp;
//!
//! # tokio_test::block_on(async {
//! let config = GlobeConfig::default();
//! let scene = HeadlessScene::new(config.view.view_options().expect("valid position"));
//! let mut app = GlobeApp::from_config(config, scene, |message: &str| eprintln!("{message}"))
//!     .expect("default configuration is valid");
//!
//! app.init();
//! app.handle_event(SceneEvent::Ready).await.expect("ready never fails");
//! for c in "Denver".chars() {
//!     app.handle_event(SceneEvent::Key(Key::Char(c))).await.ok();
//! }
//! app.handle_event(SceneEvent::Key(Key::Enter)).await.ok();
//! # });
//! ```
//!
//! # Main components
//!
//! * [`LocationRegistry`](registry::LocationRegistry) is an ordered, immutable table of named
//!   places. Lookups are exact and case-sensitive.
//! * [`MarkerProjector`](marker::MarkerProjector) turns every place into a
//!   [`MarkerFeature`](marker::MarkerFeature) with a unique object id, display fields and style.
//! * [`NavigationController`](navigation::NavigationController) resolves a click or a search
//!   into a [`NavigationTarget`](navigation::NavigationTarget) and asks the scene to fly there.
//! * [`SearchBox`](search::SearchBox) is the one-line text input that feeds the controller.
//! * [`console`] parses terminal commands and runs them against a [`GlobeApp`].
//! * [`GlobeApp`] is the application context which owns all of the above together with the
//!   scene and dispatches [`SceneEvent`](scene::SceneEvent)s to them.
//!
//! Everything that has to do with actually drawing the globe is behind the
//! [`SceneCollaborator`](scene::SceneCollaborator) trait. The crate ships a
//! [`HeadlessScene`](scene::HeadlessScene) implementation that keeps the camera state,
//! clusters markers in screen space and answers hit-tests without rendering anything.

#![warn(clippy::unwrap_used)]
#![warn(missing_docs)]

mod app;
mod color;
pub mod config;
pub mod console;
pub mod easing;
pub mod error;
pub mod marker;
pub mod navigation;
pub mod registry;
pub mod scene;
pub mod search;

#[cfg(test)]
mod tests;

pub use app::GlobeApp;
pub use color::Color;
pub use easing::Easing;
pub use error::GlobeError;

// Reexport cityglobe_types
pub use cityglobe_types;
