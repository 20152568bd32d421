//! Terminal driver for the globe.
//!
//! Runs the application against a [`HeadlessScene`] and reads [`console`] commands from stdin.
//!
//! ```shell
//! cargo run --features cli --bin cityglobe -- ./globe.json
//! ```

use anyhow::Result;
use cityglobe::config::GlobeConfig;
use cityglobe::console;
use cityglobe::scene::{HeadlessScene, SceneEvent};
use cityglobe::GlobeApp;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args().nth(1) {
        Some(path) => GlobeConfig::load(path)?,
        None => GlobeConfig::default(),
    };

    let scene = HeadlessScene::new(config.view.view_options()?);
    let mut app = GlobeApp::from_config(config, scene, |message: &str| {
        eprintln!("ALERT: {message}")
    })?;

    app.init();
    app.handle_event(SceneEvent::Ready).await?;

    console::run(&mut app, std::io::stdin().lock(), std::io::stdout()).await?;

    Ok(())
}
