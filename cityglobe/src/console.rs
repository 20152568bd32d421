//! Line-oriented commands for driving a [`GlobeApp`] on a [`HeadlessScene`] from a terminal.
//!
//! Each input line is one [`Command`]:
//!
//! * `:click X Y` clicks at the screen point and flies to the marker under it, if any;
//! * `:popup X Y` prints the popup of the marker under the screen point;
//! * `:tick` advances the camera animation to the current time;
//! * `:camera` prints the current camera;
//! * `:quit` stops reading.
//!
//! Any other line is typed into the search box and submitted. A malformed command is reported
//! and skipped; it does not stop the session.

use std::io::{BufRead, Write};
use std::str::FromStr;

use cityglobe_types::screen::ScreenPoint;

use crate::error::GlobeError;
use crate::scene::{HeadlessScene, SceneCollaborator, SceneEvent};
use crate::search::{Key, Notifier};
use crate::GlobeApp;

/// One line of console input.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Click at a screen point.
    Click(ScreenPoint),
    /// Show the popup under a screen point.
    Popup(ScreenPoint),
    /// Advance the camera animation.
    Tick,
    /// Print the camera.
    Camera,
    /// Stop the session.
    Quit,
    /// Type the text into the search box and press Enter.
    Search(String),
}

impl FromStr for Command {
    type Err = GlobeError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let command = match words.next() {
            Some(":click") => Self::Click(parse_point(words)?),
            Some(":popup") => Self::Popup(parse_point(words)?),
            Some(":tick") => Self::Tick,
            Some(":camera") => Self::Camera,
            Some(":quit") => Self::Quit,
            _ => Self::Search(line.to_string()),
        };

        Ok(command)
    }
}

fn parse_point<'a>(mut words: impl Iterator<Item = &'a str>) -> Result<ScreenPoint, GlobeError> {
    let (Some(x), Some(y), None) = (words.next(), words.next(), words.next()) else {
        return Err(GlobeError::Command(
            "expected two screen coordinates: X Y".into(),
        ));
    };

    let coordinate = |value: &str| {
        value
            .parse::<f64>()
            .map_err(|_| GlobeError::Command(format!("'{value}' is not a number")))
    };

    Ok(ScreenPoint::new(coordinate(x)?, coordinate(y)?))
}

/// Runs a command. Returns the text to show to the user, if any.
///
/// [`Command::Quit`] does nothing here; stopping is up to the caller.
pub async fn execute<N: Notifier>(
    app: &mut GlobeApp<HeadlessScene, N>,
    command: Command,
) -> Result<Option<String>, GlobeError> {
    let reply = match command {
        Command::Click(point) => Some(
            match app.handle_event(SceneEvent::Click(point)).await? {
                Some(target) => format!("flying to {:?}", target.coordinate),
                None => "nothing there".to_string(),
            },
        ),
        Command::Popup(point) => Some(match app.popup_at(point).await {
            Some(popup) => popup.to_string(),
            None => "nothing there".to_string(),
        }),
        Command::Tick => Some(format!("animating: {}", app.scene().tick())),
        Command::Camera => Some(format!("{:?}", app.scene().camera())),
        Command::Quit => None,
        Command::Search(text) => {
            app.handle_event(SceneEvent::Key(Key::Escape)).await?;
            for c in text.chars() {
                app.handle_event(SceneEvent::Key(Key::Char(c))).await?;
            }
            app.handle_event(SceneEvent::Key(Key::Enter))
                .await?
                .map(|target| format!("flying to {:?}", target.coordinate))
        }
    };

    Ok(reply)
}

/// Reads commands from `input` until it ends or `:quit` is read, writing replies to `output`.
///
/// Command errors are written to `output` and the session goes on. Only I/O errors end it.
pub async fn run<N: Notifier>(
    app: &mut GlobeApp<HeadlessScene, N>,
    input: impl BufRead,
    mut output: impl Write,
) -> Result<(), GlobeError> {
    for line in input.lines() {
        let line = line?;
        let result = match line.parse::<Command>() {
            Ok(Command::Quit) => break,
            Ok(command) => execute(app, command).await,
            Err(err) => Err(err),
        };

        match result {
            Ok(Some(reply)) => writeln!(output, "{reply}")?,
            Ok(None) => {}
            Err(err) => {
                log::warn!("Command '{line}' failed: {err}");
                writeln!(output, "error: {err}")?;
            }
        }
    }

    Ok(())
}
