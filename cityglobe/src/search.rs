//! One-line search box.
//!
//! The box collects typed characters and, when the user presses Enter, hands the trimmed text to
//! the search path of the [`NavigationController`]. Unknown names are reported to the user through
//! a [`Notifier`].

use serde::{Deserialize, Serialize};

use crate::error::GlobeError;
use crate::navigation::{NavigationController, NavigationTarget};
use crate::scene::SceneCollaborator;

/// Shows a blocking message to the user.
pub trait Notifier {
    /// Shows the message and returns after the user dismissed it.
    fn alert(&self, message: &str);
}

impl<T: Fn(&str)> Notifier for T {
    fn alert(&self, message: &str) {
        self(message)
    }
}

/// Key press delivered to the search box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Printable character.
    Char(char),
    /// Deletes the last character.
    Backspace,
    /// Clears the input.
    Escape,
    /// Submits the input.
    Enter,
}

/// Result of a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    /// The value of the box changed.
    Edited,
    /// The key did not change anything.
    Ignored,
    /// Enter was pressed with a non-empty value. Contains the trimmed value.
    Submitted(String),
}

/// Configuration of the search box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Id of the input element.
    pub element_id: String,
    /// Text shown while the box is empty.
    pub placeholder: String,
    /// Message shown when the name is not in the registry.
    pub not_found_message: String,
    /// Distance from the top of the viewport in pixels. The box is centered horizontally.
    pub top_offset: f64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            element_id: "citySearch".to_string(),
            placeholder: "Enter city name".to_string(),
            not_found_message: "City not found in list.".to_string(),
            top_offset: 20.0,
        }
    }
}

/// State of the search input.
#[derive(Debug, Clone)]
pub struct SearchBox {
    config: SearchConfig,
    value: String,
}

impl SearchBox {
    /// Creates an empty search box.
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            value: String::new(),
        }
    }

    /// Id of the input element.
    pub fn element_id(&self) -> &str {
        &self.config.element_id
    }

    /// Placeholder text.
    pub fn placeholder(&self) -> &str {
        &self.config.placeholder
    }

    /// Distance from the top of the viewport in pixels.
    pub fn top_offset(&self) -> f64 {
        self.config.top_offset
    }

    /// Current text of the box.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Replaces the text of the box.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    /// Applies a key press. Only [`Key::Enter`] submits; there is no incremental matching.
    pub fn handle_key(&mut self, key: Key) -> KeyOutcome {
        match key {
            Key::Char(c) if !c.is_control() => {
                self.value.push(c);
                KeyOutcome::Edited
            }
            Key::Char(_) => KeyOutcome::Ignored,
            Key::Backspace => match self.value.pop() {
                Some(_) => KeyOutcome::Edited,
                None => KeyOutcome::Ignored,
            },
            Key::Escape if self.value.is_empty() => KeyOutcome::Ignored,
            Key::Escape => {
                self.value.clear();
                KeyOutcome::Edited
            }
            Key::Enter => match self.value.trim() {
                "" => KeyOutcome::Ignored,
                query => KeyOutcome::Submitted(query.to_string()),
            },
        }
    }

    /// Runs the search path for a submitted query.
    ///
    /// Unknown names produce exactly one alert and no camera move; they are reported to the
    /// caller as `Ok(None)`.
    pub fn submit<S: SceneCollaborator + ?Sized>(
        &self,
        query: &str,
        controller: &NavigationController<'_, S>,
        notifier: &impl Notifier,
    ) -> Result<Option<NavigationTarget>, GlobeError> {
        match controller.search(query) {
            Ok(target) => Ok(Some(target)),
            Err(GlobeError::LocationNotFound(_)) => {
                notifier.alert(&self.config.not_found_message);
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }
}

impl Default for SearchBox {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}
