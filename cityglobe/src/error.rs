//! Error types used by the crate.

use cityglobe_types::GlobeTypesError;
use thiserror::Error;

/// Cityglobe error type.
#[derive(Debug, Error)]
pub enum GlobeError {
    /// Search term is not in the location registry.
    #[error("location not found: {0}")]
    LocationNotFound(String),
    /// A click did not hit any rendered feature.
    #[error("no feature under the pointer")]
    NoFeatureHit,
    /// Two places with the same name were given to the registry.
    #[error("duplicate place name: {0}")]
    DuplicatePlace(String),
    /// Console command could not be parsed.
    #[error("invalid command: {0}")]
    Command(String),
    /// Configuration value is out of range or malformed.
    #[error("invalid configuration: {0}")]
    Config(String),
    /// Place coordinate is not valid.
    #[error(transparent)]
    Coordinate(#[from] GlobeTypesError),
    /// Error reading the configuration file or console input.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Error parsing the configuration file.
    #[error("failed to parse configuration: {0}")]
    Json(#[from] serde_json::Error),
}
