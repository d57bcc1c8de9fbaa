//! Error types for Pulse

use thiserror::Error;

/// The main error type for Pulse operations
#[derive(Debug, Error)]
pub enum PulseError {
    #[error("Entity not found: {0}")]
    EntityNotFound(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Scene error: {0}")]
    SceneError(String),

    #[error("Script error: {0}")]
    ScriptError(String),

    #[error("Input error: {0}")]
    InputError(String),

    #[error("Render error: {0}")]
    RenderError(String),

    #[error("Behavior '{component}' failed: {message}")]
    BehaviorError { component: String, message: String },
}

impl PulseError {
    /// Shorthand for a failure raised from inside a component update
    pub fn behavior(component: impl Into<String>, message: impl Into<String>) -> Self {
        PulseError::BehaviorError {
            component: component.into(),
            message: message.into(),
        }
    }
}

/// Result type alias for Pulse operations
pub type Result<T> = std::result::Result<T, PulseError>;

impl From<toml::de::Error> for PulseError {
    fn from(err: toml::de::Error) -> Self {
        PulseError::TomlParseError(err.to_string())
    }
}
