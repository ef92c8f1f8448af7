//! Error types for the alert notifier

/// Errors raised while reading a typed value out of a channel's settings
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingError {
    #[error("Could not find {0} property in settings")]
    Missing(String),

    #[error("Invalid {0} property in settings")]
    Invalid(String),
}

impl SettingError {
    /// The settings key the error refers to
    pub fn key(&self) -> &str {
        match self {
            SettingError::Missing(key) | SettingError::Invalid(key) => key,
        }
    }
}

/// Errors that can occur in the alert notifier
#[derive(Debug, thiserror::Error)]
pub enum NotifierError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Setting error: {0}")]
    Setting(#[from] SettingError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for alert notifier operations
pub type Result<T> = std::result::Result<T, NotifierError>;
