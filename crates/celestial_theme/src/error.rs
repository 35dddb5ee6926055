use thiserror::Error;

use crate::theme::ThemeMode;

/// Theme catalog could not be loaded. Fatal at startup.
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("theme catalog is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("theme catalog is not valid TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("failed to read theme catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("theme catalog defines no themes")]
    Empty,

    #[error("theme id must not be empty")]
    EmptyId,
}

/// Recoverable theme selection failures. State is never changed when
/// one of these is returned.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ThemeError {
    #[error("theme \"{0}\" not found")]
    UnknownTheme(String),

    #[error("no theme available for {0} mode")]
    NoThemeForMode(ThemeMode),
}

/// Preference storage failure. Always recovered as "no preference".
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("preference storage unavailable: {0}")]
    Unavailable(String),

    #[error("preference storage I/O: {0}")]
    Io(#[from] std::io::Error),

    #[error("preference storage is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}
