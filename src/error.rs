//! Error types for the wallet settings layer

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse settings file: {0}")]
    Deserialize(#[from] toml::de::Error),

    #[error("Failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Settings store error: {0}")]
    Store(String),
}

/// Convenience alias used across the crate
pub type Result<T> = std::result::Result<T, SettingsError>;
