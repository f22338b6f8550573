use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MonitorError {
    #[error("Failed to read monitor config {}: {source}", .path.display())]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write monitor config {}: {source}", .path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse monitor config {}: {source}", .path.display())]
    ParseFailed {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to serialize monitor config: {0}")]
    SerializeFailed(#[from] toml::ser::Error),

    #[error("Invalid host: {0}")]
    InvalidHost(String),

    #[error("Invalid setting: {0}")]
    InvalidSetting(String),

    #[error("No default location available for the monitor config")]
    ConfigPathUnavailable,
}
