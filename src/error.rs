// Error types for forgelist.
// Covers forge fetches, cache and project files, README markers, and subprocesses.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ForgeListError {
    #[error("Forge request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{url} returned {status}")]
    Status { url: String, status: u16 },

    #[error("Invalid selector {selector}: {reason}")]
    Selector { selector: String, reason: String },

    #[error("Marker layout in {path} not supported: {reason}")]
    Markers { path: PathBuf, reason: String },

    #[error("Invalid folder pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ForgeListError>;
