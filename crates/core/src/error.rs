//! Error types for folio operations.

use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by compilation and by the model store.
///
/// Unresolvable style values and malformed media nodes are not errors; the
/// compiler recovers from those locally by leaving them out of the model.
#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("no stored model at {}", .0.display())]
    NotFound(PathBuf),
}

pub type Result<T> = std::result::Result<T, Error>;
