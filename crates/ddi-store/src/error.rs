//! Error types for collection loading and querying.

use std::path::PathBuf;

use ddi_model::{Kind, ModelError};
use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StoreError {
    /// Data directory not found.
    #[error("data directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    #[error("failed to read file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse JSON {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("collection {path} must be a JSON array")]
    NotAnArray { path: PathBuf },

    #[error("invalid element {index} in {path}: {source}")]
    InvalidEntity {
        path: PathBuf,
        index: usize,
        #[source]
        source: ModelError,
    },

    #[error("duplicate {kind} identifier '{id}'")]
    DuplicateId { kind: Kind, id: String },

    #[error("failed to parse config {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid config {path}: {message}")]
    InvalidConfig { path: PathBuf, message: String },

    #[error("invalid query parameter {name}='{value}'")]
    InvalidQuery { name: String, value: String },
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;
