//! Store error types.

use std::path::PathBuf;

use sdcard_ingest::IngestError;
use sdcard_model::{ModelError, SequenceId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// File I/O error.
    #[error("failed to {operation} {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The temp file was written but could not replace the target.
    #[error("failed to replace {target_path}")]
    AtomicWriteFailed {
        temp_path: PathBuf,
        target_path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} has schema version {found}, newest supported is {max_supported}")]
    UnsupportedVersion {
        found: u32,
        max_supported: u32,
        path: PathBuf,
    },

    #[error("failed to serialize {path}")]
    Serialization {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to parse {path}")]
    Deserialization {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize settings")]
    SettingsSerialization(#[from] toml::ser::Error),

    #[error("could not determine the settings directory")]
    NoSettingsDirectory,

    #[error("no sequence matches {0}")]
    UnknownSequence(String),

    #[error("{prefix} matches {count} sequences")]
    AmbiguousSequence { prefix: String, count: usize },

    #[error("unknown category: {0}")]
    UnknownCategory(String),

    #[error("unknown tag: {0}")]
    UnknownTag(String),

    #[error("{option} is not an option of category {category}")]
    UnknownOption { category: String, option: String },

    #[error("a definition named {0} already exists")]
    DuplicateName(String),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Ingest(#[from] IngestError),
}

impl StoreError {
    pub(crate) fn unknown_sequence(id: &SequenceId) -> Self {
        Self::UnknownSequence(id.to_string())
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;
