use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::types::DocumentId;

/// Error type for configuration, distance, IO, and persistence failures.
#[derive(Debug, Error)]
pub enum TripletError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("document '{document_id}' has no categories; distance is undefined")]
    DegenerateInput { document_id: DocumentId },
    #[error("output '{}' already exists", path.display())]
    OutputConflict { path: PathBuf },
    #[error("metadata at '{}' is unavailable: {reason}", path.display())]
    MetadataUnavailable { path: PathBuf, reason: String },
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}
