use std::io;
use thiserror::Error;

/// Error type for the sncfrag exporters.
#[derive(Error, Debug)]
pub enum ExportError {
    /// IO error occurred while writing.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Requested output format doesn't exist.
    #[error("Unknown output format '{0}', expected one of: {1}")]
    UnknownFormat(String, &'static str),

    /// Output directory could not be created.
    #[error("Failed to create parent directories for file: {0}")]
    ParentDirectoryCreation(String),
}

/// Result type alias for sncfrag-io export operations.
pub type Result<T> = std::result::Result<T, ExportError>;

/// Error type for loading reference sequences.
#[derive(Error, Debug)]
pub enum ReferenceError {
    #[error("Reference file could not be opened: {0}")]
    MissingFile(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Reference entry '{0}' occurs more than once")]
    DuplicateEntry(String),
}
