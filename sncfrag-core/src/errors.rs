use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Can't read file: {0}")]
    FileReadError(String),

    #[error("Error parsing region: {0}")]
    RegionParseError(String),

    #[error("Error parsing annotation: {0}")]
    AnnotationParseError(String),

    #[error("Error parsing name link: {0}")]
    LinkParseError(String),

    #[error("Corrupted file. 0 regions found in the file: {0}")]
    EmptyRegionList(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Errors raised by implementations of [crate::traits::ReadSource].
#[derive(Error, Debug)]
pub enum ReadSourceError {
    #[error("Alignment file not found: {0}")]
    MissingFile(String),

    #[error("Couldn't index alignment file {path}: {reason}")]
    IndexFailed { path: String, reason: String },

    #[error("Region can't be queried: {0}")]
    InvalidRegion(String),

    #[error("Malformed read record: {0}")]
    MalformedRecord(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
