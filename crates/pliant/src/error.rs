//! Error types for tree building and XML conversion.

use thiserror::Error;

/// Errors that can occur when building, indexing or converting a tree.
#[derive(Debug, Error)]
pub enum Error {
    /// Positional index outside the children of a node.
    #[error("index {index} out of range (children: {len})")]
    OutOfRange { index: usize, len: usize },

    /// Conversion requested for a format tag that is not supported.
    #[error("unsupported format: {0:?}")]
    UnsupportedFormat(String),

    /// Input text could not be parsed as XML.
    #[error("malformed markup at byte {position}: {message}")]
    MalformedMarkup { position: u64, message: String },

    /// Empty or otherwise invalid element or attribute name.
    #[error("invalid name: {0:?}")]
    InvalidName(String),

    /// A record field held something other than a scalar.
    #[error("record field {field:?} is not a scalar")]
    NonScalarField { field: String },

    /// A record could not be built from the supplied value.
    #[error("record error: {0}")]
    Record(String),

    /// I/O error while reading or writing markup.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn malformed(position: u64, message: impl Into<String>) -> Self {
        Error::MalformedMarkup {
            position,
            message: message.into(),
        }
    }
}

/// Result type for tree operations.
pub type Result<T> = std::result::Result<T, Error>;
