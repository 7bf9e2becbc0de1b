//! Error types for markdown/notebook slide conversion.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during slide conversion.
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to open or read the input document.
    #[error("Failed to read document: {0}")]
    Io(#[from] std::io::Error),

    /// An opening `-skip-` marker with no matching closing marker.
    ///
    /// Fatal to the conversion of the whole document: the scanner must
    /// not run past the end of input looking for the closing marker.
    #[error("Skip span opened at byte {offset} has no closing '-skip-' marker")]
    MalformedSkipSpan {
        /// Byte offset of the opening marker within its markdown chunk.
        offset: usize,
    },

    /// A code fence carried an `n` attribute that is not an integer.
    #[error("Invalid execution count attribute: {0:?}")]
    InvalidExecutionCount(String),

    /// The notebook container could not be parsed or written.
    #[error("Notebook JSON error: {0}")]
    NotebookJson(String),

    /// The document format is not supported or could not be detected.
    #[error("Unsupported or unrecognized document format: {0}")]
    UnsupportedFormat(String),
}
