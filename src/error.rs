//! Error types for judgment-parser.

use std::io;
use thiserror::Error;

/// Result type alias for judgment-parser operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while parsing and rendering a judgment.
///
/// Every variant is fatal for the document being processed. Ambiguous
/// structure is resolved inside the parser and never surfaces here.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error reading or writing JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The parser stopped before the end of the body.
    #[error("Unrecognized structure at block {position} of {total}: {text:?}")]
    UnconsumedBlocks {
        /// Index of the first unconsumed block
        position: usize,
        /// Number of blocks in the body
        total: usize,
        /// Text of the first unconsumed block
        text: String,
    },

    /// A block kind appeared where no parsing rule handles it.
    #[error("Unexpected {kind} at block {position}")]
    UnexpectedBlock {
        /// Index of the block
        position: usize,
        /// Kind of block
        kind: &'static str,
    },

    /// A date-shaped span does not denote a real date.
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// No document family is registered under this name.
    #[error("Unknown document family: {0}")]
    UnknownFamily(String),

    /// Error during rendering (XML, JSON).
    #[error("Rendering error: {0}")]
    Render(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}
