/*!
 * Error types for the tendon converters.
 *
 * `ConvertError` is the taxonomy shared by both pipelines and `XmlError` covers
 * building the in-memory TEI tree. The binaries add context with `anyhow`.
 */

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while building a document tree from XML text
#[derive(Error, Debug)]
pub enum XmlError {
    /// The underlying reader rejected the input
    #[error("malformed XML at byte {position}: {message}")]
    Syntax {
        /// Byte offset reported by the reader
        position: u64,
        /// Reader message
        message: String,
    },

    /// An element was opened but never closed
    #[error("unclosed element <{0}> at end of document")]
    Unclosed(String),

    /// The document has no root element
    #[error("document has no root element")]
    NoRoot,

    /// Content was found after the root element was closed
    #[error("unexpected content after the root element: {0}")]
    TrailingContent(String),
}

/// Errors that can occur while converting a transcription
#[derive(Error, Debug)]
pub enum ConvertError {
    /// Input file or directory does not exist
    #[error("Not found: {}", .path.display())]
    NotFound {
        /// Missing path
        path: PathBuf,
    },

    /// Input exists but could not be read or decoded
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        /// Offending path
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Malformed XML or CSV
    #[error("Failed to parse {}: {message}", .path.display())]
    Parse {
        /// Offending path
        path: PathBuf,
        /// Parser message
        message: String,
    },

    /// An expected element, attribute or column is absent
    #[error("Unexpected document shape: {0}")]
    Shape(String),

    /// Destination could not be written
    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        /// Destination path
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// A worker task panicked or was cancelled
    #[error("Worker task failed: {0}")]
    Task(String),
}

impl ConvertError {
    /// Wrap a tree-building error with the path of the document
    pub fn from_xml<P: Into<PathBuf>>(path: P, error: XmlError) -> Self {
        Self::Parse {
            path: path.into(),
            message: error.to_string(),
        }
    }
}
