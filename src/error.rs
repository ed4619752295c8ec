//! Error types for the mimetypes crate.

use std::io;
use thiserror::Error;

/// The main error type for the mimetypes crate.
///
/// Lookups never fail; a miss is reported as `None` or an empty slice.
/// Errors only come out of loading.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// A line that could not be parsed into a media type entry.
    /// `line` is 1-based and counts blank and comment lines.
    #[error("invalid entry at line {line}")]
    Format { line: usize },

    /// No loader is registered under the requested format name.
    #[error("no such loader: {0}")]
    UnknownLoader(String),
}

/// Specialized Result type for mimetypes operations.
pub type Result<T> = std::result::Result<T, Error>;
