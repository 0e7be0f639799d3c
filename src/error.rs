//! Errors raised at the edges of fovea: reading files, loading configuration, writing output.
//!
//! The outline core never fails. A missing heading or sibling is an `Option::None`, not an error,
//! so everything here concerns the shell around it.

use std::io;
use std::path::PathBuf;

/// Failures that can stop the viewer or the headless runner.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A document could not be read from disk.
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// Terminal or stream I/O failed.
    #[error(transparent)]
    Io(#[from] io::Error),
    /// `fovea.toml` exists but could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(String),
    /// The heading marker is not a single non-whitespace character.
    #[error("heading marker must be a single non-whitespace character, got {0:?}")]
    Marker(String),
    /// The heading pattern failed to compile.
    #[error(transparent)]
    Pattern(#[from] regex::Error),
    /// The applied plan could not be serialised.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    /// The log file could not be created or the subscriber installed.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}

/// Shorthand for results carrying [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
