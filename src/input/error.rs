//! Content loading errors.

use std::path::PathBuf;

use thiserror::Error;

use crate::config::MatcherError;
use crate::types::Locale;

/// Errors raised while loading or serving content trees.
#[derive(Error, Debug)]
pub enum ContentError {
    /// Error when failing to read a content file
    #[error("Failed to read content file {path:?}: {source}")]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Error when a content file is not valid JSON
    #[error("Failed to parse content file {path:?}: {source}")]
    Parse {
        /// File that failed.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },
    /// A supported locale has no root tree
    #[error("No content tree for locale '{0}'")]
    MissingLocale(Locale),
    /// `install_global` was called twice
    #[error("The global content store is already initialized")]
    AlreadyInitialized,
    /// A `contentFiles` pattern is invalid.
    #[error(transparent)]
    Pattern(#[from] MatcherError),
}
