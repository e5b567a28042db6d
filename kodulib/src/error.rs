//! Error types for kodulib

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can surface from file discovery.
///
/// Per-entry and per-file problems (permission denied, vanished directories,
/// oversized or binary files, missing ignore files) are absorbed by the engine
/// and never show up here.
#[derive(Error, Debug)]
pub enum KoduError {
    /// Discovery root does not exist
    #[error("path does not exist: {0}")]
    PathNotFound(PathBuf),

    /// Discovery root exists but is not a directory
    #[error("not a directory: {0}")]
    NotADirectory(PathBuf),

    /// A glob could not be compiled
    #[error("invalid glob pattern '{pattern}': {message}")]
    InvalidGlob { pattern: String, message: String },

    /// The gitignore engine rejected the pattern set
    #[error("invalid ignore pattern '{pattern}': {message}")]
    InvalidIgnorePattern { pattern: String, message: String },

    /// Unexpected failure while walking the tree
    #[error("failed to walk '{path}': {source}")]
    Walk {
        path: PathBuf,
        source: walkdir::Error,
    },

    /// Failed to read a project file
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The caller cancelled the scan
    #[error("discovery cancelled")]
    Cancelled,
}
