//! Error types for the I/O adapters and editing session
//!
//! The rendering engine itself never fails; these errors come from the
//! backend, the session's index-based edits and the CLI surface.

use thiserror::Error;

/// Result type alias for helpmenu operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur outside the pure rendering pipeline
#[derive(Error, Debug)]
pub enum Error {
    /// Filesystem access failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The config file is not valid YAML
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The config file is not valid JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// No built-in preset with that key
    #[error("Theme not found: {0}")]
    UnknownTheme(String),

    /// Upload kind is not one of avatar, logo, background, font
    #[error("Unknown asset kind '{0}': expected avatar, logo, background or font")]
    UnknownAssetKind(String),

    /// Section index out of range
    #[error("Section {index} does not exist (document has {len} sections)")]
    SectionIndex { index: usize, len: usize },

    /// Item index out of range within a section
    #[error("Item {index} does not exist in section {section} ({len} items)")]
    ItemIndex {
        section: usize,
        index: usize,
        len: usize,
    },

    /// Uploaded file name is empty or tries to leave its folder
    #[error("Invalid file name: '{0}'")]
    InvalidFileName(String),

    /// The config file's directory could not be watched
    #[cfg(feature = "preview")]
    #[error("Failed to watch config directory: {0}")]
    Watch(#[from] notify::Error),
}
