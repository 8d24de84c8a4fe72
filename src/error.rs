use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ArchiveToolsError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unknown target file system: {0}")]
    UnknownFileSystem(String),

    #[error("Invalid rename pattern: {pattern}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Replacement {replacement:?} contains invalid character {character:?}")]
    UnsafeReplacement { replacement: String, character: char },

    #[error("Failed to read file: {path}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to scan {path}")]
    Scan {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ArchiveToolsError>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
