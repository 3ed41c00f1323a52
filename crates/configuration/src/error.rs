//! Errors that can be thrown when processing configuration.

use std::path::PathBuf;

/// The errors that can be thrown when parsing a configuration directory.
#[derive(Debug, thiserror::Error)]
pub enum ParseConfigurationError {
    #[error("parse error on {}:{line}:{column}: {message}", .file_path.display())]
    ParseError {
        file_path: PathBuf,
        line: usize,
        column: usize,
        message: String,
    },

    #[error("{}: {source}", .file_path.display())]
    IoError {
        file_path: PathBuf,
        source: std::io::Error,
    },
}

/// The errors that can be thrown when writing a configuration directory.
#[derive(Debug, thiserror::Error)]
pub enum WriteParsedConfigurationError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("could not serialize the configuration: {0}")]
    SerializationError(#[from] serde_json::Error),
}
