//! Defines the application's primary error type `AppError` and a convenience `Result` alias.
//!
//! Uses the `thiserror` crate for ergonomic error definition and provides `From`
//! implementations to convert common external errors into `AppError` variants.
//! Errors that do not implement `Clone` are wrapped in `Arc` to allow `AppError` to be cloneable.

use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

/// The primary error enumeration for all application-specific errors.
#[derive(Error, Debug, Clone)]
pub enum AppError {
    /// A menu file could not be opened or read.
    #[error("I/O Error reading {path}: {source}")]
    Io {
        path: PathBuf,
        source: Arc<std::io::Error>,
    },

    /// A menu file has an extension that is neither JSON nor YAML.
    #[error("Unsupported menu file format '{extension}' for {path} (expected .json, .yaml or .yml)")]
    Format { path: PathBuf, extension: String },

    /// A menu file could not be parsed as JSON or YAML.
    #[error("Parse Error in {path}: {message}")]
    Parse { path: PathBuf, message: String },

    /// A node in a menu file is neither a well-formed menu nor a well-formed function.
    #[error("Invalid menu structure in {path}: {message}")]
    Structure { path: PathBuf, message: String },

    /// A function node names a capability that is not registered.
    #[error("Cannot resolve '{module}.{function}': {reason}")]
    Resolution {
        module: String,
        function: String,
        reason: String,
    },

    /// A registered capability returned an error.
    #[error("Action '{function}' failed: {cause}")]
    Action {
        function: String,
        cause: Arc<anyhow::Error>,
    },

    /// Error originating from user interaction prompts (`dialoguer`).
    #[error("Prompt Error: {0}")]
    Prompt(Arc<dialoguer::Error>),

    /// Reading a selection or writing the menu failed.
    #[error("Terminal I/O Error: {0}")]
    Terminal(Arc<std::io::Error>),

    /// Input ended while waiting for a selection.
    #[error("Input closed while waiting for a selection")]
    Interrupted,

    /// Error specific to CLI logic or argument handling.
    #[error("CLI Error: {0}")]
    Cli(String),
}

/// A specialized `Result` type using the application's `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    pub fn io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        AppError::Io {
            path: path.into(),
            source: Arc::new(err),
        }
    }

    pub fn structure(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        AppError::Structure {
            path: path.into(),
            message: message.into(),
        }
    }
}

// --- From implementations ---
// Stdin/stdout failures during a walk; file reads go through `AppError::io` instead.

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Terminal(Arc::new(err))
    }
}

impl From<dialoguer::Error> for AppError {
    fn from(err: dialoguer::Error) -> Self {
        AppError::Prompt(Arc::new(err))
    }
}
