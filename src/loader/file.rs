//! Reads menu tree files from disk.
//!
//! The notation is chosen from the file extension. Both notations are parsed into a
//! generic `serde_json::Value` first and then converted into a typed `MenuTree`.

use crate::error::{AppError, Result};
use crate::models::MenuTree;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::{debug, error};

/// Structured-data notations a menu file may be written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notation {
    Json,
    Yaml,
}

impl Notation {
    /// Picks the notation from the file extension (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns `AppError::Format` for a missing or unsupported extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();

        match extension.as_str() {
            "json" => Ok(Notation::Json),
            "yaml" | "yml" => Ok(Notation::Yaml),
            _ => Err(AppError::Format {
                path: path.to_path_buf(),
                extension,
            }),
        }
    }

    /// Parses `content` into a generic tree value.
    fn parse(self, content: &str, path: &Path) -> Result<Value> {
        let parsed: std::result::Result<Value, String> = match self {
            Notation::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
            Notation::Yaml => serde_yaml_ng::from_str(content).map_err(|e| e.to_string()),
        };

        parsed.map_err(|message| AppError::Parse {
            path: path.to_path_buf(),
            message,
        })
    }
}

/// Loads the menu tree stored at `path`.
///
/// The whole file is read and released before parsing. Import paths inside the tree
/// are resolved against the directory containing `path`.
///
/// # Errors
///
/// * `AppError::Format` if the extension is not `.json`, `.yaml` or `.yml`.
/// * `AppError::Io` if the file cannot be read.
/// * `AppError::Parse` if the content is malformed.
/// * `AppError::Structure` if a node has an invalid shape.
pub fn load(path: &Path) -> Result<MenuTree> {
    let notation = Notation::from_path(path)?;
    debug!("Loading {:?} menu file {}", notation, path.display());

    let content = fs::read_to_string(path).map_err(|e| {
        error!("Failed to read menu file {}: {}", path.display(), e);
        AppError::io(path, e)
    })?;

    let value = notation.parse(&content, path)?;
    let tree = MenuTree::from_value(value, path)?;

    debug!("Loaded menu '{}' from {}", tree.name(), path.display());
    Ok(tree)
}
