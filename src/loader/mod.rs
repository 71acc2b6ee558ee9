//! Provides menu file loading functionalities.
//!
//! Currently, this module reads JSON and YAML menu files via the `file` submodule.

mod file;

pub use file::*;
