//! Handles Command Line Interface (CLI) related functionalities.
//!
//! Includes parsing arguments, the launcher that wires capabilities to a root menu file,
//! and the interactive menu walker itself.

mod commands;
mod menu;

pub use commands::*;
pub use menu::*;
