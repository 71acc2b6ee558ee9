//! Defines the data structures and models used throughout the application.
//!
//! This covers the menu tree read from menu files and the argument mapping
//! handed to capabilities when an action is chosen.

mod menu;

pub use menu::*;
