//! Provides the capabilities menu actions can invoke.
//!
//! Includes:
//! - `registry`: the capability registry and the resolver that maps a function node to a callable.
//! - `demo`: the `demo` capability group shipped with the launcher.

pub mod demo;
mod registry;

pub use registry::*;
