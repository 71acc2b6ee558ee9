//! Capability registry and action resolution.
//!
//! The host program registers named groups of callables before a menu is shown. When
//! the user picks a function node, the resolver works out the function name (explicit
//! `func`, or derived from the display name) and looks it up in the named group.

use crate::error::{AppError, Result};
use crate::models::{ActionNode, Arguments};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use tracing::debug;

/// A host function a menu action can call.
pub type Capability = Box<dyn Fn(&Arguments) -> anyhow::Result<Value>>;

/// Turns a menu label into a function name when a function node has no `func`.
///
/// Implement this to support other naming conventions (camelCase, prefixes, ...).
/// Any `Fn(&str) -> String` closure is a formatter too.
pub trait NameFormatter {
    fn format(&self, name: &str) -> String;
}

impl<F> NameFormatter for F
where
    F: Fn(&str) -> String,
{
    fn format(&self, name: &str) -> String {
        self(name)
    }
}

/// The default formatter: `"Show Symbols For Tag!"` becomes `show_symbols_for_tag`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SnakeCase;

impl NameFormatter for SnakeCase {
    fn format(&self, name: &str) -> String {
        snake_case(name)
    }
}

/// Keeps alphanumerics and whitespace, collapses whitespace runs into `_` and lowercases.
pub fn snake_case(name: &str) -> String {
    let kept: String = name
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect();

    kept.split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .to_lowercase()
}

/// A named set of capabilities, the equivalent of a module.
#[derive(Default)]
pub struct CapabilityGroup {
    functions: HashMap<String, Capability>,
}

impl CapabilityGroup {
    /// Registers `function` under `name`, replacing any earlier registration.
    pub fn register<F>(&mut self, name: &str, function: F) -> &mut Self
    where
        F: Fn(&Arguments) -> anyhow::Result<Value> + 'static,
    {
        self.functions.insert(name.to_string(), Box::new(function));
        self
    }

    pub fn get(&self, name: &str) -> Option<&Capability> {
        self.functions.get(name)
    }
}

impl fmt::Debug for CapabilityGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&String> = self.functions.keys().collect();
        names.sort();
        f.debug_struct("CapabilityGroup")
            .field("functions", &names)
            .finish()
    }
}

/// Maps group names to capability groups and resolves function nodes against them.
pub struct CapabilityRegistry {
    groups: HashMap<String, CapabilityGroup>,
    formatter: Box<dyn NameFormatter>,
}

impl Default for CapabilityRegistry {
    fn default() -> Self {
        Self::with_formatter(SnakeCase)
    }
}

impl CapabilityRegistry {
    /// Creates an empty registry using the `SnakeCase` name formatter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty registry deriving function names with `formatter`.
    pub fn with_formatter(formatter: impl NameFormatter + 'static) -> Self {
        Self {
            groups: HashMap::new(),
            formatter: Box::new(formatter),
        }
    }

    /// Returns the group called `module`, creating it if needed.
    pub fn group(&mut self, module: &str) -> &mut CapabilityGroup {
        self.groups.entry(module.to_string()).or_default()
    }

    /// The function name an action calls: its explicit `func`, or one derived from its name.
    pub fn function_name(&self, action: &ActionNode) -> String {
        match &action.func {
            Some(func) => func.clone(),
            None => self.formatter.format(&action.name),
        }
    }

    /// Finds the capability a function node refers to.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Resolution` if the group is not registered or does not
    /// contain the function.
    pub fn resolve(&self, action: &ActionNode) -> Result<&Capability> {
        let function = self.function_name(action);
        debug!("Resolving {}.{}", action.module, function);

        let group = self.groups.get(&action.module).ok_or_else(|| AppError::Resolution {
            module: action.module.clone(),
            function: function.clone(),
            reason: "no capability group with that name is registered".to_string(),
        })?;

        group.get(&function).ok_or_else(|| AppError::Resolution {
            module: action.module.clone(),
            function,
            reason: "the group has no function with that name".to_string(),
        })
    }
}

impl fmt::Debug for CapabilityRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CapabilityRegistry")
            .field("groups", &self.groups)
            .finish_non_exhaustive()
    }
}
