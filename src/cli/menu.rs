//! The interactive menu walker.
//!
//! `Menu` owns the root tree and the capability registry. Showing it renders the current
//! menu as a numbered list, reads a selection and either descends into the chosen
//! sub-menu, loads and walks an imported menu file, or invokes the chosen action.
//! Every level loops until the user enters `0`.

use crate::actions::CapabilityRegistry;
use crate::error::{AppError, Result};
use crate::loader;
use crate::models::{ActionNode, MenuBody, MenuTree};
use serde_json::Value;
use std::collections::HashSet;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Prompt printed after every menu listing.
pub const PROMPT: &str = "Please Enter an Option: ";

/// An interactive menu backed by a menu tree file.
#[derive(Debug)]
pub struct Menu {
    root_path: PathBuf,
    error_message: Option<String>,
    registry: CapabilityRegistry,
    tree: MenuTree,
}

impl Menu {
    /// Loads the root menu file.
    ///
    /// # Arguments
    ///
    /// * `path` - Relative or absolute path to the root menu file.
    /// * `error_message` - Printed whenever the user enters an invalid option.
    /// * `registry` - Capabilities the menu's actions may call.
    ///
    /// # Errors
    ///
    /// Any loader error for the root file (`Format`, `Io`, `Parse`, `Structure`).
    /// Imported files are only loaded once the user navigates into them.
    pub fn new(
        path: impl Into<PathBuf>,
        error_message: Option<String>,
        registry: CapabilityRegistry,
    ) -> Result<Self> {
        let root_path = path.into();
        let tree = loader::load(&root_path)?;
        info!("Loaded root menu from {}", root_path.display());

        Ok(Self {
            root_path,
            error_message,
            registry,
            tree,
        })
    }

    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    /// Shows the menu on the terminal and returns once the user exits the top level.
    ///
    /// Stdout is locked per write, never across a blocking read.
    pub fn show(&self) -> Result<()> {
        self.show_with(&mut io::stdin().lock(), &mut io::stdout())
    }

    /// Shows the menu reading selections from `input` and rendering to `output`.
    ///
    /// # Errors
    ///
    /// * `AppError::Interrupted` if `input` ends while a selection is expected.
    /// * Loader errors for imported menu files.
    /// * `AppError::Resolution` / `AppError::Action` for actions that cannot be resolved or fail.
    pub fn show_with<R: BufRead, W: Write>(&self, input: &mut R, output: &mut W) -> Result<()> {
        let mut walker = Walker {
            menu: self,
            input,
            output,
        };
        walker.handle(&self.tree)?;
        Ok(())
    }
}

/// One traversal over a `Menu`, bound to an input and an output.
struct Walker<'a, R, W> {
    menu: &'a Menu,
    input: &'a mut R,
    output: &'a mut W,
}

impl<R: BufRead, W: Write> Walker<'_, R, W> {
    /// Walks `node`, returning the action's value when `node` is an action.
    fn handle(&mut self, node: &MenuTree) -> Result<Option<Value>> {
        match node {
            MenuTree::Menu(menu) => match &menu.body {
                MenuBody::Items(items) => {
                    self.run_menu(&menu.name, items)?;
                    Ok(None)
                },
                MenuBody::Import(path) => {
                    let tree = load_import(path)?;
                    self.handle(&tree)
                },
            },
            MenuTree::Action(action) => self.invoke(action).map(Some),
        }
    }

    fn run_menu(&mut self, name: &str, items: &[MenuTree]) -> Result<()> {
        loop {
            let option = self.select(name, items)?;
            if option == 0 {
                debug!("Leaving menu '{}'", name);
                return Ok(());
            }

            let item = &items[option - 1];
            debug!("Menu '{}': selected [{}] {}", name, option, item.name());
            self.handle(item)?;
        }
    }

    /// Renders the menu until the user enters a number in `0..=items.len()`.
    fn select(&mut self, name: &str, items: &[MenuTree]) -> Result<usize> {
        loop {
            self.output.write_all(render(name, items).as_bytes())?;
            self.output.flush()?;

            // Raw bytes so that non-UTF-8 input is just another invalid option
            let mut buf = Vec::new();
            if self.input.read_until(b'\n', &mut buf)? == 0 {
                return Err(AppError::Interrupted);
            }
            let line = String::from_utf8_lossy(&buf);

            match parse_selection(&line, items.len()) {
                Some(option) => return Ok(option),
                None => {
                    warn!("Invalid option {:?} for menu '{}'", line.trim(), name);
                    if let Some(message) = &self.menu.error_message {
                        writeln!(self.output, "{}", message)?;
                    }
                },
            }
        }
    }

    fn invoke(&mut self, action: &ActionNode) -> Result<Value> {
        let registry = &self.menu.registry;
        let capability = registry.resolve(action)?;
        let function = format!("{}.{}", action.module, registry.function_name(action));

        debug!("Invoking {} with {} argument(s)", function, action.args.len());
        self.output.flush()?;

        capability(&action.args).map_err(|e| {
            error!("{} failed: {:#}", function, e);
            AppError::Action {
                function,
                cause: Arc::new(e),
            }
        })
    }
}

/// Loads an imported menu, following imports that point straight at other imports.
///
/// Nothing is cached: every navigation re-reads the file.
fn load_import(path: &Path) -> Result<MenuTree> {
    let mut seen = HashSet::new();
    let mut current = path.to_path_buf();

    loop {
        debug!("Following import {}", current.display());
        let tree = loader::load(&current)?;
        let next = match &tree {
            MenuTree::Menu(menu) => match &menu.body {
                MenuBody::Import(next) => next.clone(),
                MenuBody::Items(_) => return Ok(tree),
            },
            MenuTree::Action(_) => return Ok(tree),
        };

        seen.insert(current.clone());
        if seen.contains(&next) {
            return Err(AppError::structure(
                &current,
                format!("import cycle through {}", next.display()),
            ));
        }
        current = next;
    }
}

/// Renders a menu listing followed by the prompt.
///
/// ```text
/// ---- Main ----
///
///  [1] Hello World
///
///  [0] Exit
///
/// Please Enter an Option:
/// ```
pub fn render(name: &str, items: &[MenuTree]) -> String {
    let mut text = format!("---- {} ----\n\n", name);
    for (i, item) in items.iter().enumerate() {
        text.push_str(&format!(" [{}] {}\n", i + 1, title_case(item.name())));
    }
    text.push_str("\n [0] Exit\n");
    text.push('\n');
    text.push_str(PROMPT);
    text
}

/// Parses a line of input as a menu option in `0..=count`.
pub fn parse_selection(line: &str, count: usize) -> Option<usize> {
    let option: i64 = line.trim().parse().ok()?;
    usize::try_from(option).ok().filter(|&option| option <= count)
}

/// Uppercases the first letter of every run of letters and lowercases the rest.
pub fn title_case(label: &str) -> String {
    let mut titled = String::with_capacity(label.len());
    let mut in_word = false;

    for c in label.chars() {
        if c.is_alphabetic() {
            if in_word {
                titled.extend(c.to_lowercase());
            } else {
                titled.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            titled.push(c);
            in_word = false;
        }
    }

    titled
}
