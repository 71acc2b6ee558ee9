use crate::actions::{demo, CapabilityRegistry};
use crate::cli::Menu;
use crate::error::{AppError, Result};
use clap::Parser;
use dialoguer::{theme::ColorfulTheme, Input};
use std::path::PathBuf;
use tracing::info;

/// Interactive text menus driven by JSON or YAML menu files
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Root menu file (.json, .yaml or .yml); prompted for when omitted
    #[arg(env = "TREEMENU_FILE")]
    pub path: Option<PathBuf>,

    /// Message shown when an invalid option is entered
    #[arg(short, long, env = "TREEMENU_ERROR_MESSAGE")]
    pub error_message: Option<String>,

    /// Write logs to this file instead of stderr
    #[arg(long, env = "TREEMENU_LOG_FILE")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// The root menu file, asking the user for one if none was given.
    pub fn menu_path(&self) -> Result<PathBuf> {
        match &self.path {
            Some(path) if path.as_os_str().is_empty() => {
                Err(AppError::Cli("Menu file path must not be empty".to_string()))
            },
            Some(path) => Ok(path.clone()),
            None => prompt_menu_path(),
        }
    }
}

/// Prompt for the root menu file.
pub fn prompt_menu_path() -> Result<PathBuf> {
    let path: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Menu file")
        .validate_with(|input: &String| -> std::result::Result<(), &'static str> {
            if input.trim().is_empty() {
                Err("Please enter a path to a .json, .yaml or .yml file")
            } else {
                Ok(())
            }
        })
        .interact_text()?;

    Ok(PathBuf::from(path.trim()))
}

/// CLI application
pub struct App {
    menu: Menu,
}

impl App {
    /// Builds the capability registry and loads the root menu.
    pub fn new(cli: &Cli) -> Result<Self> {
        let path = cli.menu_path()?;

        let mut registry = CapabilityRegistry::new();
        demo::register(&mut registry);

        let menu = Menu::new(path, cli.error_message.clone(), registry)?;
        info!("Menu ready: {}", menu.root_path().display());

        Ok(Self { menu })
    }

    /// Shows the menu until the user exits the top level.
    ///
    /// Input closing (Ctrl-D) counts as a normal exit.
    pub fn run(&self) -> Result<()> {
        match self.menu.show() {
            Err(AppError::Interrupted) => {
                info!("Input closed, exiting");
                println!();
                Ok(())
            },
            other => other,
        }
    }
}
