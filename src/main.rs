mod actions;
mod cli;
mod error;
mod loader;
mod models;

use clap::Parser;
use cli::{App, Cli};
use colored::*;
use error::Result;
use std::io::{self, Write};
use std::path::Path;
use tracing::{error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load environment variables before clap reads its env fallbacks
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    // Initialize logging; the guard flushes the file writer on drop
    let _guard = init_logging(cli.log_file.as_deref());

    // A Ctrl+C while waiting for input ends the whole program cleanly.
    // Only stderr is touched here: stdout may be locked by the walker.
    if let Err(e) = ctrlc::set_handler(|| {
        let _ = io::stderr().write_all(b"\n");
        std::process::exit(0);
    }) {
        warn!("Could not install Ctrl+C handler: {}", e);
    }

    info!("Starting menu...");

    let app = match App::new(&cli) {
        Ok(app) => app,
        Err(e) => {
            error!("Failed to load menu: {:?}", e);
            eprintln!("{} {}", "Error:".red().bold(), e.to_string().red());
            return Err(e);
        },
    };

    if let Err(e) = app.run() {
        error!("Menu aborted: {:?}", e);
        eprintln!("{} {}", "Error:".red().bold(), e.to_string().red());
        return Err(e);
    }

    info!("Menu closed. Goodbye!");
    Ok(())
}

/// Logs go to stderr, or to `log_file` through a non-blocking appender.
fn init_logging(log_file: Option<&Path>) -> Option<WorkerGuard> {
    let filter = EnvFilter::from_default_env();

    match log_file {
        Some(path) => {
            let directory = path
                .parent()
                .filter(|dir| !dir.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let file_name = path
                .file_name()
                .map(|name| name.to_os_string())
                .unwrap_or_else(|| "treemenu.log".into());

            let appender = tracing_appender::rolling::never(directory, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(writer)
                .init();
            Some(guard)
        },
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
            None
        },
    }
}
