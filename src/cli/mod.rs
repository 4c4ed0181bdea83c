//! cli
//!
//! Command-line interface over the data source.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Delegate to command handlers
//! - Does NOT talk to the vault directly; reads go through [`crate::datasource`]

pub mod args;
pub mod commands;

pub use args::{Cli, Command};

use std::path::PathBuf;

use anyhow::Result;

use crate::ui::output::Verbosity;

/// Settings shared by every command, taken from the global flags.
#[derive(Debug, Clone, Default)]
pub struct Context {
    /// Explicit config file
    pub config: Option<PathBuf>,
    /// Gateway override
    pub gateway: Option<String>,
    /// Debug output
    pub debug: bool,
    /// Minimal output
    pub quiet: bool,
}

impl Context {
    /// Output verbosity for these flags.
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.debug)
    }
}

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run(cli: Cli) -> Result<()> {
    let ctx = Context {
        config: cli.config.clone(),
        gateway: cli.gateway.clone(),
        debug: cli.debug,
        quiet: cli.quiet,
    };

    commands::dispatch(cli.command, &ctx)
}
