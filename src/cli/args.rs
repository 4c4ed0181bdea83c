//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version (top level only)
//! - `--config <path>`: Read provider configuration from this file
//! - `--gateway <url>`: Override the API gateway address
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output
//!
//! The auth token is never accepted as a flag; it comes from the config
//! file or `AKEYLESS_TOKEN`.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// akeyless-secret - Read static secrets from the Akeyless vault
#[derive(Parser, Debug)]
#[command(name = "akeyless-secret")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Provider config file (default: search standard locations)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// API gateway address (overrides config and AKEYLESS_GATEWAY)
    #[arg(long, global = true, value_name = "URL")]
    pub gateway: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Read a static secret and print the resulting state
    #[command(
        name = "read",
        long_about = "Read a static secret and print the resulting state as JSON.\n\n\
            The value attribute is sensitive and is redacted unless --show-sensitive \
            is given. With --get-metadata the item's description and tags are fetched \
            as well.",
        after_help = "\
EXAMPLES:
    # Latest version of a secret
    akeyless-secret read --path /db/prod/password

    # A specific version, with description and tags
    akeyless-secret read --path /db/prod/password --version 3 --get-metadata

    # Print the secret value in the clear
    akeyless-secret read --path /db/prod/password --show-sensitive"
    )]
    Read {
        /// Path where the secret is stored
        #[arg(long)]
        path: String,

        /// Also fetch description and tags
        #[arg(long)]
        get_metadata: bool,

        /// Secret version (0 or unset: latest)
        #[arg(long, value_name = "N", allow_negative_numbers = true)]
        version: Option<i64>,

        /// Print sensitive attributes in the clear
        #[arg(long)]
        show_sensitive: bool,
    },

    /// Print the data source schema
    #[command(name = "schema")]
    Schema,
}
