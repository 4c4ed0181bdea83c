//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Resolves configuration from the global flags
//! 2. Calls into the data source layer
//! 3. Formats and displays output
//!
//! # Async Commands
//!
//! `read` performs network I/O. It builds a tokio runtime and blocks on the
//! read, so the CLI itself stays synchronous.

mod read;
mod schema;

pub use read::read;
pub use schema::schema;

use super::args::Command;
use super::Context;
use anyhow::Result;

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    match command {
        Command::Read {
            path,
            get_metadata,
            version,
            show_sensitive,
        } => read::read(ctx, &path, get_metadata, version, show_sensitive),
        Command::Schema => schema::schema(ctx),
    }
}
