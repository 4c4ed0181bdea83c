//! akeyless-secret binary entry point.

use std::process::ExitCode;

use akeyless_static_secret::{cli, ui::output};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let args = cli::Cli::parse_args();
    init_tracing(args.debug);

    match cli::run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            output::error(format!("{:#}", err));
            ExitCode::FAILURE
        }
    }
}

/// Install the stderr log subscriber. `--debug` forces debug level for this crate.
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("akeyless_static_secret=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
