//! Reading journal command-line entry point.
//!
//! # Responsibility
//! - Resolve the default configuration from the working directory.
//! - Start logging and run one interactive session over stdin/stdout.

use readjournal_core::{core_version, init_logging, JournalConfig, Session};
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    let config = match JournalConfig::from_current_dir() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Cannot resolve working directory: {err}");
            return ExitCode::FAILURE;
        }
    };

    // Logging is best-effort; the journal works without it.
    if let Err(err) = init_logging(config.log_level, &config.log_dir) {
        eprintln!("Logging disabled: {err}");
    }
    log::info!(
        "event=cli_start module=cli status=ok version={}",
        core_version()
    );

    let stdin = io::stdin();
    let mut session = Session::new(stdin.lock(), io::stdout(), config.store());
    match session.run() {
        Ok(summary) => {
            log::info!(
                "event=cli_exit module=cli status=ok saved={}",
                summary.saved
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("event=cli_exit module=cli status=error error={}", err);
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
