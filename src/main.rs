use std::io::{self, IsTerminal};
use std::process::ExitCode;

use tracing::Level;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(Level::WARN)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false)
        .init();

    match cchistory::cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
