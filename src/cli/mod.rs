//! Command line interface for tauri_release.
//!
//! Parses arguments, validates configuration and runs the release pipeline
//! with colored progress output.

mod args;
pub mod commands;
mod output;

pub use args::{Args, RuntimeConfig};
pub use commands::execute_command;
pub use output::OutputManager;

/// Main CLI entry point.
///
/// Returns the process exit code. Argument errors print clap's usage and
/// map to exit code 1; `--help` and `--version` exit 0.
pub async fn run() -> i32 {
    let args = match Args::try_parse_args() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() { 1 } else { 0 };
        }
    };
    execute_command(args).await
}
