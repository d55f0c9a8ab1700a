//! Command execution coordinating the release operation.
//!
//! Turns every error into a diagnostic on stderr and exit code 1.

mod release;

use crate::cli::{Args, RuntimeConfig};

use release::execute_release;

/// Execute the release based on parsed arguments
pub async fn execute_command(args: Args) -> i32 {
    let config = RuntimeConfig::new();
    execute_with_config(args, &config).await
}

/// Execute with an explicit runtime configuration
pub async fn execute_with_config(args: Args, config: &RuntimeConfig) -> i32 {
    let outcome = match args.validate() {
        Ok(()) => execute_release(&args, config).await,
        Err(e) => Err(e.into()),
    };

    match outcome {
        Ok(exit_code) => exit_code,
        Err(e) => {
            config.error_println(&format!("Release failed: {}", e));

            let suggestions = e.recovery_suggestions();
            if !suggestions.is_empty() {
                config.println("\n💡 Recovery suggestions:");
                for suggestion in suggestions {
                    config.println(&format!("  • {}", suggestion));
                }
            }

            1
        }
    }
}
