//! Release command execution module.
//!
//! Validates configuration before anything is touched, then runs the
//! release pipeline and prints a summary.

use crate::ReleaseRequest;
use crate::cli::{Args, RuntimeConfig};
use crate::config::ReleaseSettings;
use crate::error::Result;
use crate::pipeline::ReleasePipeline;

/// Execute release command
pub(super) async fn execute_release(args: &Args, config: &RuntimeConfig) -> Result<i32> {
    let settings = ReleaseSettings::from_args(args)?;
    let request = ReleaseRequest::from_args(args);

    config.println(&format!(
        "🚀 Starting release v{} (critical: {})",
        request.version, request.critical
    ));
    log::debug!(
        "project root {}, bundle dir {}, api {}",
        settings.project_root.display(),
        settings.bundle_dir.display(),
        settings.api_url
    );

    let outcome = ReleasePipeline::new(&settings, &request, config)
        .run()
        .await?;

    config.section("Release complete");
    config.success_println(&format!("Release: {}", outcome.release.html_url));
    config.success_println(&format!("Installer: {}", outcome.asset.browser_download_url));
    config.success_println(&format!("Gist updated: {}", outcome.gist_url));
    if request.critical {
        config.warning_println("Published as a CRITICAL update");
    }

    Ok(0)
}
