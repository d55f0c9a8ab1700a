//! Command line argument parsing and validation.
//!
//! Positional `<version> [critical]`, with the required secrets and
//! identifiers taken from the environment.

use crate::artifacts::DEFAULT_BUNDLE_DIR;
use crate::builder::{DEFAULT_BUILD_COMMAND, DEFAULT_OUTPUT_LIMIT};
use crate::error::ConfigError;
use crate::github::DEFAULT_API_URL;
use crate::publish::{DEFAULT_GIST_FILE, DEFAULT_PLATFORM};
use clap::Parser;
use std::path::PathBuf;

/// Publish a Tauri desktop release
#[derive(Parser, Debug, Clone)]
#[command(
    name = "tauri_release",
    version,
    about = "Publish a Tauri desktop release and refresh the updater manifest",
    long_about = "Bump the project version, build the installer, create a GitHub release,
upload the installer and overwrite latest.json in the updater gist.

Usage:
  tauri_release 1.0.1
  tauri_release 1.0.1 true    # mark as a critical update

Requires GITHUB_TOKEN, GIST_ID, REPO_OWNER and REPO_NAME (a .env file in the
working directory is loaded first)."
)]
pub struct Args {
    /// Version to release, without the leading `v`
    #[arg(index = 1, value_name = "VERSION")]
    pub release_version: String,

    /// `true` marks the update as critical; anything else is routine
    #[arg(index = 2, value_name = "CRITICAL")]
    pub critical: Option<String>,

    /// Extra positional arguments, accepted and ignored
    #[arg(index = 3, hide = true, num_args = 0..)]
    pub ignored: Vec<String>,

    /// GitHub token with repo and gist scopes
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    /// Gist holding the update descriptor
    #[arg(long, env = "GIST_ID")]
    pub gist_id: Option<String>,

    /// Repository owner
    #[arg(long, env = "REPO_OWNER")]
    pub repo_owner: Option<String>,

    /// Repository name
    #[arg(long, env = "REPO_NAME")]
    pub repo_name: Option<String>,

    /// Project root containing package.json and src-tauri/
    #[arg(long, env = "RELEASE_PROJECT_ROOT", default_value = ".")]
    pub project_root: PathBuf,

    /// Build command run in the project root
    #[arg(long, env = "RELEASE_BUILD_COMMAND", default_value = DEFAULT_BUILD_COMMAND)]
    pub build_command: String,

    /// Cap on buffered build output in bytes
    #[arg(long, env = "RELEASE_MAX_BUILD_OUTPUT", default_value_t = DEFAULT_OUTPUT_LIMIT)]
    pub max_build_output: usize,

    /// Bundle directory holding the installer, relative to the project root
    #[arg(long, env = "RELEASE_BUNDLE_DIR", default_value = DEFAULT_BUNDLE_DIR)]
    pub bundle_dir: PathBuf,

    /// Platform key written to the update descriptor
    #[arg(long, env = "RELEASE_PLATFORM", default_value = DEFAULT_PLATFORM)]
    pub platform: String,

    /// Descriptor file name inside the gist
    #[arg(long, env = "RELEASE_GIST_FILE", default_value = DEFAULT_GIST_FILE)]
    pub gist_file: String,

    /// GitHub API root
    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,
}

impl Args {
    /// Parse command line arguments
    pub fn try_parse_args() -> Result<Self, clap::Error> {
        Self::try_parse()
    }

    /// Whether the critical flag was given as the literal `true`
    pub fn is_critical(&self) -> bool {
        self.critical.as_deref() == Some("true")
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.release_version.trim().is_empty() {
            return Err(ConfigError::InvalidArguments {
                reason: "version must not be blank".to_string(),
            });
        }
        if !self.ignored.is_empty() {
            log::debug!("ignoring extra arguments: {:?}", self.ignored);
        }
        Ok(())
    }
}

/// Configuration derived from command line arguments
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Output manager for colored terminal output
    output: super::OutputManager,
}

impl RuntimeConfig {
    /// Create runtime configuration
    pub fn new() -> Self {
        Self {
            output: super::OutputManager::new(false),
        }
    }

    /// Runtime configuration that prints nothing but errors
    pub fn quiet() -> Self {
        Self {
            output: super::OutputManager::new(true),
        }
    }

    /// Get a reference to the output manager
    pub fn output(&self) -> &super::OutputManager {
        &self.output
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl RuntimeConfig {
    /// Print message
    pub fn println(&self, message: &str) {
        let _ = self.output.println(message);
    }

    /// Print section header
    pub fn section(&self, title: &str) {
        let _ = self.output.section(title);
    }

    /// Print error message (always shown)
    pub fn error_println(&self, message: &str) {
        self.output.error(message);
    }

    /// Print warning message
    pub fn warning_println(&self, message: &str) {
        let _ = self.output.warn(message);
    }

    /// Print success message
    pub fn success_println(&self, message: &str) {
        let _ = self.output.success(message);
    }

    /// Print indented text
    pub fn indent(&self, message: &str) {
        let _ = self.output.indent(message);
    }

    /// Check if quiet output is enabled
    pub fn is_quiet(&self) -> bool {
        self.output.is_quiet()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn critical_requires_literal_true() {
        let parse = |argv: &[&str]| Args::try_parse_from(argv).unwrap();
        assert!(parse(&["tauri_release", "1.0.0", "true"]).is_critical());
        assert!(!parse(&["tauri_release", "1.0.0", "TRUE"]).is_critical());
        assert!(!parse(&["tauri_release", "1.0.0", "yes"]).is_critical());
        assert!(!parse(&["tauri_release", "1.0.0"]).is_critical());
    }

    #[test]
    fn positional_version_does_not_clash_with_version_flag() {
        let args = Args::try_parse_from(["tauri_release", "1.2.3"]).unwrap();
        assert_eq!(args.release_version, "1.2.3");

        let err = Args::try_parse_from(["tauri_release", "--version"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn extra_positionals_are_ignored() {
        let args =
            Args::try_parse_from(["tauri_release", "1.0.0", "true", "extra", "more"]).unwrap();
        assert!(args.is_critical());
        assert_eq!(args.ignored, vec!["extra", "more"]);
        assert!(args.validate().is_ok());
    }

    #[test]
    fn blank_version_is_invalid() {
        let args = Args::try_parse_from(["tauri_release", "  "]).unwrap();
        assert!(matches!(
            args.validate(),
            Err(ConfigError::InvalidArguments { .. })
        ));
    }

    #[test]
    fn version_is_required() {
        let err = Args::try_parse_from(["tauri_release"]).unwrap_err();
        assert_eq!(
            err.kind(),
            clap::error::ErrorKind::MissingRequiredArgument
        );
    }
}
