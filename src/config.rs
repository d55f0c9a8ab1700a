//! Release settings assembled from arguments and the environment.

use crate::builder::BuildCommand;
use crate::cli::Args;
use crate::error::{ConfigError, Result};
use std::path::PathBuf;

/// Environment variable holding the GitHub token
pub const ENV_GITHUB_TOKEN: &str = "GITHUB_TOKEN";
/// Environment variable holding the descriptor gist ID
pub const ENV_GIST_ID: &str = "GIST_ID";
/// Environment variable holding the repository owner
pub const ENV_REPO_OWNER: &str = "REPO_OWNER";
/// Environment variable holding the repository name
pub const ENV_REPO_NAME: &str = "REPO_NAME";

/// Everything a release run needs, validated up front
#[derive(Debug, Clone)]
pub struct ReleaseSettings {
    /// GitHub token with repo and gist scopes
    pub github_token: String,
    /// Gist holding the update descriptor
    pub gist_id: String,
    /// Repository owner
    pub repo_owner: String,
    /// Repository name
    pub repo_name: String,
    /// Project root containing package.json and src-tauri/
    pub project_root: PathBuf,
    /// Build command run in the project root
    pub build_command: BuildCommand,
    /// Cap on buffered build output in bytes
    pub max_build_output: usize,
    /// Bundle output directory
    pub bundle_dir: PathBuf,
    /// Platform key in the update descriptor
    pub platform: String,
    /// Descriptor file name inside the gist
    pub gist_file: String,
    /// GitHub API root
    pub api_url: String,
}

impl ReleaseSettings {
    /// Validate required settings and resolve paths.
    ///
    /// Every missing required variable is reported at once.
    pub fn from_args(args: &Args) -> Result<Self> {
        let required = [
            (ENV_GITHUB_TOKEN, &args.github_token),
            (ENV_GIST_ID, &args.gist_id),
            (ENV_REPO_OWNER, &args.repo_owner),
            (ENV_REPO_NAME, &args.repo_name),
        ];

        let missing: Vec<String> = required
            .iter()
            .filter(|(_, value)| non_empty(value).is_none())
            .map(|(name, _)| name.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(ConfigError::MissingEnvironment { variables: missing }.into());
        }

        let build_command = BuildCommand::parse(&args.build_command)?;
        let bundle_dir = if args.bundle_dir.is_absolute() {
            args.bundle_dir.clone()
        } else {
            args.project_root.join(&args.bundle_dir)
        };

        Ok(Self {
            github_token: required_value(&args.github_token),
            gist_id: required_value(&args.gist_id),
            repo_owner: required_value(&args.repo_owner),
            repo_name: required_value(&args.repo_name),
            project_root: args.project_root.clone(),
            build_command,
            max_build_output: args.max_build_output,
            bundle_dir,
            platform: args.platform.clone(),
            gist_file: args.gist_file.clone(),
            api_url: args.api_url.clone(),
        })
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn required_value(value: &Option<String>) -> String {
    non_empty(value).unwrap_or_default().to_string()
}
