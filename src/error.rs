//! Error types for tauri_release operations.
//!
//! Every stage of the release pipeline has its own error enum so that the
//! final diagnostic can name the stage and offer recovery suggestions.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for tauri_release operations
pub type Result<T> = std::result::Result<T, ReleaseError>;

/// Main error type for all tauri_release operations
#[derive(Error, Debug)]
pub enum ReleaseError {
    /// Configuration and argument errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Manifest version update errors
    #[error("Manifest error: {0}")]
    Manifest(#[from] ManifestError),

    /// External build errors
    #[error("Build error: {0}")]
    Build(#[from] BuildError),

    /// Artifact discovery errors
    #[error("Artifact error: {0}")]
    Artifact(#[from] ArtifactError),

    /// GitHub API errors
    #[error("GitHub error: {0}")]
    GitHub(#[from] GitHubError),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration errors, detected before any side effect
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variables are not set
    #[error("Missing required environment variables: {}", variables.join(", "))]
    MissingEnvironment {
        /// Names of every missing variable
        variables: Vec<String>,
    },

    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },
}

/// Manifest update errors
#[derive(Error, Debug)]
pub enum ManifestError {
    /// Manifest could not be read
    #[error("Failed to read {path}: {source}")]
    ReadFailed {
        /// Manifest path
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// Manifest could not be written
    #[error("Failed to write {path}: {source}")]
    WriteFailed {
        /// Manifest path
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// Version pattern failed to compile
    #[error("Invalid version pattern `{pattern}`: {reason}")]
    InvalidPattern {
        /// Offending pattern
        pattern: String,
        /// Compile error
        reason: String,
    },

    /// The version pattern did not match anything
    #[error("No version field matching `{pattern}` found in {path}")]
    VersionFieldNotFound {
        /// Manifest path
        path: PathBuf,
        /// Pattern that failed to match
        pattern: String,
    },
}

/// External build errors
#[derive(Error, Debug)]
pub enum BuildError {
    /// Build command string was empty
    #[error("Build command is empty")]
    EmptyCommand,

    /// Build program is not on PATH
    #[error("Build program '{program}' not found on PATH: {reason}")]
    ProgramNotFound {
        /// Program name
        program: String,
        /// Reason from the lookup
        reason: String,
    },

    /// Build process could not be spawned or awaited
    #[error("Failed to run '{command}': {source}")]
    SpawnFailed {
        /// Full command line
        command: String,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// Build process exited unsuccessfully
    #[error("'{command}' exited with {status}\n{output}")]
    Failed {
        /// Full command line
        command: String,
        /// Exit status description
        status: String,
        /// Tail of the captured output
        output: String,
    },

    /// Build output exceeded the buffer cap
    #[error("'{command}' produced more than {limit} bytes of output")]
    OutputOverflow {
        /// Full command line
        command: String,
        /// Buffer cap in bytes
        limit: usize,
    },
}

/// Artifact discovery errors
#[derive(Error, Debug)]
pub enum ArtifactError {
    /// Bundle output directory does not exist
    #[error("Bundle path not found: {path}. Check the bundle targets in tauri.conf.json.")]
    BundleDirMissing {
        /// Expected directory
        path: PathBuf,
    },

    /// No installer in the bundle directory
    #[error("Could not find an installer ({extensions}) in {path}")]
    InstallerNotFound {
        /// Directory that was scanned
        path: PathBuf,
        /// Accepted extensions
        extensions: String,
    },

    /// No signature in the bundle directory
    #[error("Could not find a signature (.{extension}) in {path}")]
    SignatureNotFound {
        /// Directory that was scanned
        path: PathBuf,
        /// Accepted extension
        extension: String,
    },

    /// Artifact could not be read
    #[error("Failed to read artifact {path}: {source}")]
    ReadFailed {
        /// Artifact path
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },
}

/// GitHub REST API errors
#[derive(Error, Debug)]
pub enum GitHubError {
    /// Transport-level failure
    #[error("{operation} request failed: {source}")]
    Request {
        /// API operation
        operation: &'static str,
        /// Underlying reqwest error
        #[source]
        source: reqwest::Error,
    },

    /// API returned a non-success status
    #[error("{operation} failed with HTTP {status}: {message}")]
    Api {
        /// API operation
        operation: &'static str,
        /// HTTP status code
        status: u16,
        /// Message returned by the API
        message: String,
    },

    /// URL could not be built
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl {
        /// Offending URL
        url: String,
        /// Parse failure
        reason: String,
    },

    /// Client could not be constructed
    #[error("Failed to initialise GitHub client: {0}")]
    ClientInit(String),
}

impl ReleaseError {
    /// Get actionable recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<String> {
        match self {
            ReleaseError::Config(ConfigError::MissingEnvironment { variables }) => vec![
                format!("Export {} in your shell", variables.join(", ")),
                "Or add them to a .env file in the project root".to_string(),
            ],
            ReleaseError::Config(ConfigError::InvalidArguments { .. }) => vec![
                "Usage: tauri_release <version> [critical]".to_string(),
            ],
            ReleaseError::Manifest(ManifestError::VersionFieldNotFound { path, .. }) => vec![
                format!("Make sure {} declares a version field", path.display()),
                "Run the tool from the project root or pass --project-root".to_string(),
            ],
            ReleaseError::Build(BuildError::ProgramNotFound { program, .. }) => vec![
                format!("Install '{}' or add it to PATH", program),
                "Override the command with --build-command".to_string(),
            ],
            ReleaseError::Build(BuildError::OutputOverflow { .. }) => vec![
                "Reduce build verbosity or run the build manually to inspect output".to_string(),
            ],
            ReleaseError::Artifact(ArtifactError::BundleDirMissing { .. }) => vec![
                "Check bundle.targets in src-tauri/tauri.conf.json".to_string(),
                "Point --bundle-dir at the directory holding the installer".to_string(),
            ],
            ReleaseError::Artifact(ArtifactError::SignatureNotFound { .. }) => vec![
                "Set TAURI_SIGNING_PRIVATE_KEY so the build emits .sig files".to_string(),
                "Enable bundle.createUpdaterArtifacts in tauri.conf.json".to_string(),
            ],
            ReleaseError::GitHub(GitHubError::Api { status: 401, .. }) => vec![
                "Verify GITHUB_TOKEN is valid and not expired".to_string(),
            ],
            ReleaseError::GitHub(GitHubError::Api { status: 403, .. })
            | ReleaseError::GitHub(GitHubError::Api { status: 404, .. }) => vec![
                "Check REPO_OWNER, REPO_NAME and GIST_ID".to_string(),
                "Ensure the token has the repo and gist scopes".to_string(),
            ],
            ReleaseError::GitHub(GitHubError::Api { status: 422, .. }) => vec![
                "A release for this tag may already exist; delete it or choose a new version"
                    .to_string(),
            ],
            _ => vec!["Check the error message above for specific details".to_string()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_environment_lists_every_variable() {
        let err = ReleaseError::from(ConfigError::MissingEnvironment {
            variables: vec!["GITHUB_TOKEN".to_string(), "GIST_ID".to_string()],
        });
        let message = err.to_string();
        assert!(message.contains("GITHUB_TOKEN, GIST_ID"));
        assert!(err.recovery_suggestions()[0].contains("GITHUB_TOKEN, GIST_ID"));
    }

    #[test]
    fn duplicate_tag_suggests_new_version() {
        let err = ReleaseError::from(GitHubError::Api {
            operation: "create release",
            status: 422,
            message: "Validation Failed".to_string(),
        });
        assert!(err.to_string().contains("HTTP 422"));
        assert!(err.recovery_suggestions()[0].contains("already exist"));
    }
}
