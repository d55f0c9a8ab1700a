//! # Tauri Release
//!
//! Publishes a release of a Tauri desktop application and refreshes the
//! update descriptor its deployed clients poll.
//!
//! One run performs, in order:
//!
//! - **Version bump**: rewrites the version in `package.json`,
//!   `src-tauri/tauri.conf.json` and `src-tauri/Cargo.toml`
//! - **Build**: runs `pnpm tauri build` and waits for it
//! - **Artifact discovery**: finds the installer and its `.sig` file
//! - **GitHub release**: creates release `v<version>` and uploads the installer
//! - **Descriptor publish**: overwrites `latest.json` in the updater gist
//!
//! The first failure stops the run. Nothing is retried or rolled back.
//!
//! ## Usage
//!
//! ```bash
//! tauri_release 1.0.1          # routine update
//! tauri_release 1.0.1 true     # critical update
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod artifacts;
pub mod builder;
pub mod cli;
pub mod config;
pub mod error;
pub mod github;
pub mod pipeline;
pub mod publish;
pub mod state;
pub mod version;

pub use artifacts::{ArtifactPair, locate_artifacts};
pub use builder::{BuildCommand, Builder};
pub use cli::Args;
pub use config::ReleaseSettings;
pub use error::{ReleaseError, Result};
pub use github::{GitHubClient, GitHubReleaseManager};
pub use pipeline::{ReleaseOutcome, ReleasePipeline};
pub use publish::{GistPublisher, UpdateDescriptor};
pub use state::{ReleasePhase, ReleaseState};
pub use version::ManifestUpdater;

/// Version and criticality of the release being published
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseRequest {
    /// Version without the leading `v`
    pub version: String,
    /// Whether clients should treat the update as critical
    pub critical: bool,
}

impl ReleaseRequest {
    /// Create a request
    pub fn new(version: impl Into<String>, critical: bool) -> Self {
        Self {
            version: version.into(),
            critical,
        }
    }

    /// Build a request from parsed arguments
    pub fn from_args(args: &Args) -> Self {
        Self::new(args.release_version.trim(), args.is_critical())
    }
}
