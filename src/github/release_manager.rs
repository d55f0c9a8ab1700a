//! GitHub Release management for the release pipeline

use crate::ReleaseRequest;
use crate::error::{ArtifactError, Result};
use crate::github::client::{GitHubClient, NewRelease, UploadedAsset};
use bytes::Bytes;
use std::path::Path;

/// Release body line for critical updates
pub const CRITICAL_NOTICE: &str = "**⚠️ CRITICAL UPDATE**";

/// Release body line for routine updates
pub const ROUTINE_NOTICE: &str = "Routine update.";

/// Configuration for GitHub releases
#[derive(Debug, Clone)]
pub struct GitHubReleaseConfig {
    /// Repository owner
    pub owner: String,
    /// Repository name
    pub repo: String,
}

/// Result of GitHub release operation
#[derive(Debug, Clone)]
pub struct GitHubReleaseResult {
    /// Release ID
    pub release_id: u64,
    /// Release URL
    pub html_url: String,
    /// Asset upload endpoint
    pub upload_url: String,
    /// Tag the release was created for
    pub tag_name: String,
}

/// GitHub release manager
#[derive(Debug, Clone)]
pub struct GitHubReleaseManager {
    client: GitHubClient,
    config: GitHubReleaseConfig,
}

impl GitHubReleaseManager {
    /// Create new GitHub release manager
    pub fn new(client: GitHubClient, config: GitHubReleaseConfig) -> Self {
        Self { client, config }
    }

    /// Tag name for a version: `v<version>`
    pub fn tag_name(version: &str) -> String {
        format!("v{}", version)
    }

    /// Markdown body for a release
    pub fn release_body(request: &ReleaseRequest) -> String {
        let notice = if request.critical {
            CRITICAL_NOTICE
        } else {
            ROUTINE_NOTICE
        };
        format!("Release v{}\n\n{}", request.version, notice)
    }

    /// Create a published (non-draft, non-prerelease) GitHub release
    pub async fn create_release(&self, request: &ReleaseRequest) -> Result<GitHubReleaseResult> {
        let tag_name = Self::tag_name(&request.version);
        let release = NewRelease {
            tag_name: tag_name.clone(),
            name: tag_name.clone(),
            body: Self::release_body(request),
            draft: false,
            prerelease: false,
        };

        let created = self
            .client
            .create_release(&self.config.owner, &self.config.repo, &release)
            .await?;
        log::info!("created release {} (id {})", tag_name, created.id);

        Ok(GitHubReleaseResult {
            release_id: created.id,
            html_url: created.html_url,
            upload_url: created.upload_url,
            tag_name,
        })
    }

    /// Upload the installer to a release under its file name
    pub async fn upload_installer(
        &self,
        release: &GitHubReleaseResult,
        installer: &Path,
    ) -> Result<UploadedAsset> {
        let filename = installer
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| ArtifactError::ReadFailed {
                path: installer.to_path_buf(),
                source: std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    "installer file name is not valid UTF-8",
                ),
            })?;

        let content = tokio::fs::read(installer)
            .await
            .map_err(|e| ArtifactError::ReadFailed {
                path: installer.to_path_buf(),
                source: e,
            })?;

        let label = create_artifact_label(filename);
        let asset = self
            .client
            .upload_release_asset(
                &release.upload_url,
                filename,
                Some(&label),
                detect_bundle_content_type(installer),
                Bytes::from(content),
            )
            .await?;
        log::info!("uploaded {} ({} bytes)", asset.name, asset.size);

        Ok(asset)
    }
}

/// Detect MIME type for installer artifacts
fn detect_bundle_content_type(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("exe") => "application/vnd.microsoft.portable-executable",
        Some("msi") => "application/x-msi",
        Some("zip") => "application/zip",
        _ => "application/octet-stream",
    }
}

/// Create descriptive label for artifact based on filename
fn create_artifact_label(filename: &str) -> String {
    let arch = if filename.contains("aarch64") || filename.contains("arm64") {
        "ARM64"
    } else if filename.contains("x86_64") || filename.contains("x64") {
        "x86_64"
    } else if filename.contains("x86") {
        "x86"
    } else {
        "multi-arch"
    };

    let kind = if filename.ends_with(".msi") {
        "Windows MSI installer"
    } else if filename.ends_with(".exe") {
        "Windows setup"
    } else {
        "Installer"
    };

    format!("{} - {}", kind, arch)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_carries_critical_notice() {
        let request = ReleaseRequest::new("1.4.0", true);
        let body = GitHubReleaseManager::release_body(&request);
        assert_eq!(body, "Release v1.4.0\n\n**⚠️ CRITICAL UPDATE**");
    }

    #[test]
    fn body_carries_routine_notice() {
        let request = ReleaseRequest::new("1.4.0", false);
        let body = GitHubReleaseManager::release_body(&request);
        assert!(body.ends_with(ROUTINE_NOTICE));
        assert!(!body.contains("CRITICAL"));
    }

    #[test]
    fn labels_describe_installer() {
        assert_eq!(
            create_artifact_label("Nudge_1.0.0_x64-setup.exe"),
            "Windows setup - x86_64"
        );
        assert_eq!(
            create_artifact_label("Nudge_1.0.0_arm64_en-US.msi"),
            "Windows MSI installer - ARM64"
        );
    }

    #[test]
    fn content_type_follows_extension() {
        assert_eq!(
            detect_bundle_content_type(Path::new("a.msi")),
            "application/x-msi"
        );
        assert_eq!(
            detect_bundle_content_type(Path::new("a.bin")),
            "application/octet-stream"
        );
    }
}
