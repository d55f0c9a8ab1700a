//! The release pipeline.
//!
//! Six stages run strictly in order, each consuming the previous stage's
//! output: manifests, build, artifact discovery, GitHub release, asset
//! upload and descriptor publish. The first failure stops the run; side
//! effects of completed stages are left in place.

use crate::ReleaseRequest;
use crate::artifacts::{self, ArtifactPair};
use crate::builder::Builder;
use crate::cli::RuntimeConfig;
use crate::config::ReleaseSettings;
use crate::error::Result;
use crate::github::{
    GitHubClient, GitHubReleaseConfig, GitHubReleaseManager, GitHubReleaseResult, UploadedAsset,
};
use crate::publish::{GistPublisher, PublishedManifest, UpdateDescriptor, gist_page_url};
use crate::state::ReleaseState;
use crate::version::ManifestUpdater;
use std::path::PathBuf;

/// Everything produced by a successful run
#[derive(Debug, Clone)]
pub struct ReleaseOutcome {
    /// Manifests whose content changed
    pub modified_files: Vec<PathBuf>,
    /// Installer and signature that were published
    pub artifacts: ArtifactPair,
    /// Created GitHub release
    pub release: GitHubReleaseResult,
    /// Uploaded installer asset
    pub asset: UploadedAsset,
    /// Descriptor written to the gist
    pub descriptor: UpdateDescriptor,
    /// Gist write result
    pub manifest: PublishedManifest,
    /// Public gist page
    pub gist_url: String,
    /// Final pipeline state
    pub state: ReleaseState,
}

/// Runs one release
pub struct ReleasePipeline<'a> {
    settings: &'a ReleaseSettings,
    request: &'a ReleaseRequest,
    config: &'a RuntimeConfig,
}

impl<'a> ReleasePipeline<'a> {
    /// Create a pipeline for one request
    pub fn new(
        settings: &'a ReleaseSettings,
        request: &'a ReleaseRequest,
        config: &'a RuntimeConfig,
    ) -> Self {
        Self {
            settings,
            request,
            config,
        }
    }

    /// Run every stage.
    ///
    /// On failure the error is returned unchanged after being recorded
    /// against the phase reached.
    pub async fn run(&self) -> Result<ReleaseOutcome> {
        let mut state = ReleaseState::new(&self.request.version);
        match self.execute(&mut state).await {
            Ok(outcome) => Ok(outcome),
            Err(e) => {
                state.fail(e.to_string());
                log::error!("{}", state.summary());
                Err(e)
            }
        }
    }

    async fn execute(&self, state: &mut ReleaseState) -> Result<ReleaseOutcome> {
        let settings = self.settings;
        let request = self.request;
        let config = self.config;

        let client = GitHubClient::with_base_url(&settings.github_token, &settings.api_url)?;
        let github = GitHubReleaseManager::new(
            client.clone(),
            GitHubReleaseConfig {
                owner: settings.repo_owner.clone(),
                repo: settings.repo_name.clone(),
            },
        );
        let gist = GistPublisher::new(client, &settings.gist_id, &settings.gist_file);

        // 1. Manifests
        config.println("📝 Updating versions...");
        let updater = ManifestUpdater::for_tauri_project(&settings.project_root, &request.version)?;
        let update = updater.update_all()?;
        for path in &update.modified_files {
            config.indent(&format!("✓ {}", path.display()));
        }
        for path in &update.unchanged_files {
            config.indent(&format!("= {} (already {})", path.display(), request.version));
        }
        self.reached(state);

        // 2. Build
        config.println(&format!("🔨 Building app ({})...", settings.build_command));
        Builder::new(settings.build_command.clone(), &settings.project_root)
            .with_output_limit(settings.max_build_output)
            .run()
            .await?;
        config.success_println("Build finished");
        self.reached(state);

        // 3. Artifacts
        config.println("📦 Locating assets...");
        let artifacts = artifacts::locate_artifacts(&settings.bundle_dir)?;
        let signature = artifacts::read_signature(&artifacts.signature)?;
        config.indent(&format!("Installer: {}", artifacts.installer.display()));
        config.indent(&format!("Signature: {}", artifacts.signature.display()));
        self.reached(state);

        // 4. Release
        config.println("☁️  Creating GitHub release...");
        let release = github.create_release(request).await?;
        config.success_println(&format!("Created release {}", release.tag_name));
        self.reached(state);

        // 5. Asset
        config.println("⬆️  Uploading installer...");
        let asset = github.upload_installer(&release, &artifacts.installer).await?;
        config.success_println(&format!("Uploaded {} ({} bytes)", asset.name, asset.size));
        self.reached(state);

        // 6. Descriptor
        config.println(&format!("🔄 Updating gist with {}...", settings.gist_file));
        let descriptor = UpdateDescriptor::new(request, chrono::Utc::now()).with_platform(
            &settings.platform,
            signature,
            &asset.browser_download_url,
        );
        let manifest = gist.publish(&descriptor).await?;
        self.reached(state);

        state.advance();
        Ok(ReleaseOutcome {
            modified_files: update.modified_files,
            artifacts,
            release,
            asset,
            descriptor,
            manifest,
            gist_url: gist_page_url(&settings.repo_owner, &settings.gist_id),
            state: state.clone(),
        })
    }

    fn reached(&self, state: &mut ReleaseState) {
        if state.advance().is_some() {
            log::info!("{}", state.summary());
        }
    }
}
