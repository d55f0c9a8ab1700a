//! In-memory release progress tracking.
//!
//! The pipeline only moves forward: each stage is entered once, in order,
//! and any failure moves the state to [`ReleasePhase::Failed`]. Nothing here
//! is persisted between runs.

/// Phase of the release operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ReleasePhase {
    /// Arguments and configuration accepted
    Init,
    /// Version fields rewritten in every manifest
    ManifestsUpdated,
    /// Build command exited successfully
    Built,
    /// Installer and signature located
    ArtifactsFound,
    /// GitHub release created
    ReleaseCreated,
    /// Installer uploaded as a release asset
    AssetUploaded,
    /// Update descriptor written to the gist
    ManifestPublished,
    /// Release completed successfully
    Done,
    /// Release failed
    Failed,
}

impl ReleasePhase {
    /// Phase that follows this one on success
    pub fn next(self) -> Option<ReleasePhase> {
        match self {
            ReleasePhase::Init => Some(ReleasePhase::ManifestsUpdated),
            ReleasePhase::ManifestsUpdated => Some(ReleasePhase::Built),
            ReleasePhase::Built => Some(ReleasePhase::ArtifactsFound),
            ReleasePhase::ArtifactsFound => Some(ReleasePhase::ReleaseCreated),
            ReleasePhase::ReleaseCreated => Some(ReleasePhase::AssetUploaded),
            ReleasePhase::AssetUploaded => Some(ReleasePhase::ManifestPublished),
            ReleasePhase::ManifestPublished => Some(ReleasePhase::Done),
            ReleasePhase::Done | ReleasePhase::Failed => None,
        }
    }

    /// Whether the pipeline has stopped
    pub fn is_terminal(self) -> bool {
        matches!(self, ReleasePhase::Done | ReleasePhase::Failed)
    }
}

/// Checkpoint in the release process
#[derive(Debug, Clone)]
pub struct ReleaseCheckpoint {
    /// Phase reached
    pub phase: ReleasePhase,
    /// Timestamp when the phase was reached
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Failure recorded when the pipeline stops early
#[derive(Debug, Clone)]
pub struct ReleaseFailure {
    /// Last phase completed before the failure
    pub after: ReleasePhase,
    /// Error message
    pub message: String,
}

/// Release progress for a single run
#[derive(Debug, Clone)]
pub struct ReleaseState {
    /// Version being released
    pub release_version: String,
    /// Timestamp when release started
    pub started_at: chrono::DateTime<chrono::Utc>,
    /// Timestamp when release was last updated
    pub updated_at: chrono::DateTime<chrono::Utc>,
    /// Current phase of the release
    pub current_phase: ReleasePhase,
    /// Phases reached so far
    pub checkpoints: Vec<ReleaseCheckpoint>,
    /// Failure, if the run stopped early
    pub failure: Option<ReleaseFailure>,
}

impl ReleaseState {
    /// Create a new release state in [`ReleasePhase::Init`]
    pub fn new(release_version: impl Into<String>) -> Self {
        let now = chrono::Utc::now();
        Self {
            release_version: release_version.into(),
            started_at: now,
            updated_at: now,
            current_phase: ReleasePhase::Init,
            checkpoints: vec![ReleaseCheckpoint {
                phase: ReleasePhase::Init,
                timestamp: now,
            }],
            failure: None,
        }
    }

    /// Move to the next phase.
    ///
    /// Returns the new phase, or `None` if the state is already terminal.
    pub fn advance(&mut self) -> Option<ReleasePhase> {
        let next = self.current_phase.next()?;
        let now = chrono::Utc::now();
        self.current_phase = next;
        self.updated_at = now;
        self.checkpoints.push(ReleaseCheckpoint {
            phase: next,
            timestamp: now,
        });
        log::debug!("release v{} reached {}", self.release_version, next);
        Some(next)
    }

    /// Record a failure and stop the pipeline
    pub fn fail(&mut self, message: impl Into<String>) {
        if self.current_phase.is_terminal() {
            return;
        }
        self.failure = Some(ReleaseFailure {
            after: self.current_phase,
            message: message.into(),
        });
        self.current_phase = ReleasePhase::Failed;
        self.updated_at = chrono::Utc::now();
    }

    /// Check if a specific phase has been reached
    pub fn has_completed(&self, phase: ReleasePhase) -> bool {
        self.checkpoints.iter().any(|cp| cp.phase == phase)
    }

    /// Get progress percentage
    pub fn progress_percentage(&self) -> f64 {
        match self.current_phase {
            ReleasePhase::Init => 0.0,
            ReleasePhase::ManifestsUpdated => 10.0,
            ReleasePhase::Built => 50.0,
            ReleasePhase::ArtifactsFound => 55.0,
            ReleasePhase::ReleaseCreated => 65.0,
            ReleasePhase::AssetUploaded => 90.0,
            ReleasePhase::ManifestPublished => 99.0,
            ReleasePhase::Done => 100.0,
            ReleasePhase::Failed => 0.0,
        }
    }

    /// Get elapsed time
    pub fn elapsed_time(&self) -> chrono::Duration {
        self.updated_at - self.started_at
    }

    /// Create a summary of the release state
    pub fn summary(&self) -> String {
        format!(
            "Release v{} ({}) - {:.1}% complete - {} elapsed",
            self.release_version,
            self.current_phase,
            self.progress_percentage(),
            format_duration(self.elapsed_time())
        )
    }
}

fn format_duration(duration: chrono::Duration) -> String {
    let total_seconds = duration.num_seconds();
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}

impl std::fmt::Display for ReleasePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReleasePhase::Init => write!(f, "Init"),
            ReleasePhase::ManifestsUpdated => write!(f, "Manifests Updated"),
            ReleasePhase::Built => write!(f, "Built"),
            ReleasePhase::ArtifactsFound => write!(f, "Artifacts Found"),
            ReleasePhase::ReleaseCreated => write!(f, "Release Created"),
            ReleasePhase::AssetUploaded => write!(f, "Asset Uploaded"),
            ReleasePhase::ManifestPublished => write!(f, "Manifest Published"),
            ReleasePhase::Done => write!(f, "Done"),
            ReleasePhase::Failed => write!(f, "Failed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advances_through_every_phase_in_order() {
        let mut state = ReleaseState::new("1.0.0");
        let mut seen = Vec::new();
        while let Some(phase) = state.advance() {
            seen.push(phase);
        }
        assert_eq!(
            seen,
            vec![
                ReleasePhase::ManifestsUpdated,
                ReleasePhase::Built,
                ReleasePhase::ArtifactsFound,
                ReleasePhase::ReleaseCreated,
                ReleasePhase::AssetUploaded,
                ReleasePhase::ManifestPublished,
                ReleasePhase::Done,
            ]
        );
        assert_eq!(state.progress_percentage(), 100.0);
    }

    #[test]
    fn failure_is_terminal() {
        let mut state = ReleaseState::new("1.0.0");
        state.advance();
        state.fail("build exited with 1");

        assert_eq!(state.current_phase, ReleasePhase::Failed);
        let failure = state.failure.as_ref().unwrap();
        assert_eq!(failure.after, ReleasePhase::ManifestsUpdated);
        assert!(state.advance().is_none());
        assert!(!state.has_completed(ReleasePhase::Built));
    }

    #[test]
    fn duration_formatting() {
        assert_eq!(format_duration(chrono::Duration::seconds(42)), "42s");
        assert_eq!(format_duration(chrono::Duration::seconds(125)), "2m 5s");
        assert_eq!(format_duration(chrono::Duration::seconds(3725)), "1h 2m 5s");
    }
}
