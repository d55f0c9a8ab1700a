//! Plan-then-write coordination of manifest version updates.
//!
//! Every manifest is read and substituted in memory before any file is
//! written, so a manifest without a version field aborts the run with all
//! files still untouched.

use crate::error::{ManifestError, Result};
use crate::version::{ManifestTarget, tauri_manifest_targets};
use std::path::{Path, PathBuf};

/// Coordinates version updates across a fixed set of manifests
#[derive(Debug)]
pub struct ManifestUpdater {
    targets: Vec<ManifestTarget>,
}

/// A substitution computed in memory, not yet written
#[derive(Debug, Clone)]
pub struct PlannedEdit {
    /// File to rewrite
    pub path: PathBuf,
    /// Full content after substitution
    pub updated: String,
    /// Whether the substitution changed anything
    pub changed: bool,
}

/// Result of a manifest update
#[derive(Debug, Clone)]
pub struct UpdateResult {
    /// Files that were written
    pub modified_files: Vec<PathBuf>,
    /// Files that already carried the requested version
    pub unchanged_files: Vec<PathBuf>,
}

impl ManifestUpdater {
    /// Create an updater for arbitrary targets
    pub fn new(targets: Vec<ManifestTarget>) -> Self {
        Self { targets }
    }

    /// Create an updater for the three manifests of a Tauri project
    pub fn for_tauri_project(project_root: &Path, version: &str) -> Result<Self> {
        Ok(Self::new(tauri_manifest_targets(project_root, version)?))
    }

    /// Read every target and compute its new content without writing
    pub fn plan(&self) -> Result<Vec<PlannedEdit>> {
        self.targets
            .iter()
            .map(|target| {
                let content = std::fs::read_to_string(&target.path).map_err(|e| {
                    ManifestError::ReadFailed {
                        path: target.path.clone(),
                        source: e,
                    }
                })?;

                let updated = target.substitute(&content).ok_or_else(|| {
                    ManifestError::VersionFieldNotFound {
                        path: target.path.clone(),
                        pattern: target.pattern.as_str().to_string(),
                    }
                })?;

                log::debug!("planned version update for {}", target.path.display());
                Ok(PlannedEdit {
                    path: target.path.clone(),
                    changed: updated != content,
                    updated,
                })
            })
            .collect()
    }

    /// Write planned edits back to disk
    pub fn apply(edits: &[PlannedEdit]) -> Result<UpdateResult> {
        let mut modified_files = Vec::new();
        let mut unchanged_files = Vec::new();

        for edit in edits {
            std::fs::write(&edit.path, &edit.updated).map_err(|e| ManifestError::WriteFailed {
                path: edit.path.clone(),
                source: e,
            })?;

            if edit.changed {
                modified_files.push(edit.path.clone());
            } else {
                unchanged_files.push(edit.path.clone());
            }
        }

        Ok(UpdateResult {
            modified_files,
            unchanged_files,
        })
    }

    /// Plan and write every target
    pub fn update_all(&self) -> Result<UpdateResult> {
        let edits = self.plan()?;
        Self::apply(&edits)
    }
}
