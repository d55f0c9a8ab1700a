//! Version field rewriting for the project manifests.
//!
//! A Tauri project carries its version in three places: the frontend
//! `package.json`, the bundle config `src-tauri/tauri.conf.json` and the
//! native crate's `src-tauri/Cargo.toml`. Each is rewritten in place with a
//! single pattern substitution so that formatting and every other line are
//! left exactly as they were.

mod updater;

pub use updater::{ManifestUpdater, PlannedEdit, UpdateResult};

use crate::error::{ManifestError, Result};
use regex::{Captures, Regex};
use std::path::{Path, PathBuf};

/// `"version": "..."` in a JSON document. First match only.
pub const JSON_VERSION_PATTERN: &str = r#"("version"\s*:\s*")[^"]*(")"#;

/// `version = "..."` at the start of a line in a TOML document.
pub const CARGO_VERSION_PATTERN: &str = r#"(?m)^(version\s*=\s*")[^"]*(")"#;

/// A single manifest whose version field is replaced
#[derive(Debug, Clone)]
pub struct ManifestTarget {
    /// File to rewrite
    pub path: PathBuf,
    /// Pattern with two groups surrounding the version text
    pub pattern: Regex,
    /// Version written between the two groups
    pub version: String,
}

impl ManifestTarget {
    /// Create a target from a raw pattern.
    ///
    /// The pattern must define two capture groups: the text before the
    /// version value and the text after it.
    pub fn new(path: impl Into<PathBuf>, pattern: &str, version: &str) -> Result<Self> {
        let path = path.into();
        let pattern = Regex::new(pattern).map_err(|e| ManifestError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            path,
            pattern,
            version: version.to_string(),
        })
    }

    /// Target the first `"version"` key of a JSON manifest
    pub fn json(path: impl Into<PathBuf>, version: &str) -> Result<Self> {
        Self::new(path, JSON_VERSION_PATTERN, version)
    }

    /// Target the first line-leading `version =` key of a Cargo manifest
    pub fn cargo(path: impl Into<PathBuf>, version: &str) -> Result<Self> {
        Self::new(path, CARGO_VERSION_PATTERN, version)
    }

    /// Substitute the first match in `content`.
    ///
    /// Returns `None` if the pattern does not match. The version is inserted
    /// literally, so `$` in it is never treated as a group reference.
    pub fn substitute(&self, content: &str) -> Option<String> {
        if !self.pattern.is_match(content) {
            return None;
        }
        let replaced = self.pattern.replacen(content, 1, |caps: &Captures<'_>| {
            format!("{}{}{}", &caps[1], self.version, &caps[2])
        });
        Some(replaced.into_owned())
    }
}

/// The three manifests of a Tauri project, relative to `project_root`
pub fn tauri_manifest_targets(project_root: &Path, version: &str) -> Result<Vec<ManifestTarget>> {
    Ok(vec![
        ManifestTarget::json(project_root.join("package.json"), version)?,
        ManifestTarget::json(
            project_root.join("src-tauri").join("tauri.conf.json"),
            version,
        )?,
        ManifestTarget::cargo(project_root.join("src-tauri").join("Cargo.toml"), version)?,
    ])
}
