//! Installer and signature discovery in the bundle output directory.

use crate::error::{ArtifactError, Result};
use std::path::{Path, PathBuf};

/// Default bundle directory relative to the project root (Windows NSIS)
pub const DEFAULT_BUNDLE_DIR: &str = "src-tauri/target/release/bundle/nsis";

/// Extensions accepted as installers
pub const INSTALLER_EXTENSIONS: &[&str] = &["exe", "msi"];

/// Extension of detached updater signatures
pub const SIGNATURE_EXTENSION: &str = "sig";

/// Installer and detached signature found side by side
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPair {
    /// Installer file
    pub installer: PathBuf,
    /// Detached signature file
    pub signature: PathBuf,
}

impl ArtifactPair {
    /// File name of the installer, used as the asset name
    pub fn installer_name(&self) -> Option<&str> {
        self.installer.file_name().and_then(|n| n.to_str())
    }
}

/// Find the installer and its signature in `bundle_dir`.
///
/// Entries are considered in lexicographic order so that the result does
/// not depend on filesystem enumeration order. The first installer wins.
/// The signature is `<installer>.sig` when it exists, otherwise the first
/// `.sig` file.
pub fn locate_artifacts(bundle_dir: &Path) -> Result<ArtifactPair> {
    if !bundle_dir.is_dir() {
        return Err(ArtifactError::BundleDirMissing {
            path: bundle_dir.to_path_buf(),
        }
        .into());
    }

    let mut names: Vec<String> = std::fs::read_dir(bundle_dir)
        .map_err(|e| ArtifactError::ReadFailed {
            path: bundle_dir.to_path_buf(),
            source: e,
        })?
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
        .filter_map(|entry| entry.file_name().into_string().ok())
        .collect();
    names.sort();

    let installer = names
        .iter()
        .find(|name| {
            INSTALLER_EXTENSIONS
                .iter()
                .any(|ext| has_extension(name, ext))
        })
        .ok_or_else(|| ArtifactError::InstallerNotFound {
            path: bundle_dir.to_path_buf(),
            extensions: INSTALLER_EXTENSIONS
                .iter()
                .map(|ext| format!(".{ext}"))
                .collect::<Vec<_>>()
                .join(", "),
        })?;

    let paired = format!("{installer}.{SIGNATURE_EXTENSION}");
    let signature = names
        .iter()
        .find(|name| **name == paired)
        .or_else(|| {
            names
                .iter()
                .find(|name| has_extension(name, SIGNATURE_EXTENSION))
        })
        .ok_or_else(|| ArtifactError::SignatureNotFound {
            path: bundle_dir.to_path_buf(),
            extension: SIGNATURE_EXTENSION.to_string(),
        })?;

    log::debug!("located installer {installer} with signature {signature}");
    Ok(ArtifactPair {
        installer: bundle_dir.join(installer),
        signature: bundle_dir.join(signature),
    })
}

fn has_extension(name: &str, ext: &str) -> bool {
    name.len() > ext.len() + 1
        && name.ends_with(ext)
        && name.as_bytes()[name.len() - ext.len() - 1] == b'.'
}

/// Read the signature file as text.
///
/// Signatures are base64 text; invalid UTF-8 is replaced rather than rejected.
pub fn read_signature(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).map_err(|e| ArtifactError::ReadFailed {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
