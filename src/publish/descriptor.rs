//! The update descriptor polled by deployed clients (`latest.json`).

use crate::ReleaseRequest;
use crate::error::Result;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Default platform key for a Windows x64 NSIS build
pub const DEFAULT_PLATFORM: &str = "windows-x86_64";

/// Signature and download location for one platform
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformUpdate {
    /// Detached signature text
    pub signature: String,
    /// Installer download URL
    pub url: String,
}

/// Update descriptor document.
///
/// Field names and order are a compatibility contract with the updater in
/// deployed clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateDescriptor {
    /// Released version
    pub version: String,
    /// Human-readable notes
    pub notes: String,
    /// Publish timestamp, ISO-8601 UTC
    pub pub_date: String,
    /// Whether clients should treat the update as critical
    pub critical: bool,
    /// Per-platform signature and URL, sorted by platform key
    pub platforms: BTreeMap<String, PlatformUpdate>,
}

impl UpdateDescriptor {
    /// Create a descriptor with no platforms
    pub fn new(request: &ReleaseRequest, published_at: DateTime<Utc>) -> Self {
        Self {
            version: request.version.clone(),
            notes: release_notes(&request.version),
            pub_date: format_pub_date(published_at),
            critical: request.critical,
            platforms: BTreeMap::new(),
        }
    }

    /// Add or replace a platform entry
    pub fn with_platform(
        mut self,
        platform: impl Into<String>,
        signature: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        self.platforms.insert(
            platform.into(),
            PlatformUpdate {
                signature: signature.into(),
                url: url.into(),
            },
        );
        self
    }

    /// Serialize with two-space indentation
    pub fn to_pretty_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Notes shown by the client's update prompt
pub fn release_notes(version: &str) -> String {
    format!("Update v{} is available!", version)
}

/// ISO-8601 with millisecond precision and `Z` suffix
pub fn format_pub_date(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap()
    }

    #[test]
    fn pub_date_has_millis_and_z() {
        assert_eq!(format_pub_date(fixed_time()), "2024-03-09T14:05:07.000Z");
    }

    #[test]
    fn serialized_shape_is_stable() {
        let descriptor = UpdateDescriptor::new(&ReleaseRequest::new("1.2.0", true), fixed_time())
            .with_platform(DEFAULT_PLATFORM, "c2ln", "https://example.com/a.exe");

        let json = descriptor.to_pretty_json().unwrap();
        let expected = r#"{
  "version": "1.2.0",
  "notes": "Update v1.2.0 is available!",
  "pub_date": "2024-03-09T14:05:07.000Z",
  "critical": true,
  "platforms": {
    "windows-x86_64": {
      "signature": "c2ln",
      "url": "https://example.com/a.exe"
    }
  }
}"#;
        assert_eq!(json, expected);
    }

    #[test]
    fn platforms_are_sorted() {
        let descriptor = UpdateDescriptor::new(&ReleaseRequest::new("1.0.0", false), fixed_time())
            .with_platform("windows-x86_64", "w", "w")
            .with_platform("darwin-aarch64", "d", "d");
        let json = descriptor.to_pretty_json().unwrap();
        assert!(json.find("darwin-aarch64").unwrap() < json.find("windows-x86_64").unwrap());
    }
}
