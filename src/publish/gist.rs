//! Publishing the update descriptor to a GitHub Gist.

use crate::error::Result;
use crate::github::GitHubClient;
use crate::publish::UpdateDescriptor;

/// Default file name of the descriptor inside the gist
pub const DEFAULT_GIST_FILE: &str = "latest.json";

/// Overwrites one file of an existing gist with the update descriptor
#[derive(Debug, Clone)]
pub struct GistPublisher {
    client: GitHubClient,
    gist_id: String,
    file_name: String,
}

/// Result of a descriptor publish
#[derive(Debug, Clone)]
pub struct PublishedManifest {
    /// Gist that was updated
    pub gist_id: String,
    /// File that was replaced
    pub file_name: String,
    /// Gist page, when returned by the API
    pub html_url: Option<String>,
}

impl GistPublisher {
    /// Create a publisher for `file_name` in gist `gist_id`
    pub fn new(
        client: GitHubClient,
        gist_id: impl Into<String>,
        file_name: impl Into<String>,
    ) -> Self {
        Self {
            client,
            gist_id: gist_id.into(),
            file_name: file_name.into(),
        }
    }

    /// Replace the file's entire content with the descriptor.
    ///
    /// No read-back is done; an accepted API call counts as success.
    pub async fn publish(&self, descriptor: &UpdateDescriptor) -> Result<PublishedManifest> {
        let content = descriptor.to_pretty_json()?;
        let gist = self
            .client
            .update_gist_file(&self.gist_id, &self.file_name, &content)
            .await?;
        log::info!(
            "published {} for v{} to gist {}",
            self.file_name,
            descriptor.version,
            gist.id
        );

        Ok(PublishedManifest {
            gist_id: self.gist_id.clone(),
            file_name: self.file_name.clone(),
            html_url: gist.html_url,
        })
    }
}

/// Public page of a gist owned by `owner`
pub fn gist_page_url(owner: &str, gist_id: &str) -> String {
    format!("https://gist.github.com/{}/{}", owner, gist_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_url_uses_owner_and_id() {
        assert_eq!(
            gist_page_url("acme", "abc123"),
            "https://gist.github.com/acme/abc123"
        );
    }
}
