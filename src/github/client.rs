//! Minimal GitHub REST client for releases, release assets and gists.

use crate::error::{GitHubError, Result};
use bytes::Bytes;
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use url::Url;

/// Public GitHub API endpoint
pub const DEFAULT_API_URL: &str = "https://api.github.com";

const API_VERSION: &str = "2022-11-28";
const CLIENT_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Payload for `POST /repos/{owner}/{repo}/releases`
#[derive(Debug, Clone, Serialize)]
pub struct NewRelease {
    /// Tag to create the release for
    pub tag_name: String,
    /// Release title
    pub name: String,
    /// Markdown body
    pub body: String,
    /// Create as draft
    pub draft: bool,
    /// Mark as prerelease
    pub prerelease: bool,
}

/// Release returned by the API
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedRelease {
    /// Server-assigned release ID
    pub id: u64,
    /// Hypermedia upload URL, e.g. `.../assets{?name,label}`
    pub upload_url: String,
    /// Release page
    #[serde(default)]
    pub html_url: String,
}

/// Release asset returned by the upload endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct UploadedAsset {
    /// Asset name
    pub name: String,
    /// Size in bytes
    #[serde(default)]
    pub size: u64,
    /// Public download URL
    pub browser_download_url: String,
}

/// Gist returned by the update endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct UpdatedGist {
    /// Gist ID
    pub id: String,
    /// Gist page
    #[serde(default)]
    pub html_url: Option<String>,
}

#[derive(Debug, Serialize)]
struct GistUpdate<'a> {
    files: BTreeMap<&'a str, GistFileContent<'a>>,
}

#[derive(Debug, Serialize)]
struct GistFileContent<'a> {
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
    #[serde(default)]
    errors: Vec<serde_json::Value>,
}

/// Authenticated GitHub API client
#[derive(Clone)]
pub struct GitHubClient {
    http: Client,
    api_url: Url,
    token: String,
}

impl fmt::Debug for GitHubClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GitHubClient")
            .field("api_url", &self.api_url.as_str())
            .field("token", &"<redacted>")
            .finish()
    }
}

impl GitHubClient {
    /// Create a client for a custom API root (GitHub Enterprise, tests)
    pub fn with_base_url(token: impl Into<String>, api_url: &str) -> Result<Self> {
        let api_url = Url::parse(api_url).map_err(|e| GitHubError::InvalidUrl {
            url: api_url.to_string(),
            reason: e.to_string(),
        })?;

        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(USER_AGENT, HeaderValue::from_static(CLIENT_USER_AGENT));
        headers.insert(
            "x-github-api-version",
            HeaderValue::from_static(API_VERSION),
        );

        let http = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| GitHubError::ClientInit(e.to_string()))?;

        Ok(Self {
            http,
            api_url,
            token: token.into(),
        })
    }

    /// Create a release
    pub async fn create_release(
        &self,
        owner: &str,
        repo: &str,
        release: &NewRelease,
    ) -> Result<CreatedRelease> {
        let url = self.endpoint(&["repos", owner, repo, "releases"])?;
        log::debug!("POST {}", url);
        self.send("create release", self.http.post(url).json(release))
            .await
    }

    /// Upload a binary asset to a release.
    ///
    /// `upload_url` is the value returned on the release; its URI template
    /// suffix is stripped before the query is appended.
    pub async fn upload_release_asset(
        &self,
        upload_url: &str,
        asset_name: &str,
        label: Option<&str>,
        content_type: &str,
        content: Bytes,
    ) -> Result<UploadedAsset> {
        let base = upload_url.split('{').next().unwrap_or(upload_url);
        let mut url = Url::parse(base).map_err(|e| GitHubError::InvalidUrl {
            url: upload_url.to_string(),
            reason: e.to_string(),
        })?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("name", asset_name);
            if let Some(label) = label {
                query.append_pair("label", label);
            }
        }

        log::debug!("POST {} ({} bytes)", url, content.len());
        let request = self
            .http
            .post(url)
            .header(CONTENT_TYPE, content_type)
            .body(content);
        self.send("upload release asset", request).await
    }

    /// Replace the content of one file in a gist
    pub async fn update_gist_file(
        &self,
        gist_id: &str,
        file_name: &str,
        content: &str,
    ) -> Result<UpdatedGist> {
        let url = self.endpoint(&["gists", gist_id])?;
        let payload = GistUpdate {
            files: BTreeMap::from([(file_name, GistFileContent { content })]),
        };
        log::debug!("PATCH {}", url);
        self.send("update gist", self.http.patch(url).json(&payload))
            .await
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.api_url.clone();
        url.path_segments_mut()
            .map_err(|_| GitHubError::InvalidUrl {
                url: self.api_url.to_string(),
                reason: "cannot be a base URL".to_string(),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        request: RequestBuilder,
    ) -> Result<T> {
        let response = request
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|e| GitHubError::Request {
                operation,
                source: e,
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GitHubError::Api {
                operation,
                status: status.as_u16(),
                message: api_error_message(&body),
            }
            .into());
        }

        response.json::<T>().await.map_err(|e| {
            GitHubError::Request {
                operation,
                source: e,
            }
            .into()
        })
    }
}

/// Flatten a GitHub error body into one line
fn api_error_message(body: &str) -> String {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(parsed) if parsed.errors.is_empty() => parsed.message,
        Ok(parsed) => {
            let details: Vec<String> = parsed
                .errors
                .iter()
                .map(|e| match e.get("code").and_then(|c| c.as_str()) {
                    Some(code) => code.to_string(),
                    None => e.to_string(),
                })
                .collect();
            format!("{} ({})", parsed.message, details.join(", "))
        }
        Err(_) if body.is_empty() => "<empty response>".to_string(),
        Err(_) => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_message_includes_codes() {
        let body = r#"{"message":"Validation Failed","errors":[{"resource":"Release","code":"already_exists","field":"tag_name"}]}"#;
        assert_eq!(api_error_message(body), "Validation Failed (already_exists)");
    }

    #[test]
    fn error_message_falls_back_to_raw_body() {
        assert_eq!(api_error_message("Bad Gateway"), "Bad Gateway");
        assert_eq!(api_error_message(""), "<empty response>");
    }

    #[test]
    fn endpoint_encodes_segments() {
        let client = GitHubClient::with_base_url("t", "https://ghe.example.com/api/v3/").unwrap();
        let url = client.endpoint(&["repos", "acme", "my app", "releases"]).unwrap();
        assert_eq!(
            url.as_str(),
            "https://ghe.example.com/api/v3/repos/acme/my%20app/releases"
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        assert!(GitHubClient::with_base_url("t", "not a url").is_err());
    }
}
