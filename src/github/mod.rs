//! GitHub integration for release operations

mod client;
mod release_manager;

pub use client::{
    CreatedRelease, DEFAULT_API_URL, GitHubClient, NewRelease, UpdatedGist, UploadedAsset,
};
pub use release_manager::{
    CRITICAL_NOTICE, GitHubReleaseConfig, GitHubReleaseManager, GitHubReleaseResult,
    ROUTINE_NOTICE,
};
