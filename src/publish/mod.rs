//! Update descriptor construction and publishing.
//!
//! Deployed clients poll a single JSON document to learn about new versions.
//! This module builds that document and overwrites it in its gist.

mod descriptor;
mod gist;

pub use descriptor::{
    DEFAULT_PLATFORM, PlatformUpdate, UpdateDescriptor, format_pub_date, release_notes,
};
pub use gist::{DEFAULT_GIST_FILE, GistPublisher, PublishedManifest, gist_page_url};
