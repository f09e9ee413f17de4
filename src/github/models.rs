//! Release and asset models
//!
//! Only the fields the release tools read are modelled; everything else in
//! the API payload is ignored during deserialization.

use serde::{Deserialize, Serialize};

/// A GitHub release as returned by `GET /repos/{owner}/{repo}/releases`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Release {
    /// Release ID
    pub id: u64,
    /// Release title; `null` for releases created without one
    #[serde(default)]
    pub name: Option<String>,
    /// Tag the release points at
    #[serde(default)]
    pub tag_name: String,
    /// Whether this is an unpublished draft
    #[serde(default)]
    pub draft: bool,
    /// Attached binary assets, in API order
    #[serde(default)]
    pub assets: Vec<Asset>,
    /// Upload URL template, e.g. `https://uploads.github.com/.../assets{?name,label}`
    pub upload_url: String,
}

impl Release {
    /// Release name, or empty when the API returned `null`
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }

    /// First asset with exactly this name
    #[must_use]
    pub fn asset_named(&self, name: &str) -> Option<&Asset> {
        self.assets.iter().find(|a| a.name == name)
    }
}

/// A binary file attached to a release
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    /// Asset ID, used for download and deletion
    pub id: u64,
    /// File name
    pub name: String,
    /// Public download URL
    pub browser_download_url: String,
    /// Size in bytes
    #[serde(default)]
    pub size: u64,
    /// MIME type declared at upload
    #[serde(default)]
    pub content_type: Option<String>,
}
