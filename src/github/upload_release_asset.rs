//! Upload assets to GitHub releases
//!
//! Uploads go to the release's own `upload_url`, not the REST base. GitHub
//! hands that URL out as a template (`.../assets{?name,label}`) which is
//! expanded here before posting.

use crate::github::gateway::{ApiRequest, Gateway, OCTET_STREAM};
use crate::github::models::Asset;
use crate::github::{error::GitHubError, util::spawn_task};
use crate::runtime::AsyncTask;
use bytes::Bytes;
use lazy_static::lazy_static;
use regex::Regex;
use std::sync::Arc;

lazy_static! {
    static ref URL_TEMPLATE_RE: Result<Regex, regex::Error> = Regex::new(r"\{.*\}");
}

/// Options for uploading a release asset
#[derive(Debug, Clone)]
pub struct UploadAssetOptions {
    /// `upload_url` of the target release, template segment included
    pub upload_url: String,
    /// Asset filename (e.g., "tikzit-linux-x86_64.tar.gz")
    pub asset_name: String,
    /// Optional label for the asset
    pub label: Option<String>,
    /// File content as bytes
    pub content: Bytes,
}

/// Replace the `{...}` template segment with a `name` (and optional `label`)
/// query. The values are percent-encoded.
#[must_use]
pub fn expand_upload_url(template: &str, asset_name: &str, label: Option<&str>) -> String {
    let mut query = format!("?name={}", urlencoding::encode(asset_name));
    if let Some(label) = label {
        query.push_str("&label=");
        query.push_str(&urlencoding::encode(label));
    }
    match URL_TEMPLATE_RE.as_ref() {
        Ok(re) if re.is_match(template) => {
            re.replace(template, regex::NoExpand(&query)).into_owned()
        }
        // no template segment: append the query
        _ => format!("{template}{query}"),
    }
}

/// Upload an asset to a GitHub release.
///
/// The body is declared `application/octet-stream`. Returns the asset record
/// GitHub creates.
pub(crate) fn upload_release_asset(
    inner: Arc<Gateway>,
    options: UploadAssetOptions,
) -> AsyncTask<Result<Asset, GitHubError>> {
    spawn_task(async move {
        if options.asset_name.is_empty() {
            return Err(GitHubError::InvalidInput("asset name is empty".into()));
        }
        let url = expand_upload_url(
            &options.upload_url,
            &options.asset_name,
            options.label.as_deref(),
        );
        let request = ApiRequest::post(options.content).header("Content-Type", OCTET_STREAM);
        let value = inner.call(&url, request).await?;
        let asset: Asset = serde_json::from_value(value)?;
        Ok(asset)
    })
}
