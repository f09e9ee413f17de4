//! Asset synchronization for the staging release.
//!
//! Every operation resolves the release afresh; assets change between runs.

use super::locator::locate_release;
use super::{ReleaseApi, ReleaseSelector};
use crate::github::error::{GitHubError, GitHubResult};
use crate::github::models::Asset;
use crate::github::util::matches_filter;
use bytes::Bytes;
use log::{info, warn};
use std::path::{Path, PathBuf};

/// One asset written by [`download_assets`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadedAsset {
    pub name: String,
    pub path: PathBuf,
    pub bytes: u64,
}

/// Append `access_token=<token>` to a download URL for private-repository
/// direct download.
#[must_use]
pub fn with_access_token(url: &str, token: &str) -> String {
    let sep = if url.contains('?') { '&' } else { '?' };
    format!("{url}{sep}access_token={}", urlencoding::encode(token))
}

/// Download URLs of the selected release's assets whose names contain
/// `filter`, optionally with an embedded access token.
pub async fn list_asset_urls<A: ReleaseApi>(
    api: &A,
    selector: &ReleaseSelector,
    filter: Option<&str>,
    token: Option<&str>,
) -> GitHubResult<Vec<String>> {
    let release = locate_release(api, selector).await?;
    Ok(release
        .assets
        .iter()
        .filter(|a| matches_filter(&a.name, filter))
        .map(|a| match token {
            Some(t) => with_access_token(&a.browser_download_url, t),
            None => a.browser_download_url.clone(),
        })
        .collect())
}

/// Download every asset of the selected release whose name contains
/// `filter` into `dest_dir`, named after the asset. Existing files are
/// overwritten.
pub async fn download_assets<A: ReleaseApi>(
    api: &A,
    selector: &ReleaseSelector,
    filter: Option<&str>,
    dest_dir: &Path,
) -> GitHubResult<Vec<DownloadedAsset>> {
    let release = locate_release(api, selector).await?;

    let mut downloaded = Vec::new();
    for asset in release.assets.iter().filter(|a| matches_filter(&a.name, filter)) {
        let name = local_file_name(asset)?;
        let path = dest_dir.join(name);
        info!("Downloading {name}");
        let bytes = api.download_asset(asset, &path).await?;
        if asset.size != 0 && bytes != asset.size {
            warn!("{name}: expected {} bytes, wrote {bytes}", asset.size);
        }
        downloaded.push(DownloadedAsset {
            name: name.to_string(),
            path,
            bytes,
        });
    }
    Ok(downloaded)
}

/// Upload `file` to the selected release, replacing an asset of the same name.
///
/// The existing asset is deleted before the upload starts. The two steps are
/// not atomic: if the process dies in between, the asset is gone.
pub async fn push_asset<A: ReleaseApi>(
    api: &A,
    selector: &ReleaseSelector,
    file: &Path,
) -> GitHubResult<Asset> {
    let name = file
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| GitHubError::InvalidInput(format!("not a file name: {}", file.display())))?;
    let content = Bytes::from(tokio::fs::read(file).await?);

    info!("Pulling info on {selector}...");
    let release = locate_release(api, selector).await?;
    info!("Found: {}", release.name());

    if let Some(existing) = release.asset_named(name) {
        info!("Asset {name} exists, deleting.");
        match api.delete_asset(existing.id).await {
            Ok(()) => {}
            Err(e) if e.is_not_found() => warn!("Asset {name} was already deleted"),
            Err(e) => return Err(e),
        }
    }

    info!("Uploading {}...", file.display());
    let asset = api.upload_asset(&release, name, content).await?;
    info!("Done.");
    Ok(asset)
}

/// Asset names come from the API; refuse anything that would escape the
/// destination directory.
fn local_file_name(asset: &Asset) -> GitHubResult<&str> {
    let name = asset.name.as_str();
    if name.is_empty() || name == "." || name == ".." || name.contains(['/', '\\']) {
        return Err(GitHubError::InvalidInput(format!(
            "refusing to write asset {} to {name:?}",
            asset.id
        )));
    }
    Ok(name)
}
