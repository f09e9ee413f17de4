//! GitHub release listing operation.

use crate::github::gateway::{ApiRequest, Gateway};
use crate::github::models::Release;
use crate::github::{error::GitHubError, util::spawn_task};
use crate::runtime::AsyncTask;
use std::sync::Arc;

/// List the repository's releases.
///
/// A single unpaginated request: only the first page the API returns is
/// seen, which is enough for a repository with one staging release.
pub(crate) fn list_releases(inner: Arc<Gateway>) -> AsyncTask<Result<Vec<Release>, GitHubError>> {
    spawn_task(async move {
        let value = inner.call("releases", ApiRequest::get()).await?;
        let releases: Vec<Release> = serde_json::from_value(value)?;
        Ok(releases)
    })
}
