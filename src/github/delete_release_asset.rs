//! GitHub release asset deletion operation.

use crate::github::gateway::{ApiRequest, Gateway};
use crate::github::{error::GitHubError, util::spawn_task};
use crate::runtime::AsyncTask;
use std::sync::Arc;

/// Delete a release asset by ID.
///
/// # Notes
/// - GitHub answers `204 No Content`; the empty body is accepted
/// - A missing asset surfaces as [`GitHubError::NotFound`]
pub(crate) fn delete_release_asset(
    inner: Arc<Gateway>,
    asset_id: u64,
) -> AsyncTask<Result<(), GitHubError>> {
    spawn_task(async move {
        inner
            .call(&format!("releases/assets/{asset_id}"), ApiRequest::delete())
            .await?;
        Ok(())
    })
}
