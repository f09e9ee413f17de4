//! GitHub release asset download operation.

use crate::github::gateway::{ApiRequest, Gateway, OCTET_STREAM};
use crate::github::{error::GitHubError, util::spawn_task};
use crate::runtime::AsyncTask;
use std::path::PathBuf;
use std::sync::Arc;

/// Download the binary content of a release asset into `dest`.
///
/// Requests the asset endpoint with `Accept: application/octet-stream`;
/// GitHub redirects to storage and the client follows. The authorization
/// header is not forwarded across the redirect. Returns the bytes written.
pub(crate) fn download_release_asset(
    inner: Arc<Gateway>,
    asset_id: u64,
    dest: PathBuf,
) -> AsyncTask<Result<u64, GitHubError>> {
    spawn_task(async move {
        let request = ApiRequest::get().header("Accept", OCTET_STREAM);
        inner
            .download_to(&format!("releases/assets/{asset_id}"), request, &dest)
            .await
    })
}
