//! GitHub API utilities

use crate::runtime::AsyncTask;
use std::future::Future;

/// Spawn an async task for GitHub API operations.
///
/// Thin wrapper around `AsyncTask::spawn_async` so every operation module
/// hands back the same handle type.
#[inline]
pub fn spawn_task<T, F>(work: F) -> AsyncTask<T>
where
    T: Send + 'static,
    F: Future<Output = T> + Send + 'static,
{
    AsyncTask::spawn_async(work)
}

/// Whether `name` passes an optional substring filter.
///
/// Filters use containment, not equality: `"foo"` matches `"foobar.zip"`.
#[inline]
#[must_use]
pub fn matches_filter(name: &str, filter: Option<&str>) -> bool {
    filter.is_none_or(|f| name.contains(f))
}
