//! Release lookup by draft flag or exact name.

use super::ReleaseApi;
use crate::github::error::{GitHubError, GitHubResult};
use crate::github::models::Release;
use std::fmt;

/// How the target release is chosen from the listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReleaseSelector {
    /// The release with `draft == true`
    Draft,
    /// The release whose name equals this string exactly
    Named(String),
}

impl ReleaseSelector {
    /// Whether `release` satisfies the selector
    #[must_use]
    pub fn matches(&self, release: &Release) -> bool {
        match self {
            ReleaseSelector::Draft => release.draft,
            ReleaseSelector::Named(name) => release.name() == name,
        }
    }
}

impl fmt::Display for ReleaseSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReleaseSelector::Draft => f.write_str("draft release"),
            ReleaseSelector::Named(name) => write!(f, "release named {name:?}"),
        }
    }
}

/// First release satisfying `selector`, in API order.
pub async fn find_release<A: ReleaseApi>(
    api: &A,
    selector: &ReleaseSelector,
) -> GitHubResult<Option<Release>> {
    let releases = api.list_releases().await?;
    Ok(releases.into_iter().find(|r| selector.matches(r)))
}

/// The single release satisfying `selector`.
///
/// Zero matches is [`GitHubError::ReleaseNotFound`]; more than one is
/// [`GitHubError::AmbiguousRelease`] since duplicate names and multiple
/// drafts are not supported.
pub async fn locate_release<A: ReleaseApi>(
    api: &A,
    selector: &ReleaseSelector,
) -> GitHubResult<Release> {
    let releases = api.list_releases().await?;
    select_one(releases, selector)
}

pub(crate) fn select_one(
    releases: Vec<Release>,
    selector: &ReleaseSelector,
) -> GitHubResult<Release> {
    let mut matching = releases.into_iter().filter(|r| selector.matches(r));
    let first = matching
        .next()
        .ok_or_else(|| GitHubError::ReleaseNotFound(selector.to_string()))?;

    let extra = matching.count();
    if extra > 0 {
        return Err(GitHubError::AmbiguousRelease {
            selector: selector.to_string(),
            count: extra + 1,
        });
    }
    Ok(first)
}
