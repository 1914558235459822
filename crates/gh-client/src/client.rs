//! GitHub client trait
//!
//! Every operation the dashboard performs against GitHub goes through this
//! trait, so views and managers can be exercised against a fake in tests.

use crate::error::ClientResult;
use crate::types::{PullRequest, Repository, User};
use async_trait::async_trait;

/// GitHub API client trait
///
/// Implementations are stateless per call: no retries, no caching. A failed
/// call surfaces immediately as a [`crate::ClientError`].
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` so a single client can be shared by
/// concurrently running fetches.
#[async_trait]
pub trait GitHubClient: Send + Sync {
    /// Fetch the user the token belongs to (identity check for login)
    async fn fetch_authenticated_user(&self) -> ClientResult<User>;

    /// Fetch repository metadata
    ///
    /// Doubles as the existence check when adding to the watchlist.
    async fn fetch_repository(&self, owner: &str, repo: &str) -> ClientResult<Repository>;

    /// Fetch up to 100 open pull requests in the order GitHub returns them
    async fn fetch_open_pull_requests(
        &self,
        owner: &str,
        repo: &str,
    ) -> ClientResult<Vec<PullRequest>>;

    /// Count open pull requests via the search API (no paging)
    async fn count_open_pull_requests(&self, owner: &str, repo: &str) -> ClientResult<u64>;

    /// Squash-merge a pull request
    async fn merge_pull_request(&self, owner: &str, repo: &str, number: u64) -> ClientResult<()>;

    /// Close a pull request without merging
    async fn close_pull_request(&self, owner: &str, repo: &str, number: u64) -> ClientResult<()>;

    /// Delete a git ref of the form `heads/<branch>`
    async fn delete_ref(&self, owner: &str, repo: &str, git_ref: &str) -> ClientResult<()>;
}
