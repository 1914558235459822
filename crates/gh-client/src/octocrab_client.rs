//! Octocrab-based GitHub API client
//!
//! Direct implementation of the `GitHubClient` trait using the octocrab library.

use crate::client::GitHubClient;
use crate::error::{map_octocrab_error, ClientError, ClientResult, Operation};
use crate::types::{MergeMethod, MergeResponse, PullRequest, Repository, SearchCount, User};
use crate::DEFAULT_API_URL;
use async_trait::async_trait;
use http::header::HeaderName;
use log::{debug, warn};
use octocrab::params::repos::Reference;
use octocrab::Octocrab;
use std::sync::Arc;

/// REST API version pinned on every request
pub const API_VERSION: &str = "2022-11-28";

/// Open pull requests fetched per repository (one page, no further paging)
const PULLS_PER_PAGE: &str = "100";

/// Direct GitHub API client using octocrab
#[derive(Debug, Clone)]
pub struct OctocrabClient {
    octocrab: Arc<Octocrab>,
}

impl OctocrabClient {
    /// Create a new client with the given octocrab instance
    pub fn new(octocrab: Arc<Octocrab>) -> Self {
        Self { octocrab }
    }

    /// Build a client authenticated with a personal access token
    ///
    /// Must be called from within a tokio runtime.
    pub fn from_token(token: &str, base_url: &str) -> ClientResult<Self> {
        let mut builder = Octocrab::builder()
            .personal_token(token.to_string())
            .add_header(
                HeaderName::from_static("x-github-api-version"),
                API_VERSION.to_string(),
            );

        if base_url != DEFAULT_API_URL {
            builder = builder
                .base_uri(base_url)
                .map_err(|e| ClientError::Validation {
                    message: format!("Invalid API URL '{}': {}", base_url, e),
                })?;
        }

        let octocrab = builder.build().map_err(|e| ClientError::Api {
            status: None,
            message: format!("Failed to build GitHub client: {}", e),
        })?;

        Ok(Self::new(Arc::new(octocrab)))
    }
}

#[async_trait]
impl GitHubClient for OctocrabClient {
    async fn fetch_authenticated_user(&self) -> ClientResult<User> {
        debug!("Fetching authenticated user");
        self.octocrab
            .get("/user", None::<&()>)
            .await
            .map_err(|e| map_octocrab_error(Operation::Identity, e))
    }

    async fn fetch_repository(&self, owner: &str, repo: &str) -> ClientResult<Repository> {
        debug!("Fetching repository {}/{}", owner, repo);
        let route = format!("/repos/{}/{}", owner, repo);
        self.octocrab
            .get(route, None::<&()>)
            .await
            .map_err(|e| map_octocrab_error(Operation::Read, e))
    }

    async fn fetch_open_pull_requests(
        &self,
        owner: &str,
        repo: &str,
    ) -> ClientResult<Vec<PullRequest>> {
        debug!("Fetching open PRs for {}/{}", owner, repo);
        let route = format!("/repos/{}/{}/pulls", owner, repo);
        let prs: Vec<PullRequest> = self
            .octocrab
            .get(route, Some(&[("state", "open"), ("per_page", PULLS_PER_PAGE)]))
            .await
            .map_err(|e| map_octocrab_error(Operation::Read, e))?;

        debug!("Fetched {} PRs for {}/{}", prs.len(), owner, repo);
        Ok(prs)
    }

    async fn count_open_pull_requests(&self, owner: &str, repo: &str) -> ClientResult<u64> {
        let query = format!("repo:{}/{} is:pr is:open", owner, repo);
        let result: SearchCount = self
            .octocrab
            .get(
                "/search/issues",
                Some(&[("q", query.as_str()), ("per_page", "1")]),
            )
            .await
            .map_err(|e| map_octocrab_error(Operation::Read, e))?;

        debug!("{}/{} has {} open PRs", owner, repo, result.total_count);
        Ok(result.total_count)
    }

    async fn merge_pull_request(&self, owner: &str, repo: &str, number: u64) -> ClientResult<()> {
        debug!("Squash-merging {}/{}#{}", owner, repo, number);
        let route = format!("/repos/{}/{}/pulls/{}/merge", owner, repo, number);
        let body = serde_json::json!({ "merge_method": MergeMethod::Squash });
        let response: MergeResponse = self
            .octocrab
            .put(route, Some(&body))
            .await
            .map_err(|e| map_octocrab_error(Operation::Mutation, e))?;

        if response.merged {
            Ok(())
        } else {
            let message = response
                .message
                .unwrap_or_else(|| "Pull request was not merged".to_string());
            warn!("Merge of {}/{}#{} refused: {}", owner, repo, number, message);
            Err(ClientError::RemoteAction { message })
        }
    }

    async fn close_pull_request(&self, owner: &str, repo: &str, number: u64) -> ClientResult<()> {
        debug!("Closing {}/{}#{}", owner, repo, number);
        let route = format!("/repos/{}/{}/pulls/{}", owner, repo, number);
        let body = serde_json::json!({ "state": "closed" });
        let _: serde_json::Value = self
            .octocrab
            .patch(route, Some(&body))
            .await
            .map_err(|e| map_octocrab_error(Operation::Mutation, e))?;
        Ok(())
    }

    async fn delete_ref(&self, owner: &str, repo: &str, git_ref: &str) -> ClientResult<()> {
        let reference = parse_reference(git_ref)?;
        debug!("Deleting ref {} in {}/{}", git_ref, owner, repo);
        self.octocrab
            .repos(owner, repo)
            .delete_ref(&reference)
            .await
            .map_err(|e| map_octocrab_error(Operation::Mutation, e))
    }
}

/// Convert `heads/<branch>` or `tags/<tag>` into an octocrab reference
fn parse_reference(git_ref: &str) -> ClientResult<Reference> {
    if let Some(branch) = git_ref.strip_prefix("heads/").filter(|b| !b.is_empty()) {
        Ok(Reference::Branch(branch.to_string()))
    } else if let Some(tag) = git_ref.strip_prefix("tags/").filter(|t| !t.is_empty()) {
        Ok(Reference::Tag(tag.to_string()))
    } else {
        Err(ClientError::Validation {
            message: format!("Unsupported ref '{}'", git_ref),
        })
    }
}
