//! GitHub API data transfer objects
//!
//! These types mirror the JSON shapes returned by the REST endpoints the
//! dashboard uses. They are intentionally separate from application models
//! so this crate stays free of UI concerns.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ClientError;

/// Message shown when a repository identifier is not `owner/name`
pub const REPOSITORY_FORMAT_HINT: &str = "Format must be owner/repo (e.g. facebook/react)";

/// The user the token belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub login: String,
    #[serde(default)]
    pub avatar_url: String,
    /// Display name, if the user set one
    #[serde(default)]
    pub name: Option<String>,
}

/// Account that owns a repository or authored a pull request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    pub login: String,
    #[serde(default)]
    pub avatar_url: String,
}

/// Repository metadata as returned by `GET /repos/{owner}/{repo}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    pub id: u64,
    pub name: String,
    pub full_name: String,
    pub owner: Owner,
    pub html_url: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub forks_count: u64,
    #[serde(default)]
    pub open_issues_count: u64,
}

/// An open pull request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequest {
    pub id: u64,
    pub number: u64,
    pub title: String,
    pub state: String,
    pub html_url: String,
    #[serde(default)]
    pub body: Option<String>,
    pub user: Owner,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub head: PullRequestHead,
    pub base: PullRequestBase,
}

impl PullRequest {
    /// Full name of the repository the source branch lives in
    ///
    /// `None` when the source repository was deleted.
    pub fn head_repository_full_name(&self) -> Option<&str> {
        self.head.repo.as_ref().map(|r| r.full_name.as_str())
    }
}

/// Source side of a pull request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestHead {
    pub sha: String,
    #[serde(rename = "ref")]
    pub ref_name: String,
    #[serde(default)]
    pub repo: Option<HeadRepository>,
}

/// Repository the head branch belongs to (may be a fork)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadRepository {
    pub full_name: String,
}

/// Target side of a pull request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestBase {
    #[serde(rename = "ref")]
    pub ref_name: String,
}

/// Merge strategy sent to the merge endpoint
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MergeMethod {
    Merge,
    #[default]
    Squash,
    Rebase,
}

/// Body returned by `PUT /repos/{owner}/{repo}/pulls/{n}/merge`
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct MergeResponse {
    #[serde(default)]
    pub merged: bool,
    #[serde(default)]
    pub message: Option<String>,
}

/// Body returned by the issue search endpoint; only the count is read
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct SearchCount {
    pub total_count: u64,
}

/// A validated `owner/name` repository identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepositoryName {
    pub owner: String,
    pub name: String,
}

impl RepositoryName {
    /// Parse `owner/name`, surrounding whitespace ignored
    ///
    /// Exactly one `/` with non-empty parts on both sides is required.
    pub fn parse(full_name: &str) -> Result<Self, ClientError> {
        let mut parts = full_name.trim().split('/');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(owner), Some(name), None) if !owner.is_empty() && !name.is_empty() => Ok(Self {
                owner: owner.to_string(),
                name: name.to_string(),
            }),
            _ => Err(ClientError::Validation {
                message: REPOSITORY_FORMAT_HINT.to_string(),
            }),
        }
    }

    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

impl std::fmt::Display for RepositoryName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_repository_name() {
        let name = RepositoryName::parse("rust-lang/rust").unwrap();
        assert_eq!(name.owner, "rust-lang");
        assert_eq!(name.name, "rust");
        assert_eq!(name.full_name(), "rust-lang/rust");
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let name = RepositoryName::parse("  facebook/react \n").unwrap();
        assert_eq!(name.to_string(), "facebook/react");
    }

    #[test]
    fn test_parse_rejects_malformed_names() {
        for input in ["not-a-valid-name", "a/b/c", "/repo", "owner/", "", "/"] {
            let err = RepositoryName::parse(input).unwrap_err();
            assert!(
                matches!(err, ClientError::Validation { .. }),
                "'{}' should be rejected",
                input
            );
        }
    }

    #[test]
    fn test_merge_method_serializes_lowercase() {
        let json = serde_json::to_string(&MergeMethod::default()).unwrap();
        assert_eq!(json, "\"squash\"");
    }

    #[test]
    fn test_pull_request_without_head_repo() {
        let json = serde_json::json!({
            "id": 1,
            "number": 7,
            "title": "Fix typo",
            "state": "open",
            "html_url": "https://github.com/o/r/pull/7",
            "body": null,
            "user": { "login": "octocat", "avatar_url": "" },
            "created_at": "2024-01-01T00:00:00Z",
            "updated_at": "2024-01-02T00:00:00Z",
            "head": { "sha": "abc", "ref": "fix-typo", "repo": null },
            "base": { "ref": "main" }
        });
        let pr: PullRequest = serde_json::from_value(json).unwrap();
        assert_eq!(pr.head.ref_name, "fix-typo");
        assert_eq!(pr.head_repository_full_name(), None);
        assert_eq!(pr.base.ref_name, "main");
    }
}
