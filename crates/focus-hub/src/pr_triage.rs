//! Remote side of pull request triage for one repository
//!
//! The selection and confirmation state machine lives in
//! `state::RepoDetailState`; this module only talks to GitHub.

use gh_client::{ClientResult, GitHubClient, PullRequest, Repository, RepositoryName};

/// Everything the detail view shows for a repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryDetail {
    pub repository: Repository,
    pub pull_requests: Vec<PullRequest>,
}

pub async fn load_detail(
    client: &dyn GitHubClient,
    name: &RepositoryName,
) -> ClientResult<RepositoryDetail> {
    let (repository, pull_requests) = tokio::try_join!(
        client.fetch_repository(&name.owner, &name.name),
        client.fetch_open_pull_requests(&name.owner, &name.name),
    )?;
    Ok(RepositoryDetail {
        repository,
        pull_requests,
    })
}

/// Squash-merge `number`
pub async fn merge(client: &dyn GitHubClient, name: &RepositoryName, number: u64) -> ClientResult<()> {
    client
        .merge_pull_request(&name.owner, &name.name, number)
        .await?;
    log::info!("Merged {}#{}", name, number);
    Ok(())
}

/// Whether the head branch of `pull_request` lives in `name` itself
///
/// Branches in forks, or whose repository was deleted, are never touched.
pub fn should_delete_branch(pull_request: &PullRequest, name: &RepositoryName) -> bool {
    pull_request.head_repository_full_name() == Some(name.full_name().as_str())
}

/// Close `pull_request`, then delete its branch when it lives in this repository
///
/// Returns whether the branch was deleted. A failed deletion is logged and
/// does not fail the rejection.
pub async fn reject(
    client: &dyn GitHubClient,
    name: &RepositoryName,
    pull_request: &PullRequest,
) -> ClientResult<bool> {
    client
        .close_pull_request(&name.owner, &name.name, pull_request.number)
        .await?;
    log::info!("Closed {}#{}", name, pull_request.number);

    if !should_delete_branch(pull_request, name) {
        log::debug!(
            "Keeping branch {} of {}#{}, it does not live in {}",
            pull_request.head.ref_name,
            name,
            pull_request.number,
            name
        );
        return Ok(false);
    }

    let git_ref = format!("heads/{}", pull_request.head.ref_name);
    match client.delete_ref(&name.owner, &name.name, &git_ref).await {
        Ok(()) => {
            log::info!("Deleted {} in {}", git_ref, name);
            Ok(true)
        }
        Err(e) => {
            log::warn!("Failed to delete {} in {}: {}", git_ref, name, e);
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{pull_request, FakeClient};
    use gh_client::ClientError;
    use pretty_assertions::assert_eq;

    fn name() -> RepositoryName {
        RepositoryName::parse("a/b").unwrap()
    }

    #[tokio::test]
    async fn test_load_detail() {
        let client = FakeClient::new()
            .with_repository("a/b", 2)
            .with_pull_requests(
                "a/b",
                vec![
                    pull_request(9, Some("a/b"), "feature"),
                    pull_request(7, None, "gone"),
                ],
            );

        let detail = load_detail(&client, &name()).await.unwrap();
        assert_eq!(detail.repository.full_name, "a/b");
        let numbers: Vec<u64> = detail.pull_requests.iter().map(|pr| pr.number).collect();
        assert_eq!(numbers, vec![9, 7]);
    }

    #[tokio::test]
    async fn test_load_detail_fails_when_repo_missing() {
        let client = FakeClient::new();
        let err = load_detail(&client, &name()).await.unwrap_err();
        assert!(matches!(err, ClientError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_merge_calls_remote() {
        let client = FakeClient::new();
        merge(&client, &name(), 7).await.unwrap();
        assert_eq!(client.calls(), vec!["merge a/b#7"]);
    }

    #[tokio::test]
    async fn test_reject_deletes_branch_of_same_repository() {
        let client = FakeClient::new();
        let pr = pull_request(7, Some("a/b"), "feature/x");

        assert!(reject(&client, &name(), &pr).await.unwrap());
        assert_eq!(
            client.calls(),
            vec!["close a/b#7", "delete a/b heads/feature/x"]
        );
    }

    #[tokio::test]
    async fn test_reject_skips_fork_branch() {
        let client = FakeClient::new();
        let pr = pull_request(7, Some("someone/b"), "feature");

        assert!(!reject(&client, &name(), &pr).await.unwrap());
        assert_eq!(client.calls(), vec!["close a/b#7"]);
    }

    #[tokio::test]
    async fn test_reject_without_head_repo_still_succeeds() {
        let client = FakeClient::new();
        let pr = pull_request(7, None, "feature");

        assert!(!reject(&client, &name(), &pr).await.unwrap());
        assert_eq!(client.calls(), vec!["close a/b#7"]);
    }

    #[tokio::test]
    async fn test_failed_branch_deletion_is_ignored() {
        let client = FakeClient::new().fail_delete(ClientError::RemoteAction {
            message: "Reference does not exist".to_string(),
        });
        let pr = pull_request(7, Some("a/b"), "feature");

        assert!(!reject(&client, &name(), &pr).await.unwrap());
    }

    #[tokio::test]
    async fn test_failed_close_skips_deletion() {
        let client = FakeClient::new().fail_close(
            7,
            ClientError::RemoteAction {
                message: "Forbidden".to_string(),
            },
        );
        let pr = pull_request(7, Some("a/b"), "feature");

        assert!(reject(&client, &name(), &pr).await.is_err());
        assert_eq!(client.calls(), vec!["close a/b#7"]);
    }

    #[test]
    fn test_should_delete_branch_compares_full_name() {
        assert!(should_delete_branch(&pull_request(1, Some("a/b"), "x"), &name()));
        assert!(!should_delete_branch(&pull_request(1, Some("a/bc"), "x"), &name()));
        assert!(!should_delete_branch(&pull_request(1, None, "x"), &name()));
    }
}
