//! Fake GitHub client and fixtures shared by unit tests

use crate::session_manager::SharedClientManager;
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use gh_client::{
    ClientError, ClientManager, ClientResult, GitHubClient, HeadRepository, Owner, PullRequest,
    PullRequestBase, PullRequestHead, Repository, User,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, RwLock};

#[derive(Default)]
struct FakeState {
    user: Option<ClientResult<User>>,
    repositories: HashMap<String, ClientResult<Repository>>,
    counts: HashMap<String, u64>,
    pull_requests: HashMap<String, ClientResult<Vec<PullRequest>>>,
    merge_errors: HashMap<u64, ClientError>,
    close_errors: HashMap<u64, ClientError>,
    delete_error: Option<ClientError>,
    calls: Vec<String>,
}

/// Scriptable in-memory `GitHubClient` that records every call
#[derive(Default)]
pub struct FakeClient {
    inner: Mutex<FakeState>,
}

impl FakeClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(self, login: &str) -> Self {
        self.lock().user = Some(Ok(user(login)));
        self
    }

    pub fn with_user_error(self, error: ClientError) -> Self {
        self.lock().user = Some(Err(error));
        self
    }

    pub fn with_repository(self, full_name: &str, open_prs: u64) -> Self {
        {
            let mut inner = self.lock();
            inner
                .repositories
                .insert(full_name.to_string(), Ok(repository(full_name)));
            inner.counts.insert(full_name.to_string(), open_prs);
        }
        self
    }

    /// Serve `canonical` when asked for `requested`, as GitHub does for other casings
    pub fn with_alias(self, requested: &str, canonical: &str) -> Self {
        {
            let mut inner = self.lock();
            let repository = Ok(repository(canonical));
            let count = inner.counts.get(canonical).copied().unwrap_or_default();
            inner.repositories.insert(requested.to_string(), repository);
            inner.counts.insert(requested.to_string(), count);
        }
        self
    }

    pub fn with_repository_error(self, full_name: &str, error: ClientError) -> Self {
        self.lock()
            .repositories
            .insert(full_name.to_string(), Err(error));
        self
    }

    pub fn with_pull_requests(self, full_name: &str, pull_requests: Vec<PullRequest>) -> Self {
        self.lock()
            .pull_requests
            .insert(full_name.to_string(), Ok(pull_requests));
        self
    }

    pub fn with_pull_requests_error(self, full_name: &str, error: ClientError) -> Self {
        self.lock()
            .pull_requests
            .insert(full_name.to_string(), Err(error));
        self
    }

    pub fn fail_merge(self, number: u64, error: ClientError) -> Self {
        self.lock().merge_errors.insert(number, error);
        self
    }

    pub fn fail_close(self, number: u64, error: ClientError) -> Self {
        self.lock().close_errors.insert(number, error);
        self
    }

    pub fn fail_delete(self, error: ClientError) -> Self {
        self.lock().delete_error = Some(error);
        self
    }

    /// Every call made so far, e.g. `repo a/b` or `merge a/b#7`
    pub fn calls(&self) -> Vec<String> {
        self.lock().calls.clone()
    }

    fn lock(&self) -> MutexGuard<'_, FakeState> {
        self.inner.lock().unwrap()
    }

    fn record(&self, call: String) -> MutexGuard<'_, FakeState> {
        let mut inner = self.lock();
        inner.calls.push(call);
        inner
    }
}

#[async_trait]
impl GitHubClient for FakeClient {
    async fn fetch_authenticated_user(&self) -> ClientResult<User> {
        let inner = self.record("user".to_string());
        inner.user.clone().unwrap_or_else(|| Ok(user("octocat")))
    }

    async fn fetch_repository(&self, owner: &str, repo: &str) -> ClientResult<Repository> {
        let full_name = format!("{}/{}", owner, repo);
        let inner = self.record(format!("repo {}", full_name));
        inner
            .repositories
            .get(&full_name)
            .cloned()
            .unwrap_or_else(|| Err(not_found()))
    }

    async fn fetch_open_pull_requests(
        &self,
        owner: &str,
        repo: &str,
    ) -> ClientResult<Vec<PullRequest>> {
        let full_name = format!("{}/{}", owner, repo);
        let inner = self.record(format!("pulls {}", full_name));
        inner
            .pull_requests
            .get(&full_name)
            .cloned()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn count_open_pull_requests(&self, owner: &str, repo: &str) -> ClientResult<u64> {
        let full_name = format!("{}/{}", owner, repo);
        let inner = self.record(format!("count {}", full_name));
        Ok(inner.counts.get(&full_name).copied().unwrap_or(0))
    }

    async fn merge_pull_request(&self, owner: &str, repo: &str, number: u64) -> ClientResult<()> {
        let inner = self.record(format!("merge {}/{}#{}", owner, repo, number));
        match inner.merge_errors.get(&number) {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }

    async fn close_pull_request(&self, owner: &str, repo: &str, number: u64) -> ClientResult<()> {
        let inner = self.record(format!("close {}/{}#{}", owner, repo, number));
        match inner.close_errors.get(&number) {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }

    async fn delete_ref(&self, owner: &str, repo: &str, git_ref: &str) -> ClientResult<()> {
        let inner = self.record(format!("delete {}/{} {}", owner, repo, git_ref));
        match &inner.delete_error {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

/// Client manager whose factory always hands out `client`, recording tokens
pub fn client_manager(client: Arc<FakeClient>) -> (SharedClientManager, Arc<Mutex<Vec<String>>>) {
    let tokens = Arc::new(Mutex::new(Vec::new()));
    let seen = Arc::clone(&tokens);
    let manager = ClientManager::with_factory(Arc::new(move |token: &str| {
        seen.lock().unwrap().push(token.to_string());
        Ok(Arc::clone(&client) as Arc<dyn GitHubClient>)
    }));
    (Arc::new(RwLock::new(manager)), tokens)
}

pub fn not_found() -> ClientError {
    ClientError::NotFound {
        message: "Not Found".to_string(),
    }
}

pub fn user(login: &str) -> User {
    User {
        login: login.to_string(),
        avatar_url: format!("https://avatars.example/{}", login),
        name: None,
    }
}

pub fn repository(full_name: &str) -> Repository {
    let (owner, name) = full_name.split_once('/').unwrap();
    Repository {
        id: 1000 + full_name.len() as u64,
        name: name.to_string(),
        full_name: full_name.to_string(),
        owner: Owner {
            login: owner.to_string(),
            avatar_url: String::new(),
        },
        html_url: format!("https://github.com/{}", full_name),
        description: Some(format!("The {} project", name)),
        stargazers_count: 12,
        forks_count: 3,
        open_issues_count: 5,
    }
}

/// Open pull request whose head branch lives in `head_repo` (None: deleted fork)
pub fn pull_request(number: u64, head_repo: Option<&str>, branch: &str) -> PullRequest {
    PullRequest {
        id: 500 + number,
        number,
        title: format!("Change #{}", number),
        state: "open".to_string(),
        html_url: format!("https://github.com/a/b/pull/{}", number),
        body: None,
        user: Owner {
            login: "contributor".to_string(),
            avatar_url: String::new(),
        },
        created_at: Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap(),
        updated_at: Utc.with_ymd_and_hms(2024, 1, 3, 3, 4, 5).unwrap(),
        head: PullRequestHead {
            sha: format!("{:040}", number),
            ref_name: branch.to_string(),
            repo: head_repo.map(|full_name| HeadRepository {
                full_name: full_name.to_string(),
            }),
        },
        base: PullRequestBase {
            ref_name: "main".to_string(),
        },
    }
}
