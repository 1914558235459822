//! Repository summary shown on a dashboard card

use gh_client::{Owner, Repository};

/// Description shown on a card whose data could not be loaded
pub const LOAD_FAILED_DESCRIPTION: &str =
    "Failed to load repository data. Check connection or permissions.";

/// Dashboard card data for one watchlist entry
///
/// `pull_requests_count`, `loading` and `error` are transient and rebuilt on
/// every fetch. Cards are identified by `full_name`; `id` is negative for
/// placeholders and must not be used as a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositorySummary {
    pub id: i64,
    pub name: String,
    pub full_name: String,
    pub owner: Owner,
    pub html_url: String,
    pub description: Option<String>,
    pub stargazers_count: u64,
    pub forks_count: u64,
    pub open_issues_count: u64,
    pub pull_requests_count: u64,
    pub loading: bool,
    pub error: bool,
}

impl RepositorySummary {
    pub fn from_repository(repository: Repository, pull_requests_count: u64) -> Self {
        Self {
            id: i64::try_from(repository.id).unwrap_or(i64::MAX),
            name: repository.name,
            full_name: repository.full_name,
            owner: repository.owner,
            html_url: repository.html_url,
            description: repository.description,
            stargazers_count: repository.stargazers_count,
            forks_count: repository.forks_count,
            open_issues_count: repository.open_issues_count,
            pull_requests_count,
            loading: false,
            error: false,
        }
    }

    /// Card shown while the first fetch for `full_name` is in flight
    pub fn loading(full_name: &str, position: usize) -> Self {
        let (owner, name) = split_full_name(full_name);
        Self {
            id: placeholder_id(position),
            name: name.to_string(),
            full_name: full_name.to_string(),
            owner: Owner {
                login: owner.to_string(),
                avatar_url: String::new(),
            },
            html_url: web_url(full_name),
            description: None,
            stargazers_count: 0,
            forks_count: 0,
            open_issues_count: 0,
            pull_requests_count: 0,
            loading: true,
            error: false,
        }
    }

    /// Placeholder for an entry whose fetch failed
    pub fn failed(full_name: &str, position: usize) -> Self {
        let (_, name) = split_full_name(full_name);
        Self {
            id: placeholder_id(position),
            name: name.to_string(),
            full_name: full_name.to_string(),
            owner: Owner {
                login: "Unknown".to_string(),
                avatar_url: String::new(),
            },
            html_url: web_url(full_name),
            description: Some(LOAD_FAILED_DESCRIPTION.to_string()),
            stargazers_count: 0,
            forks_count: 0,
            open_issues_count: 0,
            pull_requests_count: 0,
            loading: false,
            error: true,
        }
    }

    /// Keep the last known data but flag the card as failed
    pub fn mark_refresh_failed(&mut self) {
        self.loading = false;
        self.error = true;
    }

    /// Case-insensitive substring match over `owner/name`
    pub fn matches_filter(&self, filter: &str) -> bool {
        let filter = filter.trim();
        filter.is_empty()
            || self
                .full_name
                .to_lowercase()
                .contains(&filter.to_lowercase())
    }
}

fn placeholder_id(position: usize) -> i64 {
    -(i64::try_from(position).unwrap_or(i64::MAX - 1)) - 1
}

fn split_full_name(full_name: &str) -> (&str, &str) {
    full_name.split_once('/').unwrap_or(("", full_name))
}

fn web_url(full_name: &str) -> String {
    format!("https://github.com/{}", full_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn repository() -> Repository {
        Repository {
            id: 42,
            name: "react".to_string(),
            full_name: "facebook/react".to_string(),
            owner: Owner {
                login: "facebook".to_string(),
                avatar_url: "https://avatars.example/fb".to_string(),
            },
            html_url: "https://github.com/facebook/react".to_string(),
            description: Some("UI library".to_string()),
            stargazers_count: 10,
            forks_count: 2,
            open_issues_count: 3,
        }
    }

    #[test]
    fn test_from_repository_copies_fields() {
        let summary = RepositorySummary::from_repository(repository(), 7);
        assert_eq!(summary.id, 42);
        assert_eq!(summary.full_name, "facebook/react");
        assert_eq!(summary.pull_requests_count, 7);
        assert!(!summary.error);
        assert!(!summary.loading);
    }

    #[test]
    fn test_failed_placeholder() {
        let summary = RepositorySummary::failed("a/b", 0);
        assert!(summary.error);
        assert!(summary.id < 0);
        assert_eq!(summary.name, "b");
        assert_eq!(summary.owner.login, "Unknown");
        assert_eq!(summary.stargazers_count, 0);
        assert_eq!(summary.pull_requests_count, 0);
        assert_eq!(summary.html_url, "https://github.com/a/b");
        assert_eq!(summary.description.as_deref(), Some(LOAD_FAILED_DESCRIPTION));
    }

    #[test]
    fn test_placeholder_ids_differ_by_position() {
        assert_ne!(
            RepositorySummary::failed("a/b", 0).id,
            RepositorySummary::failed("a/b", 1).id
        );
    }

    #[test]
    fn test_refresh_failure_keeps_data() {
        let mut summary = RepositorySummary::from_repository(repository(), 7);
        summary.mark_refresh_failed();
        assert!(summary.error);
        assert_eq!(summary.stargazers_count, 10);
        assert_eq!(summary.description.as_deref(), Some("UI library"));
    }

    #[test]
    fn test_filter_is_case_insensitive() {
        let summary = RepositorySummary::from_repository(repository(), 0);
        assert!(summary.matches_filter("FaceBook/Re"));
        assert!(summary.matches_filter(""));
        assert!(!summary.matches_filter("vue"));
    }
}
