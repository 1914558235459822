//! Typed GitHub REST client for the FocusHub dashboard
//!
//! This crate wraps the handful of GitHub endpoints the dashboard needs behind
//! the [`GitHubClient`] trait and maps every failure onto [`ClientError`].
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │            GitHubClient trait             │
//! │  - fetch_authenticated_user()             │
//! │  - fetch_repository()                     │
//! │  - fetch_open_pull_requests()             │
//! │  - count_open_pull_requests()             │
//! │  - merge_pull_request() / close / delete  │
//! └──────────────────────────────────────────┘
//!                      ▲
//!                      │
//!           ┌──────────┴─────────┐
//!           │   OctocrabClient   │◄──── ClientManager (token → client)
//!           └────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use gh_client::{ClientManager, GitHubClient};
//!
//! # async fn example() -> Result<(), gh_client::ClientError> {
//! let mut manager = ClientManager::new(gh_client::DEFAULT_API_URL);
//! let client = manager.initialize("ghp_example")?;
//! let user = client.fetch_authenticated_user().await?;
//! println!("signed in as {}", user.login);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod client_manager;
pub mod error;
pub mod octocrab_client;
pub mod types;

/// Public GitHub REST endpoint
pub const DEFAULT_API_URL: &str = "https://api.github.com";

pub use client::GitHubClient;
pub use client_manager::{ClientFactory, ClientManager};
pub use error::{ClientError, ClientResult};
pub use octocrab_client::OctocrabClient;
pub use types::{
    HeadRepository, MergeMethod, Owner, PullRequest, PullRequestBase, PullRequestHead,
    Repository, RepositoryName, User, REPOSITORY_FORMAT_HINT,
};
