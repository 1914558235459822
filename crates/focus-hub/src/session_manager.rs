//! Session and watchlist manager
//!
//! Single owner of the signed-in user, the token and the watchlist. Every
//! mutation goes through this type; views only ever see a [`SessionSnapshot`].
//!
//! The watchlist is never written before it has been read from disk once:
//! until [`SessionManager::startup`] has loaded it, add and remove are refused
//! with [`SessionError::StorageNotLoaded`].

use focus_hub_config::{CredentialStore, StorageError, WatchlistStore};
use gh_client::{ClientError, ClientManager, GitHubClient, RepositoryName, User};
use std::sync::{Arc, RwLock};
use thiserror::Error;

/// Client manager shared between the session and the data-loading middleware
pub type SharedClientManager = Arc<RwLock<ClientManager>>;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Watchlist has not been loaded yet")]
    StorageNotLoaded,
}

/// How the startup token check ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartupOutcome {
    /// No stored token; show the sign-in screen
    NoToken,
    /// Stored token verified
    Restored(User),
    /// GitHub rejected the stored token; it has been deleted
    AuthRejected(String),
    /// The token could not be checked (network, rate limit, server); it is kept
    VerificationFailed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    /// Already on the watchlist; nothing was fetched or written
    AlreadyPresent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginSuccess {
    pub user: User,
    /// False when the token could not be written to disk
    pub token_persisted: bool,
}

/// Read-only view of the session for rendering
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub user: Option<User>,
    pub watchlist: Vec<String>,
    pub storage_loaded: bool,
}

impl SessionSnapshot {
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}

#[derive(Default)]
struct Session {
    token: Option<String>,
    user: Option<User>,
}

pub struct SessionManager {
    clients: SharedClientManager,
    credentials: Box<dyn CredentialStore>,
    watchlist_store: Box<dyn WatchlistStore>,
    session: Session,
    /// Stored token that could not be verified yet
    unverified_token: Option<String>,
    watchlist: Vec<String>,
    storage_loaded: bool,
}

impl SessionManager {
    pub fn new(
        clients: SharedClientManager,
        credentials: Box<dyn CredentialStore>,
        watchlist_store: Box<dyn WatchlistStore>,
    ) -> Self {
        Self {
            clients,
            credentials,
            watchlist_store,
            session: Session::default(),
            unverified_token: None,
            watchlist: Vec::new(),
            storage_loaded: false,
        }
    }

    /// Load the watchlist and the stored token, then verify the token
    pub async fn startup(&mut self) -> StartupOutcome {
        match self.watchlist_store.load() {
            Ok(watchlist) => {
                self.watchlist = dedup(watchlist);
                self.storage_loaded = true;
            }
            Err(e) => {
                // Stay unloaded so a later mutation cannot clobber the file
                log::error!("Failed to load watchlist: {}", e);
            }
        }

        match self.credentials.load_token() {
            Some(token) => self.verify_stored_token(token).await,
            None => {
                log::info!("No stored token");
                StartupOutcome::NoToken
            }
        }
    }

    /// Check again a stored token whose verification failed at startup
    pub async fn retry_verification(&mut self) -> StartupOutcome {
        match self.unverified_token.take() {
            Some(token) => self.verify_stored_token(token).await,
            None => StartupOutcome::NoToken,
        }
    }

    async fn verify_stored_token(&mut self, token: String) -> StartupOutcome {
        match self.authenticate(&token).await {
            Ok(user) => {
                log::info!("Restored session for {}", user.login);
                self.session = Session {
                    token: Some(token),
                    user: Some(user.clone()),
                };
                StartupOutcome::Restored(user)
            }
            Err(e) if e.is_auth() => {
                log::warn!("Stored token was rejected: {}", e);
                if let Err(e) = self.credentials.clear_token() {
                    log::error!("Failed to delete rejected token: {}", e);
                }
                StartupOutcome::AuthRejected(e.to_string())
            }
            Err(e) => {
                log::warn!("Could not verify stored token: {}", e);
                self.unverified_token = Some(token);
                StartupOutcome::VerificationFailed(e.to_string())
            }
        }
    }

    /// Sign in with `token`; the token is stored only once GitHub accepts it
    pub async fn login(&mut self, token: &str) -> Result<LoginSuccess, SessionError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(ClientError::Validation {
                message: "Token cannot be empty".to_string(),
            }
            .into());
        }

        let user = match self.authenticate(token).await {
            Ok(user) => user,
            Err(e) => {
                log::warn!("Login failed: {}", e);
                self.session = Session::default();
                return Err(e.into());
            }
        };

        let token_persisted = match self.credentials.save_token(token) {
            Ok(()) => true,
            Err(e) => {
                log::error!("Signed in but failed to store token: {}", e);
                false
            }
        };

        log::info!("Signed in as {}", user.login);
        self.unverified_token = None;
        self.session = Session {
            token: Some(token.to_string()),
            user: Some(user.clone()),
        };

        Ok(LoginSuccess {
            user,
            token_persisted,
        })
    }

    /// Forget the session and the stored token; the watchlist stays
    pub fn logout(&mut self) -> Result<(), SessionError> {
        self.session = Session::default();
        self.unverified_token = None;
        self.write_clients().reset();
        self.credentials.clear_token()?;
        log::info!("Signed out");
        Ok(())
    }

    /// Append `full_name` after checking that the repository exists
    ///
    /// The entry is stored under the name GitHub reports, which may differ in
    /// case from what was typed. Names compare case-insensitively.
    pub async fn add_to_watchlist(&mut self, full_name: &str) -> Result<AddOutcome, SessionError> {
        if !self.storage_loaded {
            return Err(SessionError::StorageNotLoaded);
        }

        let full_name = full_name.trim();
        if self.contains(full_name) {
            log::debug!("{} is already on the watchlist", full_name);
            return Ok(AddOutcome::AlreadyPresent);
        }

        let name = RepositoryName::parse(full_name)?;
        let client = self.read_clients().client()?;
        let repository = client.fetch_repository(&name.owner, &name.name).await?;

        let canonical = repository.full_name;
        if self.contains(&canonical) {
            log::debug!("{} is already on the watchlist as {}", full_name, canonical);
            return Ok(AddOutcome::AlreadyPresent);
        }

        let mut updated = self.watchlist.clone();
        updated.push(canonical.clone());
        self.commit_watchlist(updated)?;
        log::info!("Added {} to the watchlist", canonical);
        Ok(AddOutcome::Added)
    }

    /// Remove every occurrence of `full_name`
    ///
    /// Returns whether anything was removed; absent entries are a no-op.
    pub fn remove_from_watchlist(&mut self, full_name: &str) -> Result<bool, SessionError> {
        if !self.storage_loaded {
            return Err(SessionError::StorageNotLoaded);
        }

        let updated: Vec<String> = self
            .watchlist
            .iter()
            .filter(|entry| !entry.eq_ignore_ascii_case(full_name))
            .cloned()
            .collect();
        if updated.len() == self.watchlist.len() {
            log::debug!("{} is not on the watchlist", full_name);
            return Ok(false);
        }

        self.commit_watchlist(updated)?;
        log::info!("Removed {} from the watchlist", full_name);
        Ok(true)
    }

    pub fn watchlist(&self) -> &[String] {
        &self.watchlist
    }

    pub fn user(&self) -> Option<&User> {
        self.session.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.token.is_some() && self.session.user.is_some()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            user: self.session.user.clone(),
            watchlist: self.watchlist.clone(),
            storage_loaded: self.storage_loaded,
        }
    }

    /// Build a client for `token` and ask GitHub who it belongs to
    ///
    /// On failure the client is dropped again so later calls see
    /// `Unauthenticated`.
    async fn authenticate(&mut self, token: &str) -> Result<User, ClientError> {
        let client: Arc<dyn GitHubClient> = self.write_clients().initialize(token)?;
        let result = client.fetch_authenticated_user().await;
        if result.is_err() {
            self.write_clients().reset();
        }
        result
    }

    fn contains(&self, full_name: &str) -> bool {
        self.watchlist
            .iter()
            .any(|entry| entry.eq_ignore_ascii_case(full_name))
    }

    /// Persist `updated`, then adopt it; a failed write leaves memory as it was
    fn commit_watchlist(&mut self, updated: Vec<String>) -> Result<(), SessionError> {
        self.watchlist_store.save(&updated)?;
        self.watchlist = updated;
        Ok(())
    }

    fn read_clients(&self) -> std::sync::RwLockReadGuard<'_, ClientManager> {
        self.clients.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write_clients(&self) -> std::sync::RwLockWriteGuard<'_, ClientManager> {
        self.clients.write().unwrap_or_else(|e| e.into_inner())
    }
}

/// Keep the first occurrence of each entry
fn dedup(entries: Vec<String>) -> Vec<String> {
    let mut unique: Vec<String> = Vec::with_capacity(entries.len());
    for entry in entries {
        if !unique.contains(&entry) {
            unique.push(entry);
        }
    }
    unique
}
