//! Token-scoped client holder
//!
//! The dashboard talks to GitHub with a single personal access token. The
//! manager turns that token into a client once, hands out shared handles to
//! it, and refuses with [`ClientError::Unauthenticated`] until a token has
//! been supplied.

use crate::error::{ClientError, ClientResult};
use crate::{GitHubClient, OctocrabClient};
use log::{debug, info};
use std::sync::Arc;

/// Builds a client for a token
pub type ClientFactory =
    Arc<dyn Fn(&str) -> ClientResult<Arc<dyn GitHubClient>> + Send + Sync + 'static>;

/// Holds the client for the current token
pub struct ClientManager {
    factory: ClientFactory,
    client: Option<Arc<dyn GitHubClient>>,
}

impl ClientManager {
    /// Create a manager that builds octocrab clients against `base_url`
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self::with_factory(Arc::new(move |token: &str| {
            let client = OctocrabClient::from_token(token, &base_url)?;
            Ok(Arc::new(client) as Arc<dyn GitHubClient>)
        }))
    }

    /// Create a manager with a custom client factory
    pub fn with_factory(factory: ClientFactory) -> Self {
        Self {
            factory,
            client: None,
        }
    }

    /// Build a client for `token`, replacing any previous one
    ///
    /// Must be called from within a tokio runtime when using the octocrab factory.
    pub fn initialize(&mut self, token: &str) -> ClientResult<Arc<dyn GitHubClient>> {
        info!("Initializing GitHub client");
        let client = (self.factory)(token)?;
        self.client = Some(Arc::clone(&client));
        Ok(client)
    }

    /// The current client, or `Unauthenticated` before `initialize`
    pub fn client(&self) -> ClientResult<Arc<dyn GitHubClient>> {
        self.client.clone().ok_or(ClientError::Unauthenticated)
    }

    pub fn is_initialized(&self) -> bool {
        self.client.is_some()
    }

    /// Drop the current client (logout)
    pub fn reset(&mut self) {
        if self.client.take().is_some() {
            debug!("GitHub client dropped");
        }
    }
}

impl std::fmt::Debug for ClientManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientManager")
            .field("initialized", &self.is_initialized())
            .finish()
    }
}
