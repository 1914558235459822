//! Client error taxonomy and octocrab error mapping

use http::StatusCode;
use thiserror::Error;

/// Errors surfaced by [`crate::GitHubClient`] implementations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// No token has been supplied yet
    #[error("Not signed in")]
    Unauthenticated,

    /// The token was rejected by GitHub
    #[error("{message}")]
    Auth { message: String },

    /// Repository or pull request does not exist, or the token lacks scope
    #[error("{message}")]
    NotFound { message: String },

    /// Local input was malformed; no request was sent
    #[error("{message}")]
    Validation { message: String },

    /// Transport failure before GitHub answered
    #[error("Network error: {message}")]
    Network { message: String },

    /// GitHub refused a merge, close or ref deletion
    #[error("{message}")]
    RemoteAction { message: String },

    #[error("{message}")]
    RateLimited { message: String },

    /// Any other failure
    #[error("{message}")]
    Api {
        status: Option<u16>,
        message: String,
    },
}

impl ClientError {
    /// Whether the token itself was rejected
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Auth { .. } | Self::Unauthenticated)
    }
}

pub type ClientResult<T> = Result<T, ClientError>;

/// What kind of call failed; decides how ambiguous statuses are classified
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Operation {
    /// `GET /user`
    Identity,
    /// Any other GET
    Read,
    /// Merge, close or ref deletion
    Mutation,
}

fn is_rate_limit_error(source: &octocrab::GitHubError) -> bool {
    let is_rate_limit_status = matches!(
        source.status_code,
        StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS
    );

    let message_indicates_rate_limit = source.message.to_lowercase().contains("rate limit")
        || source
            .documentation_url
            .as_deref()
            .is_some_and(|url| url.contains("rate-limit"));

    is_rate_limit_status && message_indicates_rate_limit
}

const fn is_network_error(error: &octocrab::Error) -> bool {
    matches!(
        error,
        octocrab::Error::Http { .. } | octocrab::Error::Hyper { .. } | octocrab::Error::Service { .. }
    )
}

pub(crate) fn map_octocrab_error(operation: Operation, error: octocrab::Error) -> ClientError {
    if let octocrab::Error::GitHub { source, .. } = &error {
        return map_status(operation, source.status_code, &source.message, is_rate_limit_error(source));
    }

    if is_network_error(&error) {
        return ClientError::Network {
            message: error.to_string(),
        };
    }

    ClientError::Api {
        status: None,
        message: error.to_string(),
    }
}

fn map_status(
    operation: Operation,
    status: StatusCode,
    remote_message: &str,
    rate_limited: bool,
) -> ClientError {
    let message = if remote_message.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("Request failed")
            .to_string()
    } else {
        remote_message.to_string()
    };

    if rate_limited {
        return ClientError::RateLimited { message };
    }

    match (status, operation) {
        (StatusCode::UNAUTHORIZED, _) => ClientError::Auth { message },
        (StatusCode::FORBIDDEN, Operation::Identity) => ClientError::Auth { message },
        (StatusCode::FORBIDDEN, Operation::Read) | (StatusCode::NOT_FOUND, _) => {
            ClientError::NotFound { message }
        }
        (
            StatusCode::FORBIDDEN
            | StatusCode::METHOD_NOT_ALLOWED
            | StatusCode::CONFLICT
            | StatusCode::UNPROCESSABLE_ENTITY,
            Operation::Mutation,
        ) => ClientError::RemoteAction { message },
        _ => ClientError::Api {
            status: Some(status.as_u16()),
            message,
        },
    }
}
