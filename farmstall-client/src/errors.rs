//! Error types for backend calls and session transitions.
//!
//! Every failure is classified into a [`FailureKind`]; the session controller
//! only ever destroys a session on [`FailureKind::DefiniteAuth`].

use serde_json::Value;
use thiserror::Error;

use crate::error_message::extract_error_message;
use crate::storage::StorageError;

/// How a failure should affect an established session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The server rejected the presented credential (HTTP 401).
    DefiniteAuth,
    /// Network unreachable, timeout or a 5xx response.
    Transient,
    /// The server answered but the payload was unusable (e.g. no token).
    Validation,
    /// Any other rejection, usually a 4xx with an explanatory body.
    Logic,
}

/// Errors returned by [`crate::api_client::ApiClient`].
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Unauthorized - please login again")]
    Unauthorized { body: Option<Value> },

    #[error("Request failed with status {status}")]
    Status { status: u16, body: Option<Value> },

    #[error("Connection timeout")]
    Timeout,

    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Empty response from server")]
    EmptyResponse,
}

impl ApiError {
    pub fn kind(&self) -> FailureKind {
        match self {
            ApiError::Unauthorized { .. } => FailureKind::DefiniteAuth,
            ApiError::Status { status, .. } if *status >= 500 => {
                FailureKind::Transient
            }
            ApiError::Timeout | ApiError::Transport(_) => FailureKind::Transient,
            ApiError::EmptyResponse => FailureKind::Validation,
            ApiError::Status { .. }
            | ApiError::InvalidResponse(_)
            | ApiError::InvalidRequest(_) => FailureKind::Logic,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized { .. } => Some(401),
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Parsed response body, when the server sent one.
    pub fn body(&self) -> Option<&Value> {
        match self {
            ApiError::Unauthorized { body } | ApiError::Status { body, .. } => {
                body.as_ref()
            }
            _ => None,
        }
    }

    /// Most specific human-readable message available for this failure.
    pub fn user_message(&self, fallback: &str) -> String {
        extract_error_message(self.body(), fallback)
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout
        } else if err.is_decode() {
            ApiError::InvalidResponse(err.to_string())
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Errors surfaced by [`crate::session::SessionController`].
#[derive(Debug, Error)]
pub enum SessionError {
    /// Login succeeded at the HTTP level but carried no token.
    #[error("No token received from server")]
    NoTokenReceived,

    /// A backend call failed; `message` is what the UI should show.
    #[error("{message}")]
    Api {
        message: String,
        #[source]
        source: ApiError,
    },

    #[error("Not authenticated")]
    NotAuthenticated,

    /// A logout or newer login happened while this call was in flight.
    #[error("Session changed while the request was in flight")]
    Superseded,

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl SessionError {
    pub(crate) fn from_api(source: ApiError, fallback: &str) -> Self {
        SessionError::Api {
            message: source.user_message(fallback),
            source,
        }
    }

    pub fn kind(&self) -> FailureKind {
        match self {
            SessionError::NoTokenReceived => FailureKind::Validation,
            SessionError::Api { source, .. } => source.kind(),
            SessionError::NotAuthenticated => FailureKind::DefiniteAuth,
            SessionError::Superseded | SessionError::Storage(_) => {
                FailureKind::Logic
            }
        }
    }
}

pub type SessionResult<T> = Result<T, SessionError>;
