//! Client library for the Farmstall shop backend.
//!
//! The pieces fit together like this: a [`TokenCell`] holds the bearer token
//! and persists it through a [`KeyValueStorage`]; the [`ApiClient`] reads that
//! cell on every request and clears it when a protected endpoint answers 401;
//! the [`SessionController`] owns the session built on top of both. Resource
//! services and listing helpers serve the dashboard screens.
#![allow(missing_docs)]

pub mod api_client;
pub mod backend;
pub mod error_message;
pub mod errors;
pub mod listing;
pub mod routes;
pub mod services;
pub mod session;
pub mod storage;
pub mod token;

pub use api_client::ApiClient;
pub use backend::SessionBackend;
pub use error_message::extract_error_message;
pub use errors::{ApiError, ApiResult, FailureKind, SessionError, SessionResult};
pub use session::{Session, SessionController, SessionPhase};
pub use storage::{
    FileStorage, KeyValueStorage, MemoryStorage, SHOP_TOKEN_KEY, StorageError,
};
pub use token::TokenCell;
