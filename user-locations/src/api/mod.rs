//! User location API client
//!
//! The state slice only depends on [`UserLocationApi`]. [`HttpApi`] talks to
//! the REST backend, [`InMemoryApi`] serves the offline mode and tests.

mod http;
mod memory;

use std::future::Future;

use thiserror::Error;

use crate::model::{CreateUserLocationPayload, UserLocation};

pub use http::HttpApi;
pub use memory::InMemoryApi;

/// Failure of an API call
///
/// Cloneable so it can travel inside failure actions. `Display` is the
/// message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request never got a response
    #[error("request failed: {0}")]
    Transport(String),

    /// Non-success status without a readable error message
    #[error("server returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The server refused the request and said why
    #[error("{0}")]
    Rejected(String),

    /// Response body did not have the expected shape
    #[error("invalid response: {0}")]
    Decode(String),

    #[error("invalid API url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The client panicked before answering
    #[error("API client failed unexpectedly")]
    Panicked,
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else {
            ApiError::Transport(e.to_string())
        }
    }
}

/// Boundary to the user location backend
pub trait UserLocationApi: Send + Sync + 'static {
    /// List all user locations in server order
    fn fetch_user_locations(
        &self,
    ) -> impl Future<Output = Result<Vec<UserLocation>, ApiError>> + Send;

    /// Register a new location and return it as stored by the server
    fn create_user_location(
        &self,
        payload: CreateUserLocationPayload,
    ) -> impl Future<Output = Result<UserLocation, ApiError>> + Send;
}
