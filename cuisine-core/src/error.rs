use thiserror::Error;

use crate::shape::ShapeError;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Transport error: {0}")]
    Transport(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Not logged in: no token stored")]
    MissingToken,

    #[error("Token rejected by server: {0}")]
    Rejected(String),

    #[error("Login failed: {0}")]
    LoginFailed(String),

    #[error("Token store error: {0}")]
    Store(String),
}

/// Everything a call against the recipe API can fail with.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Network(#[from] FetchError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("Malformed response: {0}")]
    Shape(#[from] ShapeError),

    #[error("Invalid JSON in response: {0}")]
    InvalidJson(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },
}

impl ApiError {
    /// Server-side failures (5xx) are treated like transport failures.
    pub fn is_network(&self) -> bool {
        match self {
            ApiError::Network(_) => true,
            ApiError::Status { status, .. } => *status >= 500,
            _ => false,
        }
    }
}
