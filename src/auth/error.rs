use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::auth::repo_types::StoreError;

#[derive(Debug, Error)]
pub enum AuthError {
    /// No account matches the presented email.
    #[error("unknown identity")]
    UnknownIdentity,

    /// The account exists but the presented credential does not match.
    #[error("invalid credential")]
    InvalidCredential,

    #[error("identity already exists")]
    IdentityAlreadyExists,

    /// Request payload failed boundary validation.
    #[error("{0}")]
    InvalidRequest(&'static str),

    #[error("password hashing failed: {0}")]
    Hashing(String),

    /// The upstream identity provider failed or is misconfigured.
    #[error("identity provider error: {0}")]
    Provider(String),

    #[error("user store unavailable")]
    StoreUnavailable(#[source] sqlx::Error),

    #[error("session store unavailable")]
    Session(#[from] tower_sessions::session::Error),
}

impl From<StoreError> for AuthError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Duplicate => AuthError::IdentityAlreadyExists,
            StoreError::Backend(e) => AuthError::StoreUnavailable(e),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        // UnknownIdentity and InvalidCredential must render identically so
        // the login form cannot be used to enumerate accounts.
        let (status, message) = match self {
            AuthError::UnknownIdentity | AuthError::InvalidCredential => {
                (StatusCode::UNAUTHORIZED, "Invalid email or password")
            }
            AuthError::IdentityAlreadyExists => (
                StatusCode::CONFLICT,
                "An account with this email already exists",
            ),
            AuthError::InvalidRequest(message) => (StatusCode::BAD_REQUEST, message),
            AuthError::Provider(_) => (StatusCode::BAD_GATEWAY, "Sign-in is unavailable"),
            AuthError::Hashing(_) | AuthError::StoreUnavailable(_) | AuthError::Session(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Something went wrong")
            }
        };

        (status, message).into_response()
    }
}
