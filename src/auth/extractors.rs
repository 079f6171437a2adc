use axum::{
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
};
use tower_sessions::Session;
use tracing::error;

use crate::auth::repo_types::User;
use crate::auth::session;
use crate::state::AppState;

/// Identity attached to the request's session, if any.
pub struct CurrentUser(pub Option<User>);

impl CurrentUser {
    pub fn is_authenticated(&self) -> bool {
        self.0.is_some()
    }
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = (StatusCode, String);

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(|(status, message)| (status, message.to_string()))?;

        let user = session::current_identity(&session, state.users.as_ref())
            .await
            .map_err(|e| {
                error!(error = %e, "resolving session identity failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Something went wrong".to_string(),
                )
            })?;

        Ok(CurrentUser(user))
    }
}

/// Gate for protected routes; the handler body never runs without a
/// resolved identity.
pub struct RequireUser(pub User);

impl FromRequestParts<AppState> for RequireUser {
    type Rejection = (StatusCode, String);

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let CurrentUser(user) = CurrentUser::from_request_parts(parts, state).await?;
        user.map(RequireUser).ok_or((
            StatusCode::UNAUTHORIZED,
            "Authentication required".to_string(),
        ))
    }
}
