use tower_sessions::Session;
use tracing::debug;
use uuid::Uuid;

use crate::auth::error::AuthError;
use crate::auth::repo::UserStore;
use crate::auth::repo_types::User;

const USER_ID_KEY: &str = "auth.user_id";

/// Bind a resolved identity to the session. Only the user id is stored;
/// everything else is re-read from the store on each request.
pub async fn establish(session: &Session, user: &User) -> Result<(), AuthError> {
    // Fresh id on every privilege change, so a pre-login cookie can't be
    // replayed as an authenticated one.
    session.cycle_id().await?;
    session.insert(USER_ID_KEY, user.id).await?;
    debug!(user_id = %user.id, "session established");
    Ok(())
}

/// Deserialize the session binding back into a full user record. A binding
/// whose row no longer exists is dropped and the request stays anonymous.
pub async fn current_identity(
    session: &Session,
    users: &dyn UserStore,
) -> Result<Option<User>, AuthError> {
    let Some(user_id) = session.get::<Uuid>(USER_ID_KEY).await? else {
        return Ok(None);
    };
    match users.find_by_id(user_id).await? {
        Some(user) => Ok(Some(user)),
        None => {
            session.remove::<Uuid>(USER_ID_KEY).await?;
            Ok(None)
        }
    }
}

/// Destroy the session binding. Request-local state is cleared even when
/// the store-side delete fails; the error is returned for telemetry.
pub async fn destroy(session: &Session) -> Result<(), AuthError> {
    session.flush().await?;
    Ok(())
}
