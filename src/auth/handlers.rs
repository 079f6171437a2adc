use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Redirect,
    routing::{get, post},
    Json, Router,
};
use tower_sessions::Session;
use tracing::{error, info, instrument, warn};

use crate::{
    auth::{
        dto::{GoogleCallbackParams, LoginRequest, PublicUser, SignupRequest},
        error::AuthError,
        extractors::RequireUser,
        oauth::{GoogleOAuth, PendingOAuth, PENDING_OAUTH_KEY},
        resolver::{self, Credentials, OAuthProfile, OAuthProvider},
        session,
    },
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/signup", post(signup))
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
        .route("/auth/google", get(google_start))
        .route("/auth/google/callback", get(google_callback))
        .route("/me", get(me))
}

#[instrument(skip(state, session, payload))]
pub async fn signup(
    State(state): State<AppState>,
    session: Session,
    Json(mut payload): Json<SignupRequest>,
) -> Result<(StatusCode, Json<PublicUser>), AuthError> {
    payload.email = payload.email.trim().to_lowercase();

    if !resolver::is_valid_email(&payload.email) {
        warn!(email = %payload.email, "invalid email");
        return Err(AuthError::InvalidRequest("Invalid email"));
    }
    if payload.password.len() < 8 {
        warn!("password too short");
        return Err(AuthError::InvalidRequest("Password too short"));
    }
    let username = payload.username.trim();
    if username.is_empty() {
        warn!("username missing");
        return Err(AuthError::InvalidRequest("Username required"));
    }

    let user = match resolver::signup_local(
        state.users.as_ref(),
        &payload.email,
        &payload.password,
        username,
    )
    .await
    {
        Ok(u) => u,
        Err(e) => {
            warn!(email = %payload.email, error = %e, "signup rejected");
            return Err(e);
        }
    };

    // New accounts are logged in right away.
    session::establish(&session, &user).await?;

    info!(user_id = %user.id, email = %user.email, "user registered");
    Ok((StatusCode::CREATED, Json(PublicUser::from(&user))))
}

#[instrument(skip(state, session, payload))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(mut payload): Json<LoginRequest>,
) -> Result<Json<PublicUser>, AuthError> {
    payload.email = payload.email.trim().to_lowercase();

    if !resolver::is_valid_email(&payload.email) {
        warn!(email = %payload.email, "invalid email");
        return Err(AuthError::InvalidRequest("Invalid email"));
    }

    let user = match resolver::resolve(
        state.users.as_ref(),
        state.config.email_linking,
        Credentials::Local {
            email: payload.email.clone(),
            password: payload.password,
        },
    )
    .await
    {
        Ok(u) => u,
        Err(e) => {
            warn!(email = %payload.email, error = %e, "login rejected");
            return Err(e);
        }
    };

    session::establish(&session, &user).await?;

    info!(user_id = %user.id, "user logged in");
    Ok(Json(PublicUser::from(&user)))
}

#[instrument(skip(session))]
pub async fn logout(session: Session) -> StatusCode {
    // The user-visible logout never blocks on the store; a failed delete is
    // telemetry only.
    if let Err(e) = session::destroy(&session).await {
        error!(error = %e, "session destruction failed");
    }
    StatusCode::NO_CONTENT
}

#[instrument(skip(state, session))]
pub async fn google_start(
    State(state): State<AppState>,
    session: Session,
) -> Result<Redirect, AuthError> {
    let Some(google) = state.config.google.clone() else {
        warn!("google sign-in requested but not configured");
        return Err(AuthError::Provider("google sign-in not configured".into()));
    };

    let (url, pending) = GoogleOAuth::new(google).authorize_url().map_err(|e| {
        error!(error = %e, "building google authorization url failed");
        AuthError::Provider(e.to_string())
    })?;

    session.insert(PENDING_OAUTH_KEY, &pending).await?;
    Ok(Redirect::to(url.as_str()))
}

#[instrument(skip(state, session, params))]
pub async fn google_callback(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<GoogleCallbackParams>,
) -> Redirect {
    let Some(google) = state.config.google.clone() else {
        return Redirect::to("/login?error=config");
    };
    let (Some(code), Some(returned_state)) = (params.code, params.state) else {
        warn!("google callback missing code or state");
        return Redirect::to("/login?error=missing_code");
    };

    let pending = match session.remove::<PendingOAuth>(PENDING_OAUTH_KEY).await {
        Ok(Some(p)) => p,
        Ok(None) => {
            warn!("google callback without a pending flow");
            return Redirect::to("/login?error=state_mismatch");
        }
        Err(e) => {
            error!(error = %e, "reading pending oauth state failed");
            return Redirect::to("/login?error=session");
        }
    };
    if pending.state != returned_state {
        warn!("google callback state mismatch");
        return Redirect::to("/login?error=state_mismatch");
    }

    let profile = match GoogleOAuth::new(google).exchange(code, pending.verifier).await {
        Ok(p) => p,
        Err(e) => {
            error!(error = %e, "google code exchange failed");
            return Redirect::to("/login?error=oauth");
        }
    };

    let credentials = Credentials::OAuth(OAuthProfile {
        provider: OAuthProvider::Google,
        subject: profile.id,
        email: profile.email,
        display_name: profile.name,
    });
    let user = match resolver::resolve(
        state.users.as_ref(),
        state.config.email_linking,
        credentials,
    )
    .await
    {
        Ok(u) => u,
        Err(AuthError::IdentityAlreadyExists) => {
            warn!("google account collides with an existing email");
            return Redirect::to("/login?error=account_exists");
        }
        Err(e) => {
            error!(error = %e, "google identity resolution failed");
            return Redirect::to("/login?error=internal");
        }
    };

    if let Err(e) = session::establish(&session, &user).await {
        error!(error = %e, "establishing session failed");
        return Redirect::to("/login?error=session");
    }

    info!(user_id = %user.id, "user logged in via google");
    Redirect::to("/")
}

#[instrument(skip_all)]
pub async fn me(RequireUser(user): RequireUser) -> Json<PublicUser> {
    Json(PublicUser::from(&user))
}
