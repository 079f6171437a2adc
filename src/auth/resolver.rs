use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use crate::auth::error::AuthError;
use crate::auth::password::{hash_password, verify_password};
use crate::auth::repo::UserStore;
use crate::auth::repo_types::{StoreError, User};
use crate::config::EmailLinking;

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

pub(crate) fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OAuthProvider {
    Google,
}

/// Profile data handed back by an identity provider after a completed
/// authorization flow.
#[derive(Debug, Clone)]
pub struct OAuthProfile {
    pub provider: OAuthProvider,
    pub subject: String,
    pub email: String,
    pub display_name: Option<String>,
}

/// Everything a client can present to prove who they are.
#[derive(Debug, Clone)]
pub enum Credentials {
    Local { email: String, password: String },
    OAuth(OAuthProfile),
}

/// Turn raw credentials into a canonical user record.
pub async fn resolve(
    users: &dyn UserStore,
    linking: EmailLinking,
    credentials: Credentials,
) -> Result<User, AuthError> {
    match credentials {
        Credentials::Local { email, password } => resolve_local(users, &email, &password).await,
        Credentials::OAuth(profile) => resolve_oauth(users, linking, profile).await,
    }
}

async fn resolve_local(
    users: &dyn UserStore,
    email: &str,
    password: &str,
) -> Result<User, AuthError> {
    let email = normalize_email(email);
    let user = users
        .find_by_email(&email)
        .await?
        .ok_or(AuthError::UnknownIdentity)?;

    // Accounts created through Google carry no local credential at all.
    let Some(hash) = user.password_hash.as_deref() else {
        return Err(AuthError::InvalidCredential);
    };
    if !verify_password(password, hash)? {
        return Err(AuthError::InvalidCredential);
    }

    debug!(user_id = %user.id, "local credentials resolved");
    Ok(user)
}

async fn resolve_oauth(
    users: &dyn UserStore,
    linking: EmailLinking,
    profile: OAuthProfile,
) -> Result<User, AuthError> {
    match profile.provider {
        OAuthProvider::Google => resolve_google(users, linking, profile).await,
    }
}

async fn resolve_google(
    users: &dyn UserStore,
    linking: EmailLinking,
    profile: OAuthProfile,
) -> Result<User, AuthError> {
    if let Some(user) = users.find_by_google_id(&profile.subject).await? {
        return Ok(user);
    }

    let email = normalize_email(&profile.email);
    let username = profile.display_name.unwrap_or_else(|| email.clone());

    match users.create_google(&email, &profile.subject, &username).await {
        Ok(user) => {
            debug!(user_id = %user.id, "google identity created");
            Ok(user)
        }
        Err(StoreError::Duplicate) => {
            // Either the same subject raced us, or the email already belongs
            // to an existing account.
            if let Some(user) = users.find_by_google_id(&profile.subject).await? {
                return Ok(user);
            }
            match linking {
                EmailLinking::Reject => Err(AuthError::IdentityAlreadyExists),
                EmailLinking::Link => {
                    let existing = users
                        .find_by_email(&email)
                        .await?
                        .ok_or(AuthError::IdentityAlreadyExists)?;
                    users
                        .link_google_id(existing.id, &profile.subject)
                        .await?
                        .ok_or(AuthError::IdentityAlreadyExists)
                }
            }
        }
        Err(e) => Err(e.into()),
    }
}

/// Create a local account. Uniqueness is the store's constraint, not a
/// pre-check, so concurrent signups cannot slip a duplicate through.
pub async fn signup_local(
    users: &dyn UserStore,
    email: &str,
    password: &str,
    username: &str,
) -> Result<User, AuthError> {
    let email = normalize_email(email);
    let hash = hash_password(password)?;
    let user = users.create_local(&email, &hash, username).await?;
    debug!(user_id = %user.id, "local identity created");
    Ok(user)
}
