use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thiserror::Error;
use time::OffsetDateTime;
use uuid::Uuid;

/// User record in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,                      // unique user ID, session reference
    pub email: String,                 // normalized (trimmed, lowercased)
    #[serde(skip_serializing)]
    pub password_hash: Option<String>, // Argon2 hash; NULL for Google-created accounts
    pub google_id: Option<String>,     // Google subject, unique when present
    pub username: String,              // display name
    pub created_at: OffsetDateTime,
}

impl User {
    /// Whether this account can be resolved through the local protocol.
    pub fn has_local_credential(&self) -> bool {
        self.password_hash.is_some()
    }
}

/// Failures surfaced by the credential store adapter.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A uniqueness constraint (email or google_id) rejected the write.
    #[error("duplicate row")]
    Duplicate,

    #[error(transparent)]
    Backend(#[from] sqlx::Error),
}
