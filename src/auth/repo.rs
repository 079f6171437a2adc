use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::repo_types::{StoreError, User};

/// Parameterized access to the `users` table. Nothing else in the crate
/// writes to it.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    async fn find_by_google_id(&self, google_id: &str) -> Result<Option<User>, StoreError>;

    async fn create_local(
        &self,
        email: &str,
        password_hash: &str,
        username: &str,
    ) -> Result<User, StoreError>;

    async fn create_google(
        &self,
        email: &str,
        google_id: &str,
        username: &str,
    ) -> Result<User, StoreError>;

    /// Attach a Google subject to an existing row. Returns `None` when the
    /// row is missing or already linked.
    async fn link_google_id(
        &self,
        user_id: Uuid,
        google_id: &str,
    ) -> Result<Option<User>, StoreError>;
}

pub struct PgUserStore {
    db: PgPool,
}

impl PgUserStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, google_id, username, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, google_id, username, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.db)
        .await?;
        Ok(user)
    }

    async fn find_by_google_id(&self, google_id: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, google_id, username, created_at
            FROM users
            WHERE google_id = $1
            "#,
        )
        .bind(google_id)
        .fetch_optional(&self.db)
        .await?;
        Ok(user)
    }

    async fn create_local(
        &self,
        email: &str,
        password_hash: &str,
        username: &str,
    ) -> Result<User, StoreError> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, password_hash, username)
            VALUES ($1, $2, $3)
            RETURNING id, email, password_hash, google_id, username, created_at
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .bind(username)
        .fetch_one(&self.db)
        .await
        .map_err(into_store_error)
    }

    async fn create_google(
        &self,
        email: &str,
        google_id: &str,
        username: &str,
    ) -> Result<User, StoreError> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, google_id, username)
            VALUES ($1, $2, $3)
            RETURNING id, email, password_hash, google_id, username, created_at
            "#,
        )
        .bind(email)
        .bind(google_id)
        .bind(username)
        .fetch_one(&self.db)
        .await
        .map_err(into_store_error)
    }

    async fn link_google_id(
        &self,
        user_id: Uuid,
        google_id: &str,
    ) -> Result<Option<User>, StoreError> {
        // The guard keeps a row already bound to another subject untouched.
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET google_id = $2
            WHERE id = $1 AND google_id IS NULL
            RETURNING id, email, password_hash, google_id, username, created_at
            "#,
        )
        .bind(user_id)
        .bind(google_id)
        .fetch_optional(&self.db)
        .await
        .map_err(into_store_error)
    }
}

fn into_store_error(e: sqlx::Error) -> StoreError {
    if e.as_database_error()
        .is_some_and(|db| db.is_unique_violation())
    {
        StoreError::Duplicate
    } else {
        StoreError::Backend(e)
    }
}
