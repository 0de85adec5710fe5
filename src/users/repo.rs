use async_trait::async_trait;
use sqlx::PgPool;
use thiserror::Error;
use tracing::{debug, error};
use uuid::Uuid;

use super::repo_types::{NewUser, User};

#[derive(Error, Debug)]
pub enum StoreError {
    /// Insert hit the email uniqueness constraint.
    #[error("email already exists")]
    DuplicateEmail,

    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

/// Persistence for user records, keyed by email.
///
/// Implementations must reject a second insert for an email that is already
/// stored, including when two inserts race.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;
    async fn insert_user(&self, user: NewUser) -> Result<User, StoreError>;
}

#[derive(Clone)]
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
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        debug!(%email, "searching for user");
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, name, password_hash, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.db)
        .await
        .map_err(|e| {
            error!(error = %e, "find_by_email failed");
            anyhow::Error::new(e).context("find user by email")
        })?;
        Ok(user)
    }

    async fn insert_user(&self, user: NewUser) -> Result<User, StoreError> {
        let result = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, email, name, password_hash)
            VALUES ($1, $2, $3, $4)
            RETURNING id, email, name, password_hash, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&user.email)
        .bind(&user.name)
        .bind(&user.password_hash)
        .fetch_one(&self.db)
        .await;

        match result {
            Ok(created) => Ok(created),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(StoreError::DuplicateEmail)
            }
            Err(e) => {
                error!(error = %e, "insert_user failed");
                Err(anyhow::Error::new(e).context("insert user").into())
            }
        }
    }
}
