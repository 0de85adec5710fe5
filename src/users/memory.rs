use std::collections::HashMap;

use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::repo::{StoreError, UserStore};
use super::repo_types::{NewUser, User};

/// Process-local store keyed by email. Uniqueness is checked and the record
/// inserted under one write lock.
#[derive(Default)]
pub struct InMemoryUserStore {
    users: RwLock<HashMap<String, User>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(self.users.read().await.get(email).cloned())
    }

    async fn insert_user(&self, user: NewUser) -> Result<User, StoreError> {
        let mut users = self.users.write().await;
        if users.contains_key(&user.email) {
            return Err(StoreError::DuplicateEmail);
        }
        let record = User {
            id: Uuid::new_v4(),
            email: user.email,
            name: user.name,
            password_hash: user.password_hash,
            created_at: OffsetDateTime::now_utc(),
        };
        users.insert(record.email.clone(), record.clone());
        Ok(record)
    }
}
