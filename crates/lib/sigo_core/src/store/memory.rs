//! In-memory user store.
//!
//! Backs tests and local tooling; no persistence. Seed it up front, then
//! hand it out as `Arc<dyn UserStore>`.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use super::{StoreError, UserStore};
use crate::models::auth::{User, UserWithPassword};

#[derive(Default)]
pub struct MemoryUserStore {
    users: RwLock<HashMap<i64, UserWithPassword>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a user without credentials (cannot log in, can be resolved).
    pub fn insert(&self, user: User) {
        self.users.write().unwrap().insert(
            user.id,
            UserWithPassword {
                user,
                password_hash: None,
            },
        );
    }

    /// Insert a user with a bcrypt password hash.
    pub fn insert_with_password(&self, user: User, password_hash: &str) {
        self.users.write().unwrap().insert(
            user.id,
            UserWithPassword {
                user,
                password_hash: Some(password_hash.to_string()),
            },
        );
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, StoreError> {
        Ok(self
            .users
            .read()
            .unwrap()
            .get(&id)
            .map(|u| u.user.clone()))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserWithPassword>, StoreError> {
        Ok(self
            .users
            .read()
            .unwrap()
            .values()
            .find(|u| u.user.email == email)
            .cloned())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: i64, email: &str) -> User {
        User {
            id,
            email: email.to_string(),
            name: None,
        }
    }

    #[tokio::test]
    async fn find_by_id_returns_seeded_user() {
        let store = MemoryUserStore::new();
        store.insert(user(1, "a@b.com"));

        let found = store.find_by_id(1).await.unwrap();
        assert_eq!(found.unwrap().email, "a@b.com");
        assert!(store.find_by_id(2).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn find_by_email_returns_credentials() {
        let store = MemoryUserStore::new();
        store.insert_with_password(user(1, "a@b.com"), "$2b$10$hash");

        let found = store.find_by_email("a@b.com").await.unwrap().unwrap();
        assert_eq!(found.user.id, 1);
        assert_eq!(found.password_hash.as_deref(), Some("$2b$10$hash"));
        assert!(store.find_by_email("x@y.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn ping_always_succeeds() {
        assert!(MemoryUserStore::new().ping().await.is_ok());
    }
}
