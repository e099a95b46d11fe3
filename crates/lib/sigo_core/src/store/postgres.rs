//! PostgreSQL-backed user store.

use async_trait::async_trait;
use sqlx::PgPool;

use super::{StoreError, UserStore};
use crate::models::auth::{User, UserWithPassword};

/// User store backed by the `users` table.
#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The underlying pool (for callers that also run migrations).
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, StoreError> {
        let row = sqlx::query_as::<_, (i64, String, Option<String>)>(
            "SELECT id, email, name FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(|(id, email, name)| User { id, email, name }))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserWithPassword>, StoreError> {
        let row = sqlx::query_as::<_, (i64, String, Option<String>, Option<String>)>(
            "SELECT id, email, name, password_hash FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(|(id, email, name, password_hash)| UserWithPassword {
            user: User { id, email, name },
            password_hash,
        }))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
