//! Local user store.
//!
//! The SISGPO integration and the auth flows only need to resolve users;
//! they take the store as an injected capability rather than reaching into a
//! process-wide pool. `PgUserStore` is the production backend;
//! `MemoryUserStore` backs tests and local tooling.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::auth::{User, UserWithPassword};

pub use memory::MemoryUserStore;
pub use postgres::PgUserStore;

/// User store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Db(#[from] sqlx::Error),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Read access to the local user store.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Fetch a user by numeric id.
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, StoreError>;

    /// Fetch a user plus credentials by email (for login).
    async fn find_by_email(&self, email: &str) -> Result<Option<UserWithPassword>, StoreError>;

    /// Cheap reachability probe (health endpoint).
    async fn ping(&self) -> Result<(), StoreError>;
}
