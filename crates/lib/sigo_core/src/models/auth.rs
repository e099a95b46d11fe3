//! Authentication domain models.
//!
//! These are internal domain models, distinct from the API request/response
//! DTOs in `sigo_api` (which carry `#[serde(rename)]` for camelCase etc.).

use serde::{Deserialize, Serialize};

/// Domain user as stored in the local user store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub name: Option<String>,
}

/// User with password hash (for internal auth flows).
#[derive(Debug, Clone)]
pub struct UserWithPassword {
    pub user: User,
    pub password_hash: Option<String>,
}

/// The authenticated local principal as seen by the SISGPO integration.
///
/// Only `id` is mandatory; `email` (and `name`) may be filled in from the
/// user store when the caller does not carry them.
#[derive(Debug, Clone)]
pub struct Principal {
    pub id: i64,
    pub name: Option<String>,
    pub email: Option<String>,
}

impl From<User> for Principal {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: Some(user.email),
        }
    }
}

/// JWT claims embedded in local access tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject — user ID (standard JWT `sub` claim, stringified).
    pub sub: String,
    /// User email.
    pub email: String,
    /// User display name.
    pub name: Option<String>,
    /// Expiry (unix timestamp).
    pub exp: i64,
    /// Issued at (unix timestamp).
    pub iat: i64,
}

impl TokenClaims {
    /// Rebuild the principal carried by a verified token.
    ///
    /// Returns `None` when `sub` is not a numeric user id.
    pub fn principal(&self) -> Option<Principal> {
        let id = self.sub.parse::<i64>().ok()?;
        Some(Principal {
            id,
            name: self.name.clone(),
            email: Some(self.email.clone()),
        })
    }
}
