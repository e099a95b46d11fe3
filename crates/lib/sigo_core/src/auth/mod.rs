//! Local authentication.
//!
//! Password hashing and JWT management for the occurrence backend's own
//! login, shared by `sigo_api` and the maintenance tooling.

pub mod jwt;
pub mod password;

use thiserror::Error;

/// Authentication errors.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    CredentialError,

    #[error("Token error: {0}")]
    TokenError(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
