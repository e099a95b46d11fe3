//! API server configuration.

use sigo_core::auth::jwt::resolve_jwt_secret;

/// Configuration for the API server.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Address to bind the HTTP listener (e.g. "127.0.0.1:3333").
    pub bind_addr: String,
    /// JWT signing secret for local access tokens.
    pub jwt_secret: String,
}

impl ApiConfig {
    /// Reads configuration from environment variables with sensible defaults.
    ///
    /// | Variable                     | Default                       |
    /// |------------------------------|-------------------------------|
    /// | `BIND_ADDR`                  | `127.0.0.1:3333`              |
    /// | `JWT_SECRET` / `AUTH_SECRET` | generated & persisted to file |
    pub fn from_env() -> Self {
        Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:3333".into()),
            jwt_secret: resolve_jwt_secret(),
        }
    }
}
