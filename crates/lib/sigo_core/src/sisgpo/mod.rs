//! SISGPO integration.
//!
//! SIGO delegates personnel/vehicle management to SISGPO, an external
//! system. This module owns the whole outbound surface: minting short-lived
//! SSO assertions, exchanging them for SISGPO session tokens, and pushing
//! vehicle status transitions.
//!
//! The client takes its HTTP client and user-store capability at
//! construction; nothing here reaches into process-wide state, and no token
//! or assertion is cached across calls.

pub mod assertion;
pub mod session;
pub mod status;

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use url::Url;

use crate::store::{StoreError, UserStore};

/// Default SSO assertion lifetime in seconds.
const DEFAULT_SSO_TTL_SECS: u64 = 90;

/// Default bound on a single status-sync request.
const DEFAULT_SYNC_TIMEOUT: Duration = Duration::from_secs(5);

/// SISGPO integration errors.
#[derive(Debug, Error)]
pub enum SisgpoError {
    /// Missing signing secret or unresolvable principal email. Fails closed.
    #[error("SISGPO configuration error: {0}")]
    Configuration(String),

    /// Malformed or incomplete response from SISGPO.
    #[error("SISGPO integration error: {0}")]
    Integration(String),

    /// Network-level failure reaching SISGPO (refused / DNS / timeout).
    #[error("SISGPO unreachable: {0}")]
    Connectivity(String),

    /// Local user store failure while resolving the principal.
    #[error("User store error: {0}")]
    Store(#[from] StoreError),
}

/// SISGPO connection settings.
#[derive(Clone, Debug)]
pub struct SisgpoConfig {
    /// Base URL of the SISGPO API, no trailing slash (e.g. `https://sisgpo.cbm.gov.br`).
    pub base_url: String,
    /// Pre-shared assertion signing secret. Absence is only an error at
    /// mint time, so a deployment without SSO still serves everything else.
    pub shared_secret: Option<String>,
    /// SSO assertion TTL in seconds.
    pub sso_ttl_secs: u64,
    /// Bound on a single status-sync request.
    pub sync_timeout: Duration,
}

impl SisgpoConfig {
    /// Build a config for the given base URL with default TTL and timeout.
    pub fn new(base_url: impl Into<String>, shared_secret: Option<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            shared_secret,
            sso_ttl_secs: DEFAULT_SSO_TTL_SECS,
            sync_timeout: DEFAULT_SYNC_TIMEOUT,
        }
    }

    /// Reads configuration from environment variables.
    ///
    /// | Variable               | Default        |
    /// |------------------------|----------------|
    /// | `SISGPO_BASE_URL`      | required       |
    /// | `SISGPO_SHARED_SECRET` | unset          |
    /// | `SISGPO_SSO_TTL_SECS`  | `90`           |
    pub fn from_env() -> Result<Self, SisgpoError> {
        let base_url = std::env::var("SISGPO_BASE_URL")
            .map_err(|_| SisgpoError::Configuration("SISGPO_BASE_URL is not set".into()))?;
        Url::parse(&base_url).map_err(|e| {
            SisgpoError::Configuration(format!("SISGPO_BASE_URL is not a valid URL: {e}"))
        })?;

        let shared_secret = std::env::var("SISGPO_SHARED_SECRET")
            .ok()
            .filter(|s| !s.is_empty());

        let sso_ttl_secs = std::env::var("SISGPO_SSO_TTL_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_SSO_TTL_SECS);

        Ok(Self {
            sso_ttl_secs,
            ..Self::new(base_url, shared_secret)
        })
    }
}

/// Client for the SISGPO API.
///
/// Cheap to clone via `Arc`; holds no per-request state.
pub struct Sisgpo {
    http: reqwest::Client,
    config: SisgpoConfig,
    users: Arc<dyn UserStore>,
}

impl Sisgpo {
    pub fn new(http: reqwest::Client, config: SisgpoConfig, users: Arc<dyn UserStore>) -> Self {
        Self {
            http,
            config,
            users,
        }
    }

    pub fn config(&self) -> &SisgpoConfig {
        &self.config
    }

    /// Absolute URL for a SISGPO API path (`path` must start with `/`).
    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    pub(crate) fn users(&self) -> &Arc<dyn UserStore> {
        &self.users
    }
}
