//! SISGPO session exchange.
//!
//! Trades a freshly minted SSO assertion for a SISGPO session token. One
//! exchange per inbound request; the token is handed back to the caller and
//! forgotten.

use serde::Deserialize;
use tracing::error;

use super::{Sisgpo, SisgpoError};
use crate::models::auth::Principal;

/// Shape of a successful `sso-login` response.
#[derive(Debug, Deserialize)]
struct SsoLoginResponse {
    token: Option<String>,
}

impl Sisgpo {
    /// Exchange an SSO assertion for a SISGPO session token.
    ///
    /// Errors propagate: the caller's request cannot proceed without a
    /// session. Connection-level failures are logged with a distinct
    /// marker so operators can tell "SISGPO is down" from "SISGPO rejected
    /// us".
    pub async fn exchange_session(&self, principal: &Principal) -> Result<String, SisgpoError> {
        let assertion = self.mint_assertion(principal, None).await?;
        let url = self.endpoint("/api/auth/sso-login");

        let resp = self
            .http()
            .post(&url)
            .bearer_auth(assertion)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() || e.is_timeout() {
                    error!(error = %e, url = %url, "SISGPO unreachable during session exchange");
                    SisgpoError::Connectivity(e.to_string())
                } else {
                    error!(error = %e, url = %url, "SISGPO session exchange failed");
                    SisgpoError::Integration(format!("sso-login request: {e}"))
                }
            })?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_else(|_| "<no body>".to_string());
            error!(%status, body = %body, "SISGPO rejected the SSO assertion");
            return Err(SisgpoError::Integration(format!(
                "sso-login HTTP {status}: {body}"
            )));
        }

        let data: SsoLoginResponse = resp.json().await.map_err(|e| {
            SisgpoError::Integration(format!("sso-login response parse error: {e}"))
        })?;

        match data.token {
            Some(token) if !token.is_empty() => Ok(token),
            _ => Err(SisgpoError::Integration("response missing token".into())),
        }
    }
}
