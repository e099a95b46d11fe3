//! SSO assertion minting.
//!
//! Produces the short-lived signed assertion that identifies a local user
//! to SISGPO. One assertion per exchange; nothing is cached or persisted.

use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};

use super::{Sisgpo, SisgpoError};
use crate::models::auth::Principal;
use crate::models::sisgpo::SsoAssertionClaims;

/// Fixed `origin` claim identifying this system to SISGPO.
pub const ORIGIN: &str = "sigo";

/// Claim names reserved for the fixed claim set. Caller extras are additive
/// only and never override these.
const RESERVED_CLAIMS: [&str; 6] = ["sub", "name", "email", "origin", "iat", "exp"];

impl Sisgpo {
    /// Mint a signed SSO assertion for `principal`.
    ///
    /// The principal's inline email wins; otherwise the email (and, as a
    /// fallback, the name) is resolved from the user store by id. A
    /// principal with no resolvable email fails closed with
    /// [`SisgpoError::Configuration`] before anything leaves the process.
    pub async fn mint_assertion(
        &self,
        principal: &Principal,
        extra: Option<serde_json::Map<String, serde_json::Value>>,
    ) -> Result<String, SisgpoError> {
        let secret = self
            .config()
            .shared_secret
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| {
                SisgpoError::Configuration("SISGPO_SHARED_SECRET is not set".into())
            })?;

        let (email, name) = self.resolve_identity(principal).await?;

        let mut extra = extra.unwrap_or_default();
        extra.retain(|k, _| !RESERVED_CLAIMS.contains(&k.as_str()));

        let now = Utc::now();
        let claims = SsoAssertionClaims {
            sub: principal.id.to_string(),
            name,
            email,
            origin: ORIGIN.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(self.config().sso_ttl_secs as i64)).timestamp(),
            extra,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .map_err(|e| SisgpoError::Integration(format!("assertion encode: {e}")))
    }

    /// Resolve the principal's email and display name, consulting the user
    /// store when the caller did not supply an email.
    async fn resolve_identity(
        &self,
        principal: &Principal,
    ) -> Result<(String, Option<String>), SisgpoError> {
        if let Some(email) = principal.email.as_deref()
            && !email.is_empty()
        {
            return Ok((email.to_string(), principal.name.clone()));
        }

        match self.users().find_by_id(principal.id).await? {
            Some(user) => Ok((user.email, principal.name.clone().or(user.name))),
            None => Err(SisgpoError::Configuration(format!(
                "no email on record for user {}",
                principal.id
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use jsonwebtoken::{DecodingKey, Validation, decode};

    use super::*;
    use crate::models::auth::User;
    use crate::sisgpo::SisgpoConfig;
    use crate::store::MemoryUserStore;

    const SECRET: &str = "shared-test-secret";

    fn sisgpo_with(store: MemoryUserStore, secret: Option<&str>) -> Sisgpo {
        Sisgpo::new(
            reqwest::Client::new(),
            SisgpoConfig::new("http://sisgpo.local", secret.map(String::from)),
            Arc::new(store),
        )
    }

    fn decode_claims(token: &str) -> SsoAssertionClaims {
        let mut validation = Validation::default();
        validation.validate_exp = true;
        decode::<SsoAssertionClaims>(
            token,
            &DecodingKey::from_secret(SECRET.as_bytes()),
            &validation,
        )
        .unwrap()
        .claims
    }

    fn principal(id: i64, email: Option<&str>) -> Principal {
        Principal {
            id,
            name: Some("Sgt. Lima".into()),
            email: email.map(String::from),
        }
    }

    #[tokio::test]
    async fn mints_expected_claim_set() {
        let sisgpo = sisgpo_with(MemoryUserStore::new(), Some(SECRET));

        let token = sisgpo
            .mint_assertion(&principal(2, Some("a@b.com")), None)
            .await
            .unwrap();

        let claims = decode_claims(&token);
        assert_eq!(claims.sub, "2");
        assert_eq!(claims.email, "a@b.com");
        assert_eq!(claims.name.as_deref(), Some("Sgt. Lima"));
        assert_eq!(claims.origin, ORIGIN);
        assert!(claims.extra.is_empty());
    }

    #[tokio::test]
    async fn expiry_is_ttl_from_now() {
        let sisgpo = sisgpo_with(MemoryUserStore::new(), Some(SECRET));
        let before = Utc::now().timestamp();

        let token = sisgpo
            .mint_assertion(&principal(2, Some("a@b.com")), None)
            .await
            .unwrap();

        let claims = decode_claims(&token);
        let ttl = sisgpo.config().sso_ttl_secs as i64;
        // within clock-skew tolerance of a couple of seconds
        assert!(claims.exp >= before + ttl - 2);
        assert!(claims.exp <= Utc::now().timestamp() + ttl + 2);
        assert_eq!(claims.exp - claims.iat, ttl);
    }

    #[tokio::test]
    async fn email_resolved_from_store_when_not_inline() {
        let store = MemoryUserStore::new();
        store.insert(User {
            id: 7,
            email: "from-store@b.com".into(),
            name: Some("Cb. Rocha".into()),
        });
        let sisgpo = sisgpo_with(store, Some(SECRET));

        let token = sisgpo
            .mint_assertion(
                &Principal {
                    id: 7,
                    name: None,
                    email: None,
                },
                None,
            )
            .await
            .unwrap();

        let claims = decode_claims(&token);
        assert_eq!(claims.email, "from-store@b.com");
        assert_eq!(claims.name.as_deref(), Some("Cb. Rocha"));
    }

    #[tokio::test]
    async fn unresolvable_email_fails_closed() {
        let sisgpo = sisgpo_with(MemoryUserStore::new(), Some(SECRET));

        let err = sisgpo
            .mint_assertion(&principal(99, None), None)
            .await
            .unwrap_err();

        assert!(matches!(err, SisgpoError::Configuration(_)));
        assert!(err.to_string().contains("no email on record"));
    }

    #[tokio::test]
    async fn missing_secret_fails_closed() {
        let sisgpo = sisgpo_with(MemoryUserStore::new(), None);

        let err = sisgpo
            .mint_assertion(&principal(2, Some("a@b.com")), None)
            .await
            .unwrap_err();

        assert!(matches!(err, SisgpoError::Configuration(_)));
    }

    #[tokio::test]
    async fn extras_are_additive_and_cannot_override() {
        let sisgpo = sisgpo_with(MemoryUserStore::new(), Some(SECRET));

        let mut extra = serde_json::Map::new();
        extra.insert("posto".into(), serde_json::json!("1º TEN"));
        extra.insert("origin".into(), serde_json::json!("spoofed"));
        extra.insert("email".into(), serde_json::json!("evil@x.com"));
        extra.insert("sub".into(), serde_json::json!("999"));

        let token = sisgpo
            .mint_assertion(&principal(2, Some("a@b.com")), Some(extra))
            .await
            .unwrap();

        let claims = decode_claims(&token);
        assert_eq!(claims.sub, "2");
        assert_eq!(claims.email, "a@b.com");
        assert_eq!(claims.origin, ORIGIN);
        assert_eq!(claims.extra.get("posto"), Some(&serde_json::json!("1º TEN")));
        assert!(!claims.extra.contains_key("origin"));
        assert!(!claims.extra.contains_key("email"));
    }
}
