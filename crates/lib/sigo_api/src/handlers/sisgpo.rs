//! SISGPO proxy handler — forwards authenticated requests to SISGPO.
//!
//! Wildcard route `/api/sisgpo/{*path}` that:
//! 1. Takes the authenticated principal injected by the auth middleware
//! 2. Validates the inbound request into a [`ProxyEnvelope`]
//! 3. Exchanges a fresh SSO assertion for a SISGPO session token
//! 4. Forwards method, headers, and body with the session token as bearer
//! 5. Relays the response status and body back to the caller

use axum::body::{Body, Bytes};
use axum::extract::{Path, State};
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use tracing::{debug, error};

use crate::AppState;
use crate::error::AppError;
use crate::middleware::auth::AuthenticatedUser;

/// Inbound request body cap for proxied calls.
const MAX_PROXY_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Inbound headers that must not reach SISGPO. The authorization header is
/// replaced with the exchanged session token; the rest are connection-level
/// or local-session concerns.
const SKIPPED_REQUEST_HEADERS: [&str; 5] = [
    "authorization",
    "host",
    "content-length",
    "connection",
    "cookie",
];

/// Typed envelope of a request to be forwarded, validated at the boundary.
///
/// Everything SISGPO receives goes through here; the local credential is
/// already stripped by construction.
#[derive(Debug)]
pub struct ProxyEnvelope {
    pub method: reqwest::Method,
    pub path: String,
    pub query: Option<String>,
    pub headers: Vec<(String, String)>,
    pub body: Bytes,
}

impl ProxyEnvelope {
    fn new(
        method: &Method,
        path: String,
        query: Option<&str>,
        headers: &HeaderMap,
        body: Bytes,
    ) -> Result<Self, AppError> {
        let method = reqwest::Method::from_bytes(method.as_str().as_bytes())
            .map_err(|_| AppError::Validation(format!("Unsupported method: {method}")))?;

        let headers = headers
            .iter()
            .filter(|(name, _)| {
                !SKIPPED_REQUEST_HEADERS.contains(&name.as_str().to_lowercase().as_str())
            })
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();

        Ok(Self {
            method,
            path,
            query: query.map(|q| q.to_string()),
            headers,
            body,
        })
    }

    /// Absolute target URL under the given SISGPO base.
    fn target_url(&self, base_url: &str) -> String {
        match &self.query {
            Some(q) => format!("{}/{}?{}", base_url, self.path, q),
            None => format!("{}/{}", base_url, self.path),
        }
    }
}

/// `{METHOD} /api/sisgpo/{*path}` — proxy any request to SISGPO.
pub async fn proxy_handler(
    State(state): State<AppState>,
    axum::Extension(user): axum::Extension<AuthenticatedUser>,
    Path(path): Path<String>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Body,
) -> Result<Response, AppError> {
    let principal = user
        .0
        .principal()
        .ok_or_else(|| AppError::Unauthorized("Token subject is not a user id".into()))?;

    let body_bytes = axum::body::to_bytes(body, MAX_PROXY_BODY_BYTES)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to read request body: {e}")))?;

    let envelope = ProxyEnvelope::new(&method, path, uri.query(), &headers, body_bytes)?;

    // One session exchange per inbound request; failures surface to the
    // caller as a gateway error.
    let session_token = state.sisgpo.exchange_session(&principal).await?;

    let target = envelope.target_url(&state.sisgpo.config().base_url);
    debug!(method = %envelope.method, target = %target, "forwarding request to SISGPO");

    let mut req_builder = state.http.request(envelope.method.clone(), &target);
    for (name, value) in &envelope.headers {
        req_builder = req_builder.header(name, value);
    }
    // The exchanged session token replaces whatever credential came in.
    req_builder = req_builder.bearer_auth(&session_token);
    if !envelope.body.is_empty() {
        req_builder = req_builder.body(envelope.body.clone());
    }

    let upstream_response = req_builder.send().await.map_err(|e| {
        if e.is_connect() || e.is_timeout() {
            error!(error = %e, target = %target, "SISGPO unreachable during proxy forward");
        } else {
            error!(error = %e, target = %target, "proxy forward to SISGPO failed");
        }
        AppError::BadGateway(format!("SISGPO request failed: {e}"))
    })?;

    // Relay status and body unchanged.
    let status = StatusCode::from_u16(upstream_response.status().as_u16())
        .unwrap_or(StatusCode::BAD_GATEWAY);

    let mut response_builder = Response::builder().status(status);

    for (name, value) in upstream_response.headers() {
        let name_str = name.as_str().to_lowercase();
        if matches!(
            name_str.as_str(),
            "content-type" | "transfer-encoding" | "x-request-id"
        ) && let Ok(v) = value.to_str()
        {
            response_builder = response_builder.header(name.as_str(), v);
        }
    }

    let body_stream = upstream_response.bytes_stream();
    let body = Body::from_stream(body_stream);

    response_builder
        .body(body)
        .map_err(|e| AppError::Internal(format!("Response build failed: {e}")))
        .map(IntoResponse::into_response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn envelope_for(method: Method, headers: HeaderMap) -> ProxyEnvelope {
        ProxyEnvelope::new(
            &method,
            "viaturas/5".into(),
            Some("ativo=true"),
            &headers,
            Bytes::new(),
        )
        .unwrap()
    }

    #[test]
    fn target_url_appends_path_and_query() {
        let envelope = envelope_for(Method::GET, HeaderMap::new());
        assert_eq!(
            envelope.target_url("http://sisgpo.local"),
            "http://sisgpo.local/viaturas/5?ativo=true"
        );
    }

    #[test]
    fn target_url_without_query() {
        let envelope = ProxyEnvelope::new(
            &Method::GET,
            "viaturas/5".into(),
            None,
            &HeaderMap::new(),
            Bytes::new(),
        )
        .unwrap();
        assert_eq!(
            envelope.target_url("http://sisgpo.local"),
            "http://sisgpo.local/viaturas/5"
        );
    }

    #[test]
    fn local_credentials_are_stripped() {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_static("Bearer local"));
        headers.insert("cookie", HeaderValue::from_static("session=abc"));
        headers.insert("content-type", HeaderValue::from_static("application/json"));
        headers.insert("accept", HeaderValue::from_static("application/json"));

        let envelope = envelope_for(Method::POST, headers);

        let names: Vec<&str> = envelope.headers.iter().map(|(n, _)| n.as_str()).collect();
        assert!(!names.contains(&"authorization"));
        assert!(!names.contains(&"cookie"));
        assert!(names.contains(&"content-type"));
        assert!(names.contains(&"accept"));
    }

    #[test]
    fn all_spec_methods_are_accepted() {
        for method in [
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ] {
            assert!(
                ProxyEnvelope::new(&method, "x".into(), None, &HeaderMap::new(), Bytes::new())
                    .is_ok()
            );
        }
    }
}
