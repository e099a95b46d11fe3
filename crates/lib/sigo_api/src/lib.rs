//! # sigo_api
//!
//! HTTP API library for SIGO.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;

use std::sync::Arc;

use axum::Router;
use axum::routing::{any, get, post};
use sigo_core::sisgpo::Sisgpo;
use sigo_core::store::UserStore;
use tower_http::cors::{Any, CorsLayer};

use crate::config::ApiConfig;
use crate::handlers::{auth, health, sisgpo};

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Local user store.
    pub store: Arc<dyn UserStore>,
    /// SISGPO integration client.
    pub sisgpo: Arc<Sisgpo>,
    /// Outbound HTTP client for proxied requests.
    pub http: reqwest::Client,
    /// API configuration.
    pub config: ApiConfig,
}

/// Builds the Axum router with all routes and shared state.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Public routes (no auth required)
    let public = Router::new()
        .route("/api/health", get(health::health_handler))
        .route("/api/auth/login", post(auth::login_handler));

    // Protected routes (require auth)
    let protected = Router::new()
        .route("/api/auth/me", get(auth::me_handler))
        .route("/api/sisgpo/{*path}", any(sisgpo::proxy_handler))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::require_auth,
        ));

    Router::new()
        .merge(public)
        .merge(protected)
        .layer(cors)
        .with_state(state)
}
