//! Authentication request handlers.

use axum::Json;
use axum::extract::State;

use crate::AppState;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::{AuthUser, LoginRequest, LoginResponse};
use crate::services::auth;

/// `POST /api/auth/login` — authenticate with email + password.
pub async fn login_handler(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let resp = auth::login(
        &state.store,
        &body.email,
        &body.password,
        state.config.jwt_secret.as_bytes(),
    )
    .await?;
    Ok(Json(resp))
}

/// `GET /api/auth/me` — the authenticated principal. Requires authentication.
pub async fn me_handler(
    axum::Extension(user): axum::Extension<AuthenticatedUser>,
) -> AppResult<Json<AuthUser>> {
    let principal = user
        .0
        .principal()
        .ok_or_else(|| AppError::Unauthorized("Token subject is not a user id".into()))?;
    Ok(Json(AuthUser {
        id: principal.id,
        email: user.0.email,
        name: user.0.name,
    }))
}
