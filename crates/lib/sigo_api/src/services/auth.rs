//! Authentication service — login flow over the injected user store.

use std::sync::Arc;

use sigo_core::auth::jwt::{ACCESS_TOKEN_EXPIRY_SECS, generate_access_token};
use sigo_core::auth::password::verify_password;
use sigo_core::store::UserStore;
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::models::{AuthUser, LoginResponse};

/// Authenticate with email + password.
///
/// Unknown email, missing hash, and wrong password all yield the same
/// generic "Invalid credentials" so callers cannot probe for accounts.
pub async fn login(
    store: &Arc<dyn UserStore>,
    email: &str,
    password: &str,
    jwt_secret: &[u8],
) -> AppResult<LoginResponse> {
    let found = store.find_by_email(email).await?;

    let Some(found) = found else {
        return Err(AppError::Unauthorized("Invalid credentials".into()));
    };

    let Some(hash) = found.password_hash else {
        return Err(AppError::Unauthorized("Invalid credentials".into()));
    };

    if !verify_password(password, &hash)? {
        return Err(AppError::Unauthorized("Invalid credentials".into()));
    }

    let user = found.user;
    let token = generate_access_token(user.id, &user.email, user.name.as_deref(), jwt_secret)?;
    info!(user_id = user.id, "user logged in");

    Ok(LoginResponse {
        token,
        token_type: "Bearer".to_string(),
        expires_in: ACCESS_TOKEN_EXPIRY_SECS,
        user: AuthUser::from(user),
    })
}
