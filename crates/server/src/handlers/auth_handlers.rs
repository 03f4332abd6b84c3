//! # Authentication Route Handlers

use crate::{
    auth::middleware::issue_admin_token,
    errors::AppError,
    state::AppState,
    types::{ApiResponse, LoginRequest, LoginResponse},
};
use axum::{extract::State, Json};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;
use tracing::{info, warn};

use super::plain_response;

/// Compares SHA-256 digests of both inputs in constant time, so neither the
/// first differing byte nor the password length shows in the timing.
fn password_matches(given: &str, expected: &str) -> bool {
    let given = Sha256::digest(given.as_bytes());
    let expected = Sha256::digest(expected.as_bytes());
    given.ct_eq(&expected).into()
}

/// The handler for `POST /admin/login`.
pub async fn login_handler(
    State(app_state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, AppError> {
    let admin = &app_state.config.admin;
    if !password_matches(&payload.password, &admin.password) {
        warn!("Rejected admin login attempt.");
        return Err(AppError::Unauthorized("Invalid password.".to_string()));
    }

    let (token, expires_at) = issue_admin_token(&admin.jwt_secret, admin.token_ttl_secs)
        .map_err(|e| AppError::Internal(e.into()))?;
    info!(expires_at, "Issued admin session.");
    Ok(plain_response(LoginResponse { token, expires_at }))
}

#[cfg(test)]
mod tests {
    use super::password_matches;

    #[test]
    fn matches_only_the_exact_password() {
        assert!(password_matches("open-sesame", "open-sesame"));
        assert!(!password_matches("open-sesamE", "open-sesame"));
        assert!(!password_matches("open", "open-sesame"));
        assert!(!password_matches("open-sesame-and-more", "open-sesame"));
        assert!(!password_matches("", "open-sesame"));
    }
}
