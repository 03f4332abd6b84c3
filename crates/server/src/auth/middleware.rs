//! # Admin Session Middleware
//!
//! JWT-based admin sessions. `POST /admin/login` trades the configured admin
//! password for a signed token; the [`AdminSession`] extractor guards every
//! admin route and rejects missing, malformed, or expired tokens with `401`.

use axum::{
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{info, warn};

use crate::state::AppState;

/// The only subject ever issued.
pub const ADMIN_SUBJECT: &str = "admin";

/// Represents the claims we expect to find in the JWT.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    /// The expiration timestamp.
    pub exp: usize,
    pub iat: usize,
}

/// Signs a fresh admin token. Returns the token and its expiry.
pub fn issue_admin_token(
    secret: &str,
    ttl_secs: u64,
) -> Result<(String, usize), jsonwebtoken::errors::Error> {
    let now = Utc::now().timestamp().max(0) as usize;
    let claims = Claims {
        sub: ADMIN_SUBJECT.to_string(),
        exp: now + ttl_secs as usize,
        iat: now,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;
    Ok((token, claims.exp))
}

/// Proof that the request carries a valid admin token.
#[derive(Debug, Clone)]
pub struct AdminSession {
    pub expires_at: usize,
}

/// A custom rejection type for authentication failures.
pub struct AuthError(StatusCode, String);

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        (self.0, Json(json!({ "error": self.1 }))).into_response()
    }
}

fn unauthorized(message: &str) -> AuthError {
    AuthError(StatusCode::UNAUTHORIZED, message.to_string())
}

impl FromRequestParts<AppState> for AdminSession {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let bearer_header =
            Option::<TypedHeader<Authorization<Bearer>>>::from_request_parts(parts, state)
                .await
                .map_err(|e| {
                    warn!("Unexpected error during header extraction: {}", e);
                    AuthError(
                        StatusCode::BAD_REQUEST,
                        "Invalid Authorization header format.".to_string(),
                    )
                })?;

        let Some(TypedHeader(Authorization(bearer))) = bearer_header else {
            info!("Admin route called without a session token.");
            return Err(unauthorized("Admin session required."));
        };

        // `Validation::default()` pins HS256 and rejects expired tokens.
        let token_data = decode::<Claims>(
            bearer.token(),
            &DecodingKey::from_secret(state.config.admin.jwt_secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|e| {
            warn!("JWT validation failed: {}", e);
            unauthorized("Invalid or expired token.")
        })?;

        if token_data.claims.sub != ADMIN_SUBJECT {
            warn!(sub = %token_data.claims.sub, "Token subject is not the admin.");
            return Err(unauthorized("Invalid or expired token."));
        }

        Ok(AdminSession {
            expires_at: token_data.claims.exp,
        })
    }
}
