//! Bearer-token extractor guarding the on-demand status endpoint.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::error::AppError;
use crate::state::AppState;

/// Marker proving the request carried `Authorization: Bearer <API_TOKEN>`.
///
/// Add it as a handler parameter to require the token:
///
/// ```ignore
/// async fn handler(_auth: Authorized, State(state): State<AppState>) -> Json<()> {
///     Json(())
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Authorized;

impl FromRequestParts<AppState> for Authorized {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::Unauthorized("Missing Authorization header".into()))?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Unauthorized("Invalid Authorization format. Expected: Bearer <token>".into())
        })?;

        if !token_matches(&state.config.api_token, token) {
            return Err(AppError::Unauthorized("Invalid token".into()));
        }

        Ok(Authorized)
    }
}

type HmacSha256 = Hmac<Sha256>;

const TOKEN_MAC_KEY: &[u8] = b"hostwatch-api-token";

fn token_mac(token: &str) -> Option<HmacSha256> {
    let mut mac = HmacSha256::new_from_slice(TOKEN_MAC_KEY).ok()?;
    mac.update(token.as_bytes());
    Some(mac)
}

/// Constant-time token comparison over fixed-length MACs of both sides.
fn token_matches(expected: &str, presented: &str) -> bool {
    let (Some(expected), Some(presented)) = (token_mac(expected), token_mac(presented)) else {
        return false;
    };
    presented
        .verify_slice(&expected.finalize().into_bytes())
        .is_ok()
}
