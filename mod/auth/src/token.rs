//! Bearer-credential signing and verification (HS256 JWT).

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use openjobs_core::ServiceError;

/// Identity claim decoded from a verified token.
///
/// Request-scoped: the middleware attaches it to request extensions and
/// it lives for a single request. Never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Username of the authenticated caller.
    pub username: String,
    /// Whether the caller holds admin privileges.
    #[serde(rename = "isAdmin", default)]
    pub is_admin: bool,
    /// Issued at (unix timestamp).
    pub iat: i64,
    /// Expiration (unix timestamp).
    pub exp: i64,
}

/// Shared verification state built from the server's JWT secret.
#[derive(Clone)]
pub struct AuthState {
    pub decoding_key: DecodingKey,
    pub validation: Validation,
}

impl AuthState {
    pub fn new(secret: &str) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::default(),
        }
    }
}

/// Sign a token for the given identity.
///
/// Token issuance is an external concern in production — this exists for
/// ops tooling and tests that share the server secret.
pub fn sign(
    username: &str,
    is_admin: bool,
    secret: &str,
    ttl_secs: i64,
) -> Result<String, ServiceError> {
    let now = chrono::Utc::now();
    let claims = Claims {
        username: username.to_string(),
        is_admin,
        iat: now.timestamp(),
        exp: (now + chrono::Duration::seconds(ttl_secs)).timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| ServiceError::Internal(format!("token encode failed: {e}")))
}

/// Verify and decode a bearer token. Invalid or expired tokens are
/// Unauthorized.
pub fn verify(token: &str, state: &AuthState) -> Result<Claims, ServiceError> {
    decode::<Claims>(token, &state.decoding_key, &state.validation)
        .map(|data| data.claims)
        .map_err(|e| ServiceError::Unauthorized(format!("invalid token: {e}")))
}
