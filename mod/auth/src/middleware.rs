//! Authorization middleware chain.
//!
//! `authenticate` runs once, globally: it reads an optional bearer token,
//! attaches `Claims` to request extensions when the token verifies, and
//! never rejects — anonymous traffic is legitimate. Routes that need an
//! identity compose exactly one of the policy gates via `route_layer`;
//! a gate rejects before the handler (and therefore any data access)
//! runs.

use std::sync::Arc;

use axum::extract::{Path, Request, State};
use axum::middleware::Next;
use axum::response::Response;

use openjobs_core::ServiceError;

use crate::policy;
use crate::token::{self, AuthState, Claims};

/// Attach the identity claim from a bearer token, if one verifies.
///
/// Absent or unverifiable tokens attach nothing and proceed anyway.
pub async fn authenticate(
    State(state): State<Arc<AuthState>>,
    mut request: Request,
    next: Next,
) -> Response {
    if let Some(claims) = bearer_token(&request).and_then(|t| token::verify(t, &state).ok()) {
        request.extensions_mut().insert(claims);
    }
    next.run(request).await
}

/// Extract the token from `Authorization: Bearer <token>`.
/// Scheme match is case-insensitive.
fn bearer_token(request: &Request) -> Option<&str> {
    let header = request
        .headers()
        .get(axum::http::header::AUTHORIZATION)?
        .to_str()
        .ok()?;
    let (scheme, token) = header.split_once(' ')?;
    if scheme.eq_ignore_ascii_case("bearer") {
        Some(token.trim())
    } else {
        None
    }
}

/// Gate: any logged-in caller.
pub async fn require_logged_in(request: Request, next: Next) -> Result<Response, ServiceError> {
    policy::require_logged_in(request.extensions().get::<Claims>())?;
    Ok(next.run(request).await)
}

/// Gate: privileged caller only.
pub async fn require_admin(request: Request, next: Next) -> Result<Response, ServiceError> {
    policy::require_admin(request.extensions().get::<Claims>())?;
    Ok(next.run(request).await)
}

/// Gate: the path-addressed user or a privileged caller. The route's
/// single path parameter is the username.
pub async fn require_self_or_admin(
    Path(username): Path<String>,
    request: Request,
    next: Next,
) -> Result<Response, ServiceError> {
    policy::require_self_or_admin(request.extensions().get::<Claims>(), &username)?;
    Ok(next.run(request).await)
}
