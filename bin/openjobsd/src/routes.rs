//! Route registration — module routes + system endpoints.

use std::sync::Arc;

use axum::response::IntoResponse;
use axum::routing::get;
use axum::{middleware, Router};
use tracing::info;

use openjobs_auth::middleware::authenticate;
use openjobs_auth::AuthState;

/// Build the complete router. The authenticate layer is outermost: it
/// attaches an identity claim when a bearer token verifies and never
/// rejects — per-route policy gates inside the modules do.
pub fn build_router(auth_state: Arc<AuthState>, module_routes: Vec<(&str, Router)>) -> Router {
    let mut app = Router::new()
        .route("/health", get(health))
        .route("/version", get(version));

    for (name, router) in module_routes {
        info!("Mounting {name} module routes");
        app = app.merge(router);
    }

    app.layer(middleware::from_fn_with_state(auth_state, authenticate))
}

async fn health() -> impl IntoResponse {
    axum::Json(serde_json::json!({
        "status": "ok",
    }))
}

async fn version() -> impl IntoResponse {
    axum::Json(serde_json::json!({
        "name": "openjobsd",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
