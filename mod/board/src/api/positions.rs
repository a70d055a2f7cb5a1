use axum::extract::{Path, Query, State};
use axum::routing::{get, patch, post};
use axum::{middleware, Json, Router};

use openjobs_auth::middleware::require_admin;
use openjobs_core::ServiceError;

use crate::api::AppState;
use crate::model::{NewPosition, Position, PositionFilter, PositionPatch};

pub fn routes() -> Router<AppState> {
    let open = Router::new().route("/positions", get(list_positions));

    let admin = Router::new()
        .route("/positions", post(create_position))
        .route(
            "/positions/{id}",
            patch(update_position).delete(remove_position),
        )
        .route_layer(middleware::from_fn(require_admin));

    open.merge(admin)
}

// ---------------------------------------------------------------------------
// POST /positions (admin)
// ---------------------------------------------------------------------------

async fn create_position(
    State(service): State<AppState>,
    Json(req): Json<NewPosition>,
) -> Result<Json<Position>, ServiceError> {
    let position = service.create_position(&req)?;
    Ok(Json(position))
}

// ---------------------------------------------------------------------------
// GET /positions
// ---------------------------------------------------------------------------

async fn list_positions(
    State(service): State<AppState>,
    Query(filter): Query<PositionFilter>,
) -> Result<Json<Vec<Position>>, ServiceError> {
    let positions = service.list_positions(&filter)?;
    Ok(Json(positions))
}

// ---------------------------------------------------------------------------
// PATCH /positions/:id (admin)
// ---------------------------------------------------------------------------

async fn update_position(
    State(service): State<AppState>,
    Path(id): Path<i64>,
    Json(patch): Json<PositionPatch>,
) -> Result<Json<Position>, ServiceError> {
    let position = service.update_position(id, &patch)?;
    Ok(Json(position))
}

// ---------------------------------------------------------------------------
// DELETE /positions/:id (admin)
// ---------------------------------------------------------------------------

async fn remove_position(
    State(service): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    service.remove_position(id)?;
    Ok(Json(serde_json::json!({ "ok": true })))
}
