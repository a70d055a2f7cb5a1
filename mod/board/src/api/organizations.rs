use axum::extract::{Path, Query, State};
use axum::routing::{get, patch, post};
use axum::{middleware, Json, Router};

use openjobs_auth::middleware::require_admin;
use openjobs_core::ServiceError;

use crate::api::AppState;
use crate::model::{NewOrganization, Organization, OrganizationFilter, OrganizationPatch};

pub fn routes() -> Router<AppState> {
    let open = Router::new()
        .route("/organizations", get(list_organizations))
        .route("/organizations/{handle}", get(get_organization));

    let admin = Router::new()
        .route("/organizations", post(create_organization))
        .route(
            "/organizations/{handle}",
            patch(update_organization).delete(remove_organization),
        )
        .route_layer(middleware::from_fn(require_admin));

    open.merge(admin)
}

// ---------------------------------------------------------------------------
// POST /organizations (admin)
// ---------------------------------------------------------------------------

async fn create_organization(
    State(service): State<AppState>,
    Json(req): Json<NewOrganization>,
) -> Result<Json<Organization>, ServiceError> {
    let org = service.create_organization(&req)?;
    Ok(Json(org))
}

// ---------------------------------------------------------------------------
// GET /organizations
// ---------------------------------------------------------------------------

async fn list_organizations(
    State(service): State<AppState>,
    Query(filter): Query<OrganizationFilter>,
) -> Result<Json<Vec<Organization>>, ServiceError> {
    let orgs = service.list_organizations(&filter)?;
    Ok(Json(orgs))
}

// ---------------------------------------------------------------------------
// GET /organizations/:handle
// ---------------------------------------------------------------------------

async fn get_organization(
    State(service): State<AppState>,
    Path(handle): Path<String>,
) -> Result<Json<Organization>, ServiceError> {
    let org = service.get_organization(&handle)?;
    Ok(Json(org))
}

// ---------------------------------------------------------------------------
// PATCH /organizations/:handle (admin)
// ---------------------------------------------------------------------------

async fn update_organization(
    State(service): State<AppState>,
    Path(handle): Path<String>,
    Json(patch): Json<OrganizationPatch>,
) -> Result<Json<Organization>, ServiceError> {
    let org = service.update_organization(&handle, &patch)?;
    Ok(Json(org))
}

// ---------------------------------------------------------------------------
// DELETE /organizations/:handle (admin)
// ---------------------------------------------------------------------------

async fn remove_organization(
    State(service): State<AppState>,
    Path(handle): Path<String>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    service.remove_organization(&handle)?;
    Ok(Json(serde_json::json!({ "ok": true })))
}
