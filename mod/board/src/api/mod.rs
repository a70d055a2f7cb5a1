pub mod organizations;
pub mod positions;

use std::sync::Arc;

use axum::Router;

use crate::service::BoardService;

/// Shared application state.
pub type AppState = Arc<BoardService>;

/// Build the board API router. Mutation routes are gated behind the
/// admin policy; reads are open to any caller.
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(organizations::routes())
        .merge(positions::routes())
        .with_state(state)
}
