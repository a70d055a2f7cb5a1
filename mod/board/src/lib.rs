pub mod api;
pub mod model;
pub mod service;

use std::sync::Arc;

use axum::Router;
use openjobs_core::{Module, ServiceError};
use openjobs_sql::SqlStore;

use service::BoardService;

/// The board module — organizations and their open positions.
pub struct BoardModule {
    service: Arc<BoardService>,
}

impl BoardModule {
    /// Create the board module and initialise its schema.
    pub fn new(sql: Arc<dyn SqlStore>) -> Result<Self, ServiceError> {
        Ok(Self {
            service: Arc::new(BoardService::new(sql)?),
        })
    }

    /// Direct access to the service, for tooling and tests.
    pub fn service(&self) -> &Arc<BoardService> {
        &self.service
    }
}

impl Module for BoardModule {
    fn name(&self) -> &str {
        "board"
    }

    fn routes(&self) -> Router {
        api::router(Arc::clone(&self.service))
    }
}
