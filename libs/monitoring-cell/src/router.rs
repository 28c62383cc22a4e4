// =====================================================================================
// MONITORING CELL ROUTER
// =====================================================================================

use std::sync::Arc;

use axum::{routing::get, Router};

use crate::handlers::get_mis_status;
use crate::services::MisStatusService;

pub fn mis_status_routes(service: Arc<MisStatusService>) -> Router {
    Router::new()
        .route("/", get(get_mis_status))
        .with_state(service)
}
