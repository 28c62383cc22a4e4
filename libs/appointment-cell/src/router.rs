// libs/appointment-cell/src/router.rs
use std::sync::Arc;

use axum::{routing::get, Router};

use crate::handlers;
use crate::services::SlotService;

pub fn slot_routes(service: Arc<SlotService>) -> Router {
    Router::new()
        .route("/", get(handlers::missing_specialty))
        .route("/{specialty}", get(handlers::list_slots))
        .with_state(service)
}
