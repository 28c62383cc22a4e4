use std::sync::Arc;

use axum::{routing::get, Router};

use crate::handlers;
use crate::services::SpecialtyService;

pub fn specialty_routes(service: Arc<SpecialtyService>) -> Router {
    Router::new()
        .route("/", get(handlers::list_specialties))
        .with_state(service)
}
