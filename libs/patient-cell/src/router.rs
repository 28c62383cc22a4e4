use std::sync::Arc;

use axum::{routing::post, Router};

use crate::handlers;
use crate::services::PatientService;

pub fn patient_routes(service: Arc<PatientService>) -> Router {
    Router::new()
        .route("/", post(handlers::search_patients))
        .with_state(service)
}
