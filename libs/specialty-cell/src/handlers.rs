use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use tracing::warn;

use shared_mis::Specialty;

use crate::models::SpecialtyQuery;
use crate::services::SpecialtyService;

/// Always 200: total failure degrades to the fallback list, and an unreadable
/// query string falls back to the default branch.
#[axum::debug_handler]
pub async fn list_specialties(
    State(service): State<Arc<SpecialtyService>>,
    query: Result<Query<SpecialtyQuery>, QueryRejection>,
) -> Json<Vec<Specialty>> {
    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => {
            warn!("Ignoring malformed specialty query: {}", rejection.body_text());
            SpecialtyQuery::default()
        }
    };

    Json(service.list_specialties(query.lpu_id.as_deref()).await)
}
