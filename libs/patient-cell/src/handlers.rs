use std::sync::Arc;

use axum::{extract::State, Json};

use shared_mis::{GatewayError, Patient};
use shared_models::error::AppError;
use shared_utils::extractor::ApiJson;

use crate::models::PatientSearchRequest;
use crate::services::PatientService;

/// MIS business errors here mean the search input was rejected, so they are
/// reported as 400 rather than 500.
#[axum::debug_handler]
pub async fn search_patients(
    State(service): State<Arc<PatientService>>,
    ApiJson(request): ApiJson<PatientSearchRequest>,
) -> Result<Json<Vec<Patient>>, AppError> {
    match service.search_patients(request).await {
        Ok(patients) => Ok(Json(patients)),
        Err(GatewayError::Business(message)) => Err(AppError::BadRequest(message)),
        Err(e) => Err(e.into()),
    }
}
