use std::sync::Arc;

use axum::{extract::State, Json};

use shared_mis::Doctor;
use shared_models::error::AppError;
use shared_utils::extractor::ApiQuery;

use crate::models::DoctorQuery;
use crate::services::DoctorService;

#[axum::debug_handler]
pub async fn list_doctors(
    State(service): State<Arc<DoctorService>>,
    ApiQuery(query): ApiQuery<DoctorQuery>,
) -> Result<Json<Vec<Doctor>>, AppError> {
    let doctors = service.list_doctors(query.lpu_id, query.specialty_id).await?;
    Ok(Json(doctors))
}
