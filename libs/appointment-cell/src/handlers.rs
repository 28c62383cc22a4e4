use std::sync::Arc;

use axum::{extract::State, Json};
use chrono::Utc;

use shared_mis::AppointmentSlot;
use shared_models::error::AppError;
use shared_utils::extractor::{ApiPath, ApiQuery};

use crate::models::SlotQuery;
use crate::services::{SlotService, MISSING_SPECIALTY_MESSAGE};

#[axum::debug_handler]
pub async fn list_slots(
    State(service): State<Arc<SlotService>>,
    ApiPath(specialty): ApiPath<String>,
    ApiQuery(query): ApiQuery<SlotQuery>,
) -> Result<Json<Vec<AppointmentSlot>>, AppError> {
    let range = query.into_range(Utc::now()).map_err(|e| AppError::ValidationError(e.0))?;
    let slots = service.available_slots(&specialty, range).await?;
    Ok(Json(slots))
}

pub async fn missing_specialty() -> AppError {
    AppError::ValidationError(MISSING_SPECIALTY_MESSAGE.to_string())
}
