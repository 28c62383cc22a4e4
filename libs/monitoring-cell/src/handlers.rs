// =====================================================================================
// MONITORING CELL HANDLERS
// =====================================================================================

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::models::{MisStatus, MonitoringError};
use crate::services::MisStatusService;

pub async fn get_mis_status(
    State(service): State<Arc<MisStatusService>>,
) -> Result<Json<MisStatus>, MonitoringError> {
    Ok(Json(service.check().await?))
}

impl IntoResponse for MonitoringError {
    fn into_response(self) -> Response {
        let message = match self {
            MonitoringError::MisUnavailable(message) => message,
        };

        tracing::error!("MIS status check failed: {}", message);

        (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({
            "status": "error",
            "error": message
        }))).into_response()
    }
}
