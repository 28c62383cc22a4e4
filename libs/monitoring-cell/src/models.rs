// =====================================================================================
// MONITORING CELL MODELS
// =====================================================================================

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MisStatusData {
    pub districts_count: usize,
}

/// Body of a successful status check: `{"status": "ok", "data": {...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MisStatus {
    pub status: &'static str,
    pub data: MisStatusData,
}

impl MisStatus {
    pub fn ok(districts_count: usize) -> Self {
        Self {
            status: "ok",
            data: MisStatusData { districts_count },
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum MonitoringError {
    #[error("{0}")]
    MisUnavailable(String),
}
