use serde::Deserialize;

/// Query string of `GET /api/doctors`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorQuery {
    pub lpu_id: Option<String>,
    pub specialty_id: Option<String>,
}
