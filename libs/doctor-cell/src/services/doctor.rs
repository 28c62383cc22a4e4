use std::sync::Arc;

use tracing::{debug, info};

use shared_config::AppConfig;
use shared_mis::client::{MisTransport, OP_GET_DOCTOR_LIST};
use shared_mis::mapper::map_doctors;
use shared_mis::{Doctor, GatewayError, ValidationError};
use shared_utils::extractor::non_blank;

pub const MISSING_SPECIALTY_MESSAGE: &str = "ID специальности не указан";

pub struct DoctorService {
    transport: Arc<dyn MisTransport>,
    default_lpu_id: String,
}

impl DoctorService {
    pub fn new(config: &AppConfig, transport: Arc<dyn MisTransport>) -> Self {
        Self {
            transport,
            default_lpu_id: config.default_lpu_id.clone(),
        }
    }

    /// Doctors of one specialty at a branch. A blank specialty id is rejected
    /// before MIS is contacted.
    pub async fn list_doctors(
        &self,
        lpu_id: Option<String>,
        specialty_id: Option<String>,
    ) -> Result<Vec<Doctor>, GatewayError> {
        let specialty_id = non_blank(specialty_id)
            .ok_or_else(|| ValidationError::new(MISSING_SPECIALTY_MESSAGE))?;
        let lpu_id = non_blank(lpu_id).unwrap_or_else(|| self.default_lpu_id.clone());

        debug!(lpu_id = %lpu_id, specialty_id = %specialty_id, "Fetching doctors from MIS");

        let payload = self
            .transport
            .get_doctor_list(&lpu_id, &specialty_id)
            .await?
            .into_gateway_result(OP_GET_DOCTOR_LIST)?;

        let doctors = map_doctors(payload, &specialty_id);
        info!(specialty_id = %specialty_id, count = doctors.len(), "Doctor list loaded");
        Ok(doctors)
    }
}
