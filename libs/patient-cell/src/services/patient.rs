use std::sync::Arc;

use tracing::{debug, info};

use shared_mis::client::{MisTransport, OP_SEARCH_PATIENT};
use shared_mis::mapper::map_patients;
use shared_mis::{GatewayError, Patient};

use crate::models::PatientSearchRequest;

pub struct PatientService {
    transport: Arc<dyn MisTransport>,
}

impl PatientService {
    pub fn new(transport: Arc<dyn MisTransport>) -> Self {
        Self { transport }
    }

    /// Up to ten best matches from MIS. Incomplete requests never reach MIS.
    pub async fn search_patients(
        &self,
        request: PatientSearchRequest,
    ) -> Result<Vec<Patient>, GatewayError> {
        let criteria = request.into_criteria()?;
        debug!(last_name = %criteria.last_name, "Searching patients in MIS");

        let payload = self
            .transport
            .search_patient(&criteria)
            .await?
            .into_gateway_result(OP_SEARCH_PATIENT)?;

        let patients = map_patients(payload);
        info!(count = patients.len(), "Patient search completed");
        Ok(patients)
    }
}
