// =====================================================================================
// MIS STATUS SERVICE
// =====================================================================================

use std::sync::Arc;
use std::time::Instant;

use tracing::{info, instrument, warn};

use shared_mis::client::{MisTransport, OP_GET_DISTRICT_LIST};
use shared_mis::mapper::map_districts;
use shared_mis::GatewayError;

use crate::models::{MisStatus, MonitoringError};

pub struct MisStatusService {
    transport: Arc<dyn MisTransport>,
}

impl MisStatusService {
    pub fn new(transport: Arc<dyn MisTransport>) -> Self {
        Self { transport }
    }

    #[instrument(skip(self))]
    pub async fn check(&self) -> Result<MisStatus, MonitoringError> {
        let started = Instant::now();

        let result = match self.transport.get_district_list().await {
            Ok(result) => result.into_gateway_result(OP_GET_DISTRICT_LIST),
            Err(e) => Err(e.into()),
        };
        let elapsed_ms = started.elapsed().as_millis() as u64;

        match result {
            Ok(payload) => {
                let districts = map_districts(payload);
                info!(districts = districts.len(), elapsed_ms, "MIS is reachable");
                Ok(MisStatus::ok(districts.len()))
            }
            Err(e) => {
                warn!(elapsed_ms, "MIS status check failed: {}", e);
                Err(MonitoringError::MisUnavailable(failure_message(e)))
            }
        }
    }
}

fn failure_message(err: GatewayError) -> String {
    match err {
        GatewayError::Transport { message, .. } => message,
        other => other.to_string(),
    }
}
