use std::sync::Arc;

use axum::{
    Router,
    routing::get,
};

use appointment_cell::{slot_routes, SlotService};
use doctor_cell::{doctor_routes, DoctorService};
use monitoring_cell::{mis_status_routes, MisStatusService};
use patient_cell::{patient_routes, PatientService};
use shared_config::AppConfig;
use shared_mis::MisTransport;
use specialty_cell::{specialty_routes, SpecialtyService};

/// One instance of every cell service, sharing a single transport and the
/// specialty cache.
pub struct AppServices {
    pub specialties: Arc<SpecialtyService>,
    pub doctors: Arc<DoctorService>,
    pub patients: Arc<PatientService>,
    pub slots: Arc<SlotService>,
    pub mis_status: Arc<MisStatusService>,
}

impl AppServices {
    pub fn new(config: &AppConfig, transport: Arc<dyn MisTransport>) -> Self {
        let specialties = Arc::new(SpecialtyService::new(config, transport.clone()));

        Self {
            doctors: Arc::new(DoctorService::new(config, transport.clone())),
            patients: Arc::new(PatientService::new(transport.clone())),
            slots: Arc::new(SlotService::new(transport.clone(), specialties.clone())),
            mis_status: Arc::new(MisStatusService::new(transport)),
            specialties,
        }
    }
}

pub fn create_router(services: AppServices) -> Router {
    Router::new()
        .route("/", get(|| async { "MIS booking gateway is running!" }))
        .nest("/api/specialties", specialty_routes(services.specialties))
        .nest("/api/doctors", doctor_routes(services.doctors))
        .nest("/api/patients", patient_routes(services.patients))
        .nest("/api/slots", slot_routes(services.slots))
        .nest("/api/mis-status", mis_status_routes(services.mis_status))
}
