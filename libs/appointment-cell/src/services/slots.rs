use std::sync::Arc;

use chrono::Utc;
use futures::future::try_join_all;
use tracing::{debug, info};

use shared_mis::client::{MisTransport, OP_GET_DOCTOR_LIST, OP_GET_FREE_SLOTS};
use shared_mis::mapper::{map_doctors, map_slots};
use shared_mis::{
    AppointmentSlot, DateRange, Doctor, GatewayError, SlotContext, SlotTarget, Specialty,
    ValidationError,
};
use specialty_cell::SpecialtyService;

pub const MISSING_SPECIALTY_MESSAGE: &str = "Специальность не указана";

/// Free appointment slots across every doctor of a specialty.
pub struct SlotService {
    transport: Arc<dyn MisTransport>,
    specialties: Arc<SpecialtyService>,
}

impl SlotService {
    pub fn new(transport: Arc<dyn MisTransport>, specialties: Arc<SpecialtyService>) -> Self {
        Self {
            transport,
            specialties,
        }
    }

    /// `specialty` is a slug or MIS id. Slots come back grouped by doctor in
    /// the order MIS lists the doctors; the first failing call fails the whole
    /// request.
    pub async fn available_slots(
        &self,
        specialty: &str,
        range: Option<DateRange>,
    ) -> Result<Vec<AppointmentSlot>, GatewayError> {
        let identifier = specialty.trim();
        if identifier.is_empty() {
            return Err(ValidationError::new(MISSING_SPECIALTY_MESSAGE).into());
        }

        let specialty = self
            .specialties
            .find_specialty(None, identifier)
            .await
            .ok_or_else(|| GatewayError::NotFound(format!("Специальность '{}' не найдена", identifier)))?;

        let range = range.unwrap_or_else(|| DateRange::upcoming(Utc::now()));
        let doctors = self.doctors_for(&specialty).await?;
        debug!(specialty = %specialty.slug, doctors = doctors.len(), "Collecting free slots");

        let per_doctor = try_join_all(
            doctors
                .iter()
                .map(|doctor| self.doctor_slots(doctor, &specialty, range)),
        )
        .await?;

        let slots: Vec<AppointmentSlot> = per_doctor.into_iter().flatten().collect();
        info!(specialty = %specialty.slug, count = slots.len(), "Free slots loaded");
        Ok(slots)
    }

    async fn doctors_for(&self, specialty: &Specialty) -> Result<Vec<Doctor>, GatewayError> {
        let payload = self
            .transport
            .get_doctor_list(self.specialties.default_lpu_id(), &specialty.id)
            .await?
            .into_gateway_result(OP_GET_DOCTOR_LIST)?;

        Ok(map_doctors(payload, &specialty.id))
    }

    async fn doctor_slots(
        &self,
        doctor: &Doctor,
        specialty: &Specialty,
        range: DateRange,
    ) -> Result<Vec<AppointmentSlot>, GatewayError> {
        let payload = self
            .transport
            .get_free_slots(&SlotTarget::Doctor(doctor.id.clone()), Some(range))
            .await?
            .into_gateway_result(OP_GET_FREE_SLOTS)?;

        let context = SlotContext {
            specialty: Some(specialty.name.clone()),
            doctor_name: Some(doctor.full_name.clone()),
        };
        Ok(map_slots(payload, &context))
    }
}
