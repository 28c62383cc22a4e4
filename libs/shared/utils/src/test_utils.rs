use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};

use shared_config::AppConfig;
use shared_mis::client::{
    MisTransport, OP_GET_DISTRICT_LIST, OP_GET_DOCTOR_LIST, OP_GET_FREE_SLOTS,
    OP_GET_SPECIALITY_LIST, OP_SEARCH_PATIENT,
};
use shared_mis::models::{DateRange, PatientSearchCriteria, SlotTarget};
use shared_mis::wire::{
    AppointmentContainer, AppointmentListPayload, DistrictContainer, DistrictListPayload,
    DoctorContainer, DoctorListPayload, MisError, MisResult, OneOrMany, PatientContainer,
    PatientListPayload, RawAppointment, RawDistrict, RawDoctor, RawPatient, RawSpeciality,
    SpecialityContainer, SpecialityListPayload,
};
use shared_mis::ValidationError;

pub struct TestConfig {
    pub mis_endpoint_url: String,
    pub mis_guid: String,
    pub default_lpu_id: String,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            mis_endpoint_url: "http://localhost:8081/HubService2.svc/json".to_string(),
            mis_guid: "3f2c7a1e-9b8d-4c6e-a1f0-5d4b3c2a1908".to_string(),
            default_lpu_id: "1".to_string(),
        }
    }
}

impl TestConfig {
    pub fn with_endpoint(endpoint: &str) -> Self {
        Self {
            mis_endpoint_url: endpoint.to_string(),
            ..Self::default()
        }
    }

    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            mis_endpoint_url: self.mis_endpoint_url.clone(),
            mis_guid: self.mis_guid.clone(),
            default_lpu_id: self.default_lpu_id.clone(),
            mis_timeout_seconds: 2,
            ..AppConfig::default()
        }
    }

    pub fn to_arc(&self) -> Arc<AppConfig> {
        Arc::new(self.to_app_config())
    }
}

// ==============================================================================
// STUB TRANSPORT
// ==============================================================================

/// Scripted [`MisTransport`] that records every call it receives.
///
/// Unscripted operations succeed with an empty payload. Slot responses are
/// keyed by target id.
#[derive(Default)]
pub struct StubTransport {
    districts: Mutex<Option<MisResult<DistrictListPayload>>>,
    specialties: Mutex<Option<MisResult<SpecialityListPayload>>>,
    doctors: Mutex<Option<MisResult<DoctorListPayload>>>,
    patients: Mutex<Option<MisResult<PatientListPayload>>>,
    slots: Mutex<HashMap<String, MisResult<AppointmentListPayload>>>,
    calls: Mutex<Vec<String>>,
}

impl StubTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_districts(self, result: MisResult<DistrictListPayload>) -> Self {
        self.set_districts(result);
        self
    }

    pub fn with_specialties(self, result: MisResult<SpecialityListPayload>) -> Self {
        self.set_specialties(result);
        self
    }

    pub fn with_doctors(self, result: MisResult<DoctorListPayload>) -> Self {
        self.set_doctors(result);
        self
    }

    pub fn with_patients(self, result: MisResult<PatientListPayload>) -> Self {
        self.set_patients(result);
        self
    }

    pub fn with_slots(self, target_id: &str, result: MisResult<AppointmentListPayload>) -> Self {
        self.set_slots(target_id, result);
        self
    }

    pub fn set_districts(&self, result: MisResult<DistrictListPayload>) {
        *lock(&self.districts) = Some(result);
    }

    pub fn set_specialties(&self, result: MisResult<SpecialityListPayload>) {
        *lock(&self.specialties) = Some(result);
    }

    pub fn set_doctors(&self, result: MisResult<DoctorListPayload>) {
        *lock(&self.doctors) = Some(result);
    }

    pub fn set_patients(&self, result: MisResult<PatientListPayload>) {
        *lock(&self.patients) = Some(result);
    }

    pub fn set_slots(&self, target_id: &str, result: MisResult<AppointmentListPayload>) {
        lock(&self.slots).insert(target_id.to_string(), result);
    }

    pub fn call_count(&self, operation: &str) -> usize {
        let prefix = format!("{}:", operation);
        lock(&self.calls)
            .iter()
            .filter(|c| c.as_str() == operation || c.starts_with(&prefix))
            .count()
    }

    pub fn total_calls(&self) -> usize {
        lock(&self.calls).len()
    }

    /// Recorded calls as `Operation` or `Operation:argument`.
    pub fn calls(&self) -> Vec<String> {
        lock(&self.calls).clone()
    }

    fn record(&self, call: String) {
        lock(&self.calls).push(call);
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn scripted<T: Clone + Default>(slot: &Mutex<Option<MisResult<T>>>) -> MisResult<T> {
    lock(slot)
        .clone()
        .unwrap_or_else(|| MisResult::Success(T::default()))
}

#[async_trait]
impl MisTransport for StubTransport {
    async fn get_district_list(&self) -> Result<MisResult<DistrictListPayload>, ValidationError> {
        self.record(OP_GET_DISTRICT_LIST.to_string());
        Ok(scripted(&self.districts))
    }

    async fn get_speciality_list(
        &self,
        lpu_id: &str,
    ) -> Result<MisResult<SpecialityListPayload>, ValidationError> {
        self.record(format!("{}:{}", OP_GET_SPECIALITY_LIST, lpu_id));
        Ok(scripted(&self.specialties))
    }

    async fn get_doctor_list(
        &self,
        lpu_id: &str,
        specialty_id: &str,
    ) -> Result<MisResult<DoctorListPayload>, ValidationError> {
        self.record(format!("{}:{}:{}", OP_GET_DOCTOR_LIST, lpu_id, specialty_id));
        Ok(scripted(&self.doctors))
    }

    async fn search_patient(
        &self,
        criteria: &PatientSearchCriteria,
    ) -> Result<MisResult<PatientListPayload>, ValidationError> {
        criteria.validate()?;
        self.record(format!("{}:{}", OP_SEARCH_PATIENT, criteria.last_name));
        Ok(scripted(&self.patients))
    }

    async fn get_free_slots(
        &self,
        target: &SlotTarget,
        _range: Option<DateRange>,
    ) -> Result<MisResult<AppointmentListPayload>, ValidationError> {
        self.record(format!("{}:{}", OP_GET_FREE_SLOTS, target.id()));
        Ok(lock(&self.slots)
            .get(target.id())
            .cloned()
            .unwrap_or_else(|| MisResult::Success(AppointmentListPayload::default())))
    }
}

// ==============================================================================
// CANNED MIS RESPONSES
// ==============================================================================

pub struct MockMisResponses;

impl MockMisResponses {
    pub fn failure<T>(descriptions: &[&str]) -> MisResult<T> {
        MisResult::Failure(
            descriptions
                .iter()
                .enumerate()
                .map(|(i, d)| MisError::new((i + 1).to_string(), *d))
                .collect(),
        )
    }

    pub fn transport_failure<T>() -> MisResult<T> {
        MisResult::transport_failure("Сервис МИС недоступен")
    }

    pub fn districts(items: &[(&str, &str)]) -> MisResult<DistrictListPayload> {
        MisResult::Success(DistrictListPayload {
            list: Some(DistrictContainer {
                items: Some(OneOrMany::Many(
                    items
                        .iter()
                        .map(|(id, name)| RawDistrict {
                            id_district: Some(id.to_string()),
                            district_name: Some(name.to_string()),
                            okato: None,
                        })
                        .collect(),
                )),
            }),
        })
    }

    pub fn specialties(items: &[(&str, &str)]) -> MisResult<SpecialityListPayload> {
        MisResult::Success(SpecialityListPayload {
            list: Some(SpecialityContainer {
                items: Some(OneOrMany::Many(
                    items
                        .iter()
                        .map(|(id, name)| RawSpeciality {
                            id_spesiality: Some(id.to_string()),
                            name_spesiality: Some(name.to_string()),
                            ..Default::default()
                        })
                        .collect(),
                )),
            }),
        })
    }

    pub fn doctors(items: &[(&str, &str)]) -> MisResult<DoctorListPayload> {
        MisResult::Success(DoctorListPayload {
            list: Some(DoctorContainer {
                items: Some(OneOrMany::Many(
                    items
                        .iter()
                        .map(|(id, name)| RawDoctor {
                            id_doc: Some(id.to_string()),
                            name: Some(name.to_string()),
                            ..Default::default()
                        })
                        .collect(),
                )),
            }),
        })
    }

    /// `(id, surname, name, birthday literal)`
    pub fn patients(items: &[(&str, &str, &str, &str)]) -> MisResult<PatientListPayload> {
        MisResult::Success(PatientListPayload {
            list: Some(PatientContainer {
                items: Some(OneOrMany::Many(
                    items
                        .iter()
                        .map(|(id, surname, name, birthday)| RawPatient {
                            id_pat: Some(id.to_string()),
                            surname: Some(surname.to_string()),
                            name: Some(name.to_string()),
                            second_name: None,
                            birthday: Some(birthday.to_string()),
                        })
                        .collect(),
                )),
            }),
        })
    }

    /// `(id, visit start literal, room)`
    pub fn slots(items: &[(&str, &str, &str)]) -> MisResult<AppointmentListPayload> {
        MisResult::Success(AppointmentListPayload {
            list: Some(AppointmentContainer {
                items: Some(OneOrMany::Many(
                    items
                        .iter()
                        .map(|(id, start, room)| RawAppointment {
                            id_appointment: Some(id.to_string()),
                            visit_start: Some(start.to_string()),
                            visit_end: None,
                            address: Some("ул. Ленина, 1".to_string()),
                            num: Some(id.to_string()),
                            room: Some(room.to_string()),
                        })
                        .collect(),
                )),
            }),
        })
    }

    /// Hub JSON envelope as served over HTTP, for wiremock-backed tests.
    pub fn envelope(operation: &str, payload: Value) -> Value {
        let mut inner = json!({ "Success": true });
        if let (Some(target), Value::Object(fields)) = (inner.as_object_mut(), payload) {
            target.extend(fields);
        }
        json!({ format!("{}Result", operation): inner })
    }

    pub fn error_envelope(operation: &str, descriptions: &[&str]) -> Value {
        let errors: Vec<Value> = descriptions
            .iter()
            .enumerate()
            .map(|(i, d)| json!({ "IdError": i + 1, "ErrorDescription": d }))
            .collect();
        json!({ format!("{}Result", operation): {
            "Success": false,
            "ErrorList": { "Error": errors }
        }})
    }
}
