use async_trait::async_trait;
use chrono::Utc;
use reqwest::{header::CONTENT_TYPE, Client};
use serde::de::DeserializeOwned;
use serde_json::{json, Map, Value};
use tracing::{debug, error, warn};
use uuid::Uuid;

use shared_config::AppConfig;

use crate::date_codec;
use crate::error::ValidationError;
use crate::models::{DateRange, PatientSearchCriteria, SlotTarget};
use crate::wire::{
    AppointmentListPayload, DistrictListPayload, DoctorListPayload, MisResult,
    PatientListPayload, RawEnvelope, SpecialityListPayload,
};

pub const OP_GET_DISTRICT_LIST: &str = "GetDistrictList";
pub const OP_GET_SPECIALITY_LIST: &str = "GetSpesialityList";
pub const OP_GET_DOCTOR_LIST: &str = "GetDoctorList";
pub const OP_SEARCH_PATIENT: &str = "SearchTop10Patient";
pub const OP_GET_FREE_SLOTS: &str = "GetAvaibleAppointments";

const MIS_UNAVAILABLE: &str = "Сервис МИС недоступен";
const MIS_TIMEOUT: &str = "Превышено время ожидания ответа МИС";
const MIS_MALFORMED: &str = "МИС вернула некорректный ответ";

/// Operations offered by the clinic hub service.
///
/// The outer `Err` is reserved for caller input that fails a precondition and
/// is returned before any network I/O. Everything that goes wrong on the wire
/// is reported inside [`MisResult::Failure`].
#[async_trait]
pub trait MisTransport: Send + Sync {
    async fn get_district_list(&self) -> Result<MisResult<DistrictListPayload>, ValidationError>;

    async fn get_speciality_list(
        &self,
        lpu_id: &str,
    ) -> Result<MisResult<SpecialityListPayload>, ValidationError>;

    async fn get_doctor_list(
        &self,
        lpu_id: &str,
        specialty_id: &str,
    ) -> Result<MisResult<DoctorListPayload>, ValidationError>;

    async fn search_patient(
        &self,
        criteria: &PatientSearchCriteria,
    ) -> Result<MisResult<PatientListPayload>, ValidationError>;

    async fn get_free_slots(
        &self,
        target: &SlotTarget,
        range: Option<DateRange>,
    ) -> Result<MisResult<AppointmentListPayload>, ValidationError>;
}

/// reqwest-backed client for the hub service's JSON binding.
///
/// Every request is bounded by the configured timeout. Dropping the returned
/// future (e.g. when the inbound HTTP request is aborted) abandons the call
/// locally, but the hub may still complete it.
pub struct MisClient {
    client: Client,
    base_url: String,
    guid: String,
    default_lpu_id: String,
}

impl MisClient {
    pub fn new(config: &AppConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(config.mis_timeout())
            .connect_timeout(config.mis_timeout())
            .build()?;

        Ok(Self {
            client,
            base_url: config.mis_endpoint_url.trim_end_matches('/').to_string(),
            guid: config.mis_guid.clone(),
            default_lpu_id: config.default_lpu_id.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn call<T>(&self, operation: &'static str, params: Map<String, Value>) -> MisResult<T>
    where
        T: DeserializeOwned,
    {
        let history_id = Uuid::new_v4().to_string();
        let mut body = params;
        body.insert("guid".to_string(), json!(self.guid));
        body.insert("idHistory".to_string(), json!(history_id));

        let url = format!("{}/{}", self.base_url, operation);
        debug!(operation, history_id = %history_id, "Calling MIS");

        let payload = date_codec::escape_for_wire(&Value::Object(body).to_string());

        let response = match self
            .client
            .post(&url)
            .header(CONTENT_TYPE, "application/json; charset=utf-8")
            .body(payload)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                let timed_out = e.is_timeout();
                error!(operation, history_id = %history_id, timed_out, "MIS request failed: {}", e.without_url());
                return MisResult::transport_failure(if timed_out { MIS_TIMEOUT } else { MIS_UNAVAILABLE });
            }
        };

        let status = response.status();
        let text = match response.text().await {
            Ok(text) => text,
            Err(e) => {
                let timed_out = e.is_timeout();
                error!(operation, history_id = %history_id, timed_out, "Failed to read MIS response: {}", e.without_url());
                return MisResult::transport_failure(if timed_out { MIS_TIMEOUT } else { MIS_UNAVAILABLE });
            }
        };

        if !status.is_success() {
            error!(operation, history_id = %history_id, status = %status, "MIS responded with error status: {}", text);
            return MisResult::transport_failure(format!("МИС вернула ошибку HTTP {}", status.as_u16()));
        }

        let result = parse_envelope(operation, &text);
        if let MisResult::Failure(errors) = &result {
            warn!(operation, history_id = %history_id, ?errors, "MIS reported failure");
        }
        result
    }

    fn lpu_params(lpu_id: &str) -> Map<String, Value> {
        let mut params = Map::new();
        params.insert("idLpu".to_string(), json!(lpu_id));
        params
    }
}

/// Parses `{"<Operation>Result": {...}}` (or an unwrapped envelope) into a
/// [`MisResult`]. An unparseable body becomes a transport failure.
pub fn parse_envelope<T>(operation: &str, body: &str) -> MisResult<T>
where
    T: DeserializeOwned,
{
    let mut value: Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(e) => {
            error!(operation, "MIS response is not valid JSON: {}", e);
            return MisResult::transport_failure(MIS_MALFORMED);
        }
    };

    let result_key = format!("{}Result", operation);
    let inner = match value.get_mut(&result_key) {
        Some(inner) => inner.take(),
        None => value,
    };

    if !inner.is_object() {
        error!(operation, "MIS response envelope is not an object");
        return MisResult::transport_failure(MIS_MALFORMED);
    }

    match serde_json::from_value::<RawEnvelope<T>>(inner) {
        Ok(envelope) => envelope.into_result(),
        Err(e) => {
            error!(operation, "MIS response envelope has unexpected shape: {}", e);
            MisResult::transport_failure(MIS_MALFORMED)
        }
    }
}

fn require(value: &str, message: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::new(message))
    } else {
        Ok(())
    }
}

#[async_trait]
impl MisTransport for MisClient {
    async fn get_district_list(&self) -> Result<MisResult<DistrictListPayload>, ValidationError> {
        Ok(self.call(OP_GET_DISTRICT_LIST, Map::new()).await)
    }

    async fn get_speciality_list(
        &self,
        lpu_id: &str,
    ) -> Result<MisResult<SpecialityListPayload>, ValidationError> {
        require(lpu_id, "ID ЛПУ не указан")?;

        Ok(self.call(OP_GET_SPECIALITY_LIST, Self::lpu_params(lpu_id)).await)
    }

    async fn get_doctor_list(
        &self,
        lpu_id: &str,
        specialty_id: &str,
    ) -> Result<MisResult<DoctorListPayload>, ValidationError> {
        require(lpu_id, "ID ЛПУ не указан")?;
        require(specialty_id, "ID специальности не указан")?;

        let mut params = Self::lpu_params(lpu_id);
        params.insert("idSpesiality".to_string(), json!(specialty_id));

        Ok(self.call(OP_GET_DOCTOR_LIST, params).await)
    }

    async fn search_patient(
        &self,
        criteria: &PatientSearchCriteria,
    ) -> Result<MisResult<PatientListPayload>, ValidationError> {
        criteria.validate()?;

        let mut params = Self::lpu_params(&self.default_lpu_id);
        params.insert(
            "pat".to_string(),
            json!({
                "Surname": criteria.last_name.trim(),
                "Name": criteria.first_name.trim(),
                "SecondName": criteria.middle_name.as_deref().map(str::trim),
                "Birthday": date_codec::encode(criteria.birth_date),
            }),
        );

        Ok(self.call(OP_SEARCH_PATIENT, params).await)
    }

    async fn get_free_slots(
        &self,
        target: &SlotTarget,
        range: Option<DateRange>,
    ) -> Result<MisResult<AppointmentListPayload>, ValidationError> {
        let range = range.unwrap_or_else(|| DateRange::upcoming(Utc::now()));

        let mut params = Self::lpu_params(&self.default_lpu_id);
        match target {
            SlotTarget::Doctor(id) => {
                require(id, "ID врача не указан")?;
                params.insert("idDoc".to_string(), json!(id));
            }
            SlotTarget::Specialty(id) => {
                require(id, "ID специальности не указан")?;
                params.insert("idSpesiality".to_string(), json!(id));
            }
        }
        params.insert("visitStart".to_string(), json!(date_codec::encode(range.start)));
        params.insert("visitEnd".to_string(), json!(date_codec::encode(range.end)));

        Ok(self.call(OP_GET_FREE_SLOTS, params).await)
    }
}
