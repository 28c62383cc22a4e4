//! Raw hub-service shapes as they arrive on the wire.
//!
//! Field names follow the hub service verbatim (including its `Spesiality`
//! and `Avaible` spellings). Nothing here is interpreted; the mapper turns
//! these into domain objects.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::GatewayError;
use crate::mapper::aggregate_errors;

/// Reserved error code for failures synthesized by the client itself
/// (network, timeout, HTTP status, unparseable body).
pub const TRANSPORT_ERROR_CODE: &str = "transport";

/// Code used when the hub reports `Success: false` without any error entries.
pub const UNSPECIFIED_ERROR_CODE: &str = "unspecified";

// ==============================================================================
// RESULT SHAPE
// ==============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MisError {
    pub code: String,
    pub description: String,
}

impl MisError {
    pub fn new(code: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            description: description.into(),
        }
    }

    pub fn transport(description: impl Into<String>) -> Self {
        Self::new(TRANSPORT_ERROR_CODE, description)
    }

    pub fn is_transport(&self) -> bool {
        self.code == TRANSPORT_ERROR_CODE
    }
}

/// Outcome of exactly one MIS call.
#[derive(Debug, Clone, PartialEq)]
pub enum MisResult<T> {
    Success(T),
    Failure(Vec<MisError>),
}

impl<T> MisResult<T> {
    pub fn transport_failure(description: impl Into<String>) -> Self {
        MisResult::Failure(vec![MisError::transport(description)])
    }

    pub fn is_success(&self) -> bool {
        matches!(self, MisResult::Success(_))
    }

    pub fn errors(&self) -> &[MisError] {
        match self {
            MisResult::Success(_) => &[],
            MisResult::Failure(errors) => errors,
        }
    }

    /// Converts a failure into a [`GatewayError`]. Any synthesized transport
    /// entry makes the whole failure a transport error.
    pub fn into_gateway_result(self, operation: &'static str) -> Result<T, GatewayError> {
        match self {
            MisResult::Success(payload) => Ok(payload),
            MisResult::Failure(errors) => {
                let message = aggregate_errors(&errors);
                if errors.iter().any(MisError::is_transport) {
                    Err(GatewayError::Transport { operation, message })
                } else {
                    Err(GatewayError::Business(message))
                }
            }
        }
    }
}

// ==============================================================================
// SINGULAR-OR-ARRAY FIELDS
// ==============================================================================

/// A field the hub emits as a bare object when there is exactly one element
/// and as an array otherwise.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::Many(items) => items,
            OneOrMany::One(item) => vec![item],
        }
    }
}

impl<T> Default for OneOrMany<T> {
    fn default() -> Self {
        OneOrMany::Many(Vec::new())
    }
}

/// The single normalization point: absent, null, one object or an array all
/// become an ordered list.
pub fn normalize<T>(field: Option<OneOrMany<T>>) -> Vec<T> {
    field.map(OneOrMany::into_vec).unwrap_or_default()
}

/// Identifiers come back as strings or numbers depending on the binding.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

// ==============================================================================
// ENVELOPE
// ==============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawErrorEntry {
    #[serde(rename = "IdError", default, deserialize_with = "lenient_string")]
    pub id_error: Option<String>,
    #[serde(rename = "ErrorDescription", default)]
    pub error_description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawErrorList {
    #[serde(rename = "Error", default)]
    pub errors: Option<OneOrMany<RawErrorEntry>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawEnvelope<T> {
    #[serde(rename = "Success", default)]
    pub success: bool,
    #[serde(rename = "ErrorList", default)]
    pub error_list: Option<RawErrorList>,
    #[serde(flatten)]
    pub payload: T,
}

impl<T> RawEnvelope<T> {
    pub fn into_result(self) -> MisResult<T> {
        if self.success {
            return MisResult::Success(self.payload);
        }

        let mut errors: Vec<MisError> = normalize(self.error_list.and_then(|list| list.errors))
            .into_iter()
            .map(|entry| {
                MisError::new(
                    entry.id_error.unwrap_or_else(|| UNSPECIFIED_ERROR_CODE.to_string()),
                    entry.error_description.unwrap_or_default(),
                )
            })
            .collect();

        if errors.is_empty() {
            errors.push(MisError::new(
                UNSPECIFIED_ERROR_CODE,
                "МИС сообщила об ошибке без описания",
            ));
        }

        MisResult::Failure(errors)
    }
}

// ==============================================================================
// PAYLOADS
// ==============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawDistrict {
    #[serde(rename = "IdDistrict", default, deserialize_with = "lenient_string")]
    pub id_district: Option<String>,
    #[serde(rename = "DistrictName", default)]
    pub district_name: Option<String>,
    #[serde(rename = "Okato", default, deserialize_with = "lenient_string")]
    pub okato: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DistrictContainer {
    #[serde(rename = "District", default)]
    pub items: Option<OneOrMany<RawDistrict>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DistrictListPayload {
    #[serde(rename = "ListDistrict", default)]
    pub list: Option<DistrictContainer>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSpeciality {
    #[serde(rename = "IdSpesiality", default, deserialize_with = "lenient_string")]
    pub id_spesiality: Option<String>,
    #[serde(rename = "NameSpesiality", default)]
    pub name_spesiality: Option<String>,
    #[serde(rename = "FerIdSpesiality", default, deserialize_with = "lenient_string")]
    pub fer_id_spesiality: Option<String>,
    #[serde(rename = "CountFreeTicket", default)]
    pub count_free_ticket: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SpecialityContainer {
    #[serde(rename = "Spesiality", default)]
    pub items: Option<OneOrMany<RawSpeciality>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SpecialityListPayload {
    #[serde(rename = "ListSpesiality", default)]
    pub list: Option<SpecialityContainer>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawDoctor {
    #[serde(rename = "IdDoc", default, deserialize_with = "lenient_string")]
    pub id_doc: Option<String>,
    #[serde(rename = "Name", default)]
    pub name: Option<String>,
    #[serde(rename = "Snils", default)]
    pub snils: Option<String>,
    #[serde(rename = "CountFreeTicket", default)]
    pub count_free_ticket: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DoctorContainer {
    #[serde(rename = "Doctor", default)]
    pub items: Option<OneOrMany<RawDoctor>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DoctorListPayload {
    #[serde(rename = "Docs", default)]
    pub list: Option<DoctorContainer>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPatient {
    #[serde(rename = "IdPat", default, deserialize_with = "lenient_string")]
    pub id_pat: Option<String>,
    #[serde(rename = "Surname", default)]
    pub surname: Option<String>,
    #[serde(rename = "Name", default)]
    pub name: Option<String>,
    #[serde(rename = "SecondName", default)]
    pub second_name: Option<String>,
    #[serde(rename = "Birthday", default)]
    pub birthday: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PatientContainer {
    #[serde(rename = "Patient", default)]
    pub items: Option<OneOrMany<RawPatient>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PatientListPayload {
    #[serde(rename = "ListPatient", default)]
    pub list: Option<PatientContainer>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawAppointment {
    #[serde(rename = "IdAppointment", default, deserialize_with = "lenient_string")]
    pub id_appointment: Option<String>,
    #[serde(rename = "VisitStart", default)]
    pub visit_start: Option<String>,
    #[serde(rename = "VisitEnd", default)]
    pub visit_end: Option<String>,
    #[serde(rename = "Address", default)]
    pub address: Option<String>,
    #[serde(rename = "Num", default, deserialize_with = "lenient_string")]
    pub num: Option<String>,
    #[serde(rename = "Room", default, deserialize_with = "lenient_string")]
    pub room: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppointmentContainer {
    #[serde(rename = "Appointment", default)]
    pub items: Option<OneOrMany<RawAppointment>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppointmentListPayload {
    #[serde(rename = "ListAppointments", default)]
    pub list: Option<AppointmentContainer>,
}
