use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::Deserialize;

use shared_mis::{date_codec, PatientSearchCriteria, ValidationError};
use shared_utils::extractor::non_blank;

/// Body of `POST /api/patients`. Every field is optional on the wire so that
/// missing values surface as a validation message rather than a decode error.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientSearchRequest {
    pub last_name: Option<String>,
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub birth_date: Option<String>,
}

impl PatientSearchRequest {
    pub fn into_criteria(self) -> Result<PatientSearchCriteria, ValidationError> {
        let last_name = non_blank(self.last_name);
        let first_name = non_blank(self.first_name);
        let birth_date = non_blank(self.birth_date);

        let missing: Vec<&str> = [
            ("lastName", last_name.is_none()),
            ("firstName", first_name.is_none()),
            ("birthDate", birth_date.is_none()),
        ]
        .into_iter()
        .filter_map(|(field, absent)| absent.then_some(field))
        .collect();

        match (last_name, first_name, birth_date) {
            (Some(last_name), Some(first_name), Some(birth_date)) => Ok(PatientSearchCriteria {
                last_name,
                first_name,
                middle_name: non_blank(self.middle_name),
                birth_date: parse_birth_date(&birth_date)?,
            }),
            _ => Err(ValidationError::new(format!(
                "Не заполнены обязательные поля: {}",
                missing.join(", ")
            ))),
        }
    }
}

/// Accepts `YYYY-MM-DD`, RFC 3339 or a `/Date(...)/` literal.
pub fn parse_birth_date(raw: &str) -> Result<DateTime<Utc>, ValidationError> {
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(Utc.from_utc_datetime(&midnight));
        }
    }

    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Ok(instant.with_timezone(&Utc));
    }

    date_codec::parse(raw)
        .map_err(|_| ValidationError::new(format!("Некорректная дата рождения: {}", raw)))
}
