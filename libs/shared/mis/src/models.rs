use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Default look-ahead when a slot query carries no explicit range.
pub const DEFAULT_SLOT_WINDOW_DAYS: i64 = 14;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct District {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Specialty {
    pub id: String,
    pub name: String,
    pub slug: String,
}

impl Specialty {
    /// Matches either the routing slug or the raw MIS identifier.
    pub fn matches(&self, identifier: &str) -> bool {
        let identifier = identifier.trim();
        self.id == identifier || self.slug.eq_ignore_ascii_case(identifier)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Doctor {
    pub id: String,
    pub full_name: String,
    pub specialty_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub id: String,
    pub last_name: String,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub birth_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentSlot {
    pub id: String,
    pub datetime: DateTime<Utc>,
    pub specialty: Option<String>,
    pub doctor_name: Option<String>,
    pub address: String,
    pub cabinet: String,
    pub ticket_number: String,
}

/// Context attached to every slot produced by one `get_free_slots` call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlotContext {
    pub specialty: Option<String>,
    pub doctor_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatientSearchCriteria {
    pub last_name: String,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub birth_date: DateTime<Utc>,
}

impl PatientSearchCriteria {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut missing = Vec::new();
        if self.last_name.trim().is_empty() {
            missing.push("lastName");
        }
        if self.first_name.trim().is_empty() {
            missing.push("firstName");
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::new(format!(
                "Не заполнены обязательные поля: {}",
                missing.join(", ")
            )))
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, ValidationError> {
        if end <= start {
            return Err(ValidationError::new("Конец периода должен быть позже начала"));
        }
        Ok(Self { start, end })
    }

    /// `[midnight of now's day, +DEFAULT_SLOT_WINDOW_DAYS days)`.
    pub fn upcoming(now: DateTime<Utc>) -> Self {
        let start = now
            .date_naive()
            .and_hms_opt(0, 0, 0)
            .map(|midnight| Utc.from_utc_datetime(&midnight))
            .unwrap_or(now);
        Self {
            start,
            end: start + Duration::days(DEFAULT_SLOT_WINDOW_DAYS),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotTarget {
    Doctor(String),
    Specialty(String),
}

impl SlotTarget {
    pub fn id(&self) -> &str {
        match self {
            SlotTarget::Doctor(id) | SlotTarget::Specialty(id) => id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_criteria_requires_names() {
        let criteria = PatientSearchCriteria {
            last_name: "Ivanov".to_string(),
            first_name: "  ".to_string(),
            middle_name: None,
            birth_date: Utc::now(),
        };
        let err = criteria.validate().unwrap_err();
        assert!(err.0.contains("firstName"));
        assert!(!err.0.contains("lastName"));
    }

    #[test]
    fn test_upcoming_range_starts_at_midnight() {
        let now = Utc.with_ymd_and_hms(2024, 3, 10, 15, 45, 0).unwrap();
        let range = DateRange::upcoming(now);
        assert_eq!(range.start, Utc.with_ymd_and_hms(2024, 3, 10, 0, 0, 0).unwrap());
        assert_eq!(range.end, Utc.with_ymd_and_hms(2024, 3, 24, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_inverted_range_is_rejected() {
        let now = Utc::now();
        assert!(DateRange::new(now, now - Duration::days(1)).is_err());
    }

    #[test]
    fn test_specialty_matches_slug_or_id() {
        let specialty = Specialty {
            id: "12".to_string(),
            name: "Терапевт".to_string(),
            slug: "terapevt".to_string(),
        };
        assert!(specialty.matches("12"));
        assert!(specialty.matches("Terapevt"));
        assert!(!specialty.matches("khirurg"));
    }
}
