use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use serde::Deserialize;

use shared_mis::models::DEFAULT_SLOT_WINDOW_DAYS;
use shared_mis::{DateRange, ValidationError};

/// Optional `from`/`to` calendar days (`YYYY-MM-DD`) of `GET /api/slots/{specialty}`.
/// `to` is inclusive.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SlotQuery {
    pub from: Option<String>,
    pub to: Option<String>,
}

impl SlotQuery {
    /// `None` when neither bound is given, leaving the default window to the caller.
    pub fn into_range(self, now: DateTime<Utc>) -> Result<Option<DateRange>, ValidationError> {
        let from = self.from.as_deref().map(str::trim).filter(|v| !v.is_empty());
        let to = self.to.as_deref().map(str::trim).filter(|v| !v.is_empty());

        match (from, to) {
            (None, None) => Ok(None),
            (Some(from), None) => {
                let start = start_of_day(from)?;
                DateRange::new(start, start + Duration::days(DEFAULT_SLOT_WINDOW_DAYS)).map(Some)
            }
            (None, Some(to)) => {
                let end = start_of_day(to)? + Duration::days(1);
                DateRange::new(DateRange::upcoming(now).start, end).map(Some)
            }
            (Some(from), Some(to)) => {
                DateRange::new(start_of_day(from)?, start_of_day(to)? + Duration::days(1)).map(Some)
            }
        }
    }
}

fn start_of_day(raw: &str) -> Result<DateTime<Utc>, ValidationError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| Utc.from_utc_datetime(&midnight))
        .ok_or_else(|| ValidationError::new(format!("Некорректная дата: {}", raw)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(from: Option<&str>, to: Option<&str>) -> SlotQuery {
        SlotQuery {
            from: from.map(String::from),
            to: to.map(String::from),
        }
    }

    fn day(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_no_bounds_means_default_window() {
        assert_eq!(query(None, Some("")).into_range(Utc::now()).unwrap(), None);
    }

    #[test]
    fn test_both_bounds_make_inclusive_range() {
        let range = query(Some("2024-03-01"), Some("2024-03-03"))
            .into_range(Utc::now())
            .unwrap()
            .unwrap();

        assert_eq!(range.start, day(2024, 3, 1));
        assert_eq!(range.end, day(2024, 3, 4));
    }

    #[test]
    fn test_from_only_spans_default_window() {
        let range = query(Some("2024-03-01"), None).into_range(Utc::now()).unwrap().unwrap();
        assert_eq!(range.end, day(2024, 3, 15));
    }

    #[test]
    fn test_to_only_starts_today() {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 15, 30, 0).unwrap();
        let range = query(None, Some("2024-03-05")).into_range(now).unwrap().unwrap();

        assert_eq!(range.start, day(2024, 3, 1));
        assert_eq!(range.end, day(2024, 3, 6));
    }

    #[test]
    fn test_invalid_bounds_are_rejected() {
        assert!(query(Some("01.03.2024"), None).into_range(Utc::now()).is_err());
        assert!(query(Some("2024-03-05"), Some("2024-03-01")).into_range(Utc::now()).is_err());
    }
}
