//! Codec for the hub service's `/Date(<epoch-millis>[±HHMM])/` literals.

use std::sync::OnceLock;

use chrono::{DateTime, TimeZone, Utc};
use regex::Regex;
use tracing::warn;

use crate::error::DateCodecError;

fn mis_date_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^/Date\((-?\d+)([+-]\d{4})?\)/$").expect("MIS date pattern is a valid regex")
    })
}

/// Strictly parses a MIS date literal.
///
/// The millisecond value is an absolute Unix instant. The optional `±HHMM`
/// suffix is matched but not applied.
pub fn parse(raw: &str) -> Result<DateTime<Utc>, DateCodecError> {
    let captures = mis_date_pattern()
        .captures(raw.trim())
        .ok_or_else(|| DateCodecError::Malformed(raw.to_string()))?;

    let millis: i64 = captures[1]
        .parse()
        .map_err(|_| DateCodecError::OutOfRange(raw.to_string()))?;

    Utc.timestamp_millis_opt(millis)
        .single()
        .ok_or_else(|| DateCodecError::OutOfRange(raw.to_string()))
}

/// Lenient decode used by the response mapper. A malformed literal yields the
/// current time and a data-quality warning instead of an error.
pub fn decode(raw: &str) -> DateTime<Utc> {
    match parse(raw) {
        Ok(instant) => instant,
        Err(e) => {
            warn!(raw_value = raw, "Substituting current time for undecodable MIS date: {}", e);
            Utc::now()
        }
    }
}

pub fn encode(instant: DateTime<Utc>) -> String {
    format!("/Date({})/", instant.timestamp_millis())
}

/// The hub's JSON binding only recognises dates written as `"\/Date(...)\/"`.
/// serde_json never escapes `/`, so serialized request bodies are patched here.
pub fn escape_for_wire(serialized: &str) -> String {
    serialized
        .replace("\"/Date(", "\"\\/Date(")
        .replace(")/\"", ")\\/\"")
}
