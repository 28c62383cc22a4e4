use std::env;
use std::time::Duration;
use tracing::warn;

pub const DEFAULT_MIS_ENDPOINT_URL: &str = "http://localhost:8081/HubService2.svc/json";
pub const DEFAULT_MIS_TOKEN_URL: &str = "http://localhost:8081/token";
pub const DEFAULT_MIS_GUID: &str = "00000000-0000-0000-0000-000000000000";
pub const DEFAULT_LPU_ID: &str = "1";
pub const DEFAULT_MIS_TIMEOUT_SECONDS: u64 = 30;
pub const DEFAULT_PORT: u16 = 3000;

/// Process-wide configuration, read once at startup and never mutated.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub mis_endpoint_url: String,
    pub mis_token_url: String,
    pub mis_guid: String,
    pub default_lpu_id: String,
    pub mis_timeout_seconds: u64,
    pub port: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            mis_endpoint_url: DEFAULT_MIS_ENDPOINT_URL.to_string(),
            mis_token_url: DEFAULT_MIS_TOKEN_URL.to_string(),
            mis_guid: DEFAULT_MIS_GUID.to_string(),
            default_lpu_id: DEFAULT_LPU_ID.to_string(),
            mis_timeout_seconds: DEFAULT_MIS_TIMEOUT_SECONDS,
            port: DEFAULT_PORT,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            mis_endpoint_url: env::var("MIS_ENDPOINT_URL")
                .unwrap_or_else(|_| {
                    warn!("MIS_ENDPOINT_URL not set, using default");
                    DEFAULT_MIS_ENDPOINT_URL.to_string()
                }),
            mis_token_url: env::var("MIS_TOKEN_URL")
                .unwrap_or_else(|_| {
                    warn!("MIS_TOKEN_URL not set, using default");
                    DEFAULT_MIS_TOKEN_URL.to_string()
                }),
            mis_guid: env::var("MIS_GUID")
                .unwrap_or_else(|_| {
                    warn!("MIS_GUID not set, using placeholder GUID");
                    DEFAULT_MIS_GUID.to_string()
                }),
            default_lpu_id: env::var("MIS_DEFAULT_LPU_ID")
                .unwrap_or_else(|_| {
                    warn!("MIS_DEFAULT_LPU_ID not set, using default");
                    DEFAULT_LPU_ID.to_string()
                }),
            mis_timeout_seconds: parse_timeout_seconds(env::var("MIS_TIMEOUT_SECONDS").ok()),
            port: parse_or_default("PORT", DEFAULT_PORT),
        };

        if !config.is_configured() {
            warn!("MIS gateway not fully configured - requests will use placeholder credentials");
        }

        config
    }

    /// True when the endpoint and a real authorization GUID are present.
    pub fn is_configured(&self) -> bool {
        !self.mis_endpoint_url.is_empty()
            && !self.mis_guid.is_empty()
            && self.mis_guid != DEFAULT_MIS_GUID
    }

    pub fn mis_timeout(&self) -> Duration {
        Duration::from_secs(self.mis_timeout_seconds)
    }
}

fn parse_or_default<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + std::fmt::Display + Copy,
{
    parse_value(key, env::var(key).ok(), default)
}

fn parse_value<T>(key: &str, raw: Option<String>, default: T) -> T
where
    T: std::str::FromStr + std::fmt::Display + Copy,
{
    match raw {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("{} has invalid value '{}', using {}", key, raw, default);
            default
        }),
        None => default,
    }
}

/// A zero timeout would fail every MIS call immediately.
fn parse_timeout_seconds(raw: Option<String>) -> u64 {
    match parse_value("MIS_TIMEOUT_SECONDS", raw, DEFAULT_MIS_TIMEOUT_SECONDS) {
        0 => {
            warn!(
                "MIS_TIMEOUT_SECONDS must be positive, using {}",
                DEFAULT_MIS_TIMEOUT_SECONDS
            );
            DEFAULT_MIS_TIMEOUT_SECONDS
        }
        seconds => seconds,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_not_configured() {
        let config = AppConfig::default();
        assert_eq!(config.default_lpu_id, "1");
        assert_eq!(config.mis_timeout(), Duration::from_secs(30));
        assert!(!config.is_configured());
    }

    #[test]
    fn test_real_guid_marks_config_as_configured() {
        let config = AppConfig {
            mis_guid: "3f2c7a1e-9b8d-4c6e-a1f0-5d4b3c2a1908".to_string(),
            ..AppConfig::default()
        };
        assert!(config.is_configured());
    }

    #[test]
    fn test_zero_timeout_falls_back_to_default() {
        assert_eq!(parse_timeout_seconds(Some("0".to_string())), DEFAULT_MIS_TIMEOUT_SECONDS);
        assert_eq!(parse_timeout_seconds(Some(" 0 ".to_string())), DEFAULT_MIS_TIMEOUT_SECONDS);
    }

    #[test]
    fn test_timeout_parsing() {
        assert_eq!(parse_timeout_seconds(Some("5".to_string())), 5);
        assert_eq!(parse_timeout_seconds(Some("-1".to_string())), DEFAULT_MIS_TIMEOUT_SECONDS);
        assert_eq!(parse_timeout_seconds(Some("soon".to_string())), DEFAULT_MIS_TIMEOUT_SECONDS);
        assert_eq!(parse_timeout_seconds(None), DEFAULT_MIS_TIMEOUT_SECONDS);
    }
}
