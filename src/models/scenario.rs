use serde::Deserialize;
use std::collections::HashMap;

use crate::checks::Check;

fn default_pacing_ms() -> u64 {
    1000
}

/// A single load scenario, immutable for the run.
#[derive(Debug, Deserialize, Clone)]
pub struct ScenarioConfig {
    pub name: String,
    pub target: String,
    pub method: HttpMethod,
    /// Number of concurrent virtual users.
    pub vus: u64,
    /// Wall-clock run length in seconds.
    pub duration: u64,

    /// JSON request body, sent as application/json when present.
    #[serde(default)]
    pub body: Option<serde_json::Value>,

    #[serde(default)]
    pub headers: Option<HashMap<String, String>>,

    /// Sleep after each iteration. Pacing, not an error-recovery delay.
    #[serde(default = "default_pacing_ms")]
    pub pacing_ms: u64,

    /// Per-request timeout; 5000ms when absent.
    #[serde(default)]
    pub timeout_ms: Option<u64>,

    #[serde(default)]
    pub checks: Vec<Check>,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    GET,
    POST,
    PUT,
    DELETE,
    PATCH,
    HEAD,
    OPTIONS,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::Check;

    #[test]
    fn parses_full_scenario_file() {
        let raw = r#"{
            "name": "shorten",
            "target": "http://localhost:8000/api/urls/shorten",
            "method": "POST",
            "vus": 10,
            "duration": 30,
            "body": {"original_url": "https://example.com", "custom_code": ""},
            "checks": [
                {"type": "status_is", "expected": 201},
                {"type": "json_field_present", "field": "short_url"},
                {"type": "duration_under", "threshold_ms": 500}
            ]
        }"#;

        let config: ScenarioConfig = serde_json::from_str(raw).unwrap();
        assert_eq!(config.vus, 10);
        assert_eq!(config.duration, 30);
        assert_eq!(config.method, HttpMethod::POST);
        assert_eq!(config.checks.len(), 3);
        assert!(matches!(config.checks[0], Check::StatusIs { expected: 201 }));

        let body = config.body.unwrap();
        assert_eq!(body["original_url"], "https://example.com");
        assert_eq!(body["custom_code"], "");
    }

    #[test]
    fn pacing_defaults_to_one_second() {
        let raw = r#"{
            "name": "min",
            "target": "http://localhost:8000/",
            "method": "GET",
            "vus": 1,
            "duration": 5
        }"#;

        let config: ScenarioConfig = serde_json::from_str(raw).unwrap();
        assert_eq!(config.pacing_ms, 1000);
        assert!(config.timeout_ms.is_none());
        assert!(config.body.is_none());
        assert!(config.checks.is_empty());
    }
}
