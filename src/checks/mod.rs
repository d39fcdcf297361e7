use serde::Deserialize;

/// What a single request produced, as seen by the checks. A network-level
/// failure (refused connection, timeout) yields `status: None` and an empty
/// body, so status and field checks fail naturally.
#[derive(Debug, Clone)]
pub struct ResponseRecord {
    pub status: Option<u16>,
    pub body: Vec<u8>,
    pub elapsed_ms: f64,
}

/// A named boolean predicate over one response. Checks never short-circuit:
/// every check of a scenario is evaluated on every iteration.
#[derive(Debug, Deserialize, Clone)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Check {
    StatusIs { expected: u16 },
    JsonFieldPresent { field: String },
    DurationUnder { threshold_ms: u64 },
}

impl Check {
    /// Stable name used as the aggregation key in the report.
    pub fn name(&self) -> String {
        match self {
            Check::StatusIs { expected } => format!("status is {}", expected),
            Check::JsonFieldPresent { field } => format!("response has {}", field),
            Check::DurationUnder { threshold_ms } => {
                format!("response time < {}ms", threshold_ms)
            }
        }
    }

    pub fn evaluate(&self, record: &ResponseRecord) -> bool {
        match self {
            Check::StatusIs { expected } => record.status == Some(*expected),
            Check::JsonFieldPresent { field } => {
                match serde_json::from_slice::<serde_json::Value>(&record.body) {
                    // A present-but-null field still counts: the key exists.
                    Ok(value) => value.get(field).is_some(),
                    Err(_) => false,
                }
            }
            Check::DurationUnder { threshold_ms } => {
                record.elapsed_ms < *threshold_ms as f64
            }
        }
    }
}

/// Evaluate every check against one response, in declaration order.
pub fn evaluate_all(checks: &[Check], record: &ResponseRecord) -> Vec<(String, bool)> {
    checks
        .iter()
        .map(|check| (check.name(), check.evaluate(record)))
        .collect()
}
