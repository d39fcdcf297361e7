use std::collections::HashMap;

/// Pass/fail tally for one named check, across all VUs and iterations.
#[derive(Debug, Default, Clone, Copy)]
pub struct CheckCounter {
    pub passes: u64,
    pub fails: u64,
}

impl CheckCounter {
    pub fn total(&self) -> u64 {
        self.passes + self.fails
    }

    pub fn pass_rate(&self) -> f64 {
        if self.total() == 0 {
            0.0
        } else {
            self.passes as f64 / self.total() as f64 * 100.0
        }
    }
}

#[derive(Debug, Default)]
pub struct Metrics {
    pub target_url: String,
    pub http_method: String,
    pub duration_secs: u64,
    pub vus: u64,

    pub total_iterations: u64,
    pub successful_requests: u64,
    pub failed_requests: u64,

    pub fastest_response: f64,
    pub slowest_response: f64,
    pub median_response_time: f64,
    pub p90_response_time: f64,
    pub p95_response_time: f64,

    pub throughput: f64,

    pub timestamp: String,

    /// Numeric statuses plus REQUEST_ERROR / TIMEOUT buckets.
    pub status_counts: HashMap<String, u64>,
    pub check_counts: HashMap<String, CheckCounter>,
}

impl Metrics {
    pub fn record_status(&mut self, status_key: String) {
        *self.status_counts.entry(status_key).or_insert(0) += 1;
    }

    pub fn record_check(&mut self, name: String, passed: bool) {
        let counter = self.check_counts.entry(name).or_default();
        if passed {
            counter.passes += 1;
        } else {
            counter.fails += 1;
        }
    }

    pub fn observe_latency(&mut self, elapsed_ms: f64) {
        if elapsed_ms < self.fastest_response {
            self.fastest_response = elapsed_ms;
        }
        if elapsed_ms > self.slowest_response {
            self.slowest_response = elapsed_ms;
        }
    }
}

pub fn calculate_median(data: &[f64]) -> f64 {
    let mut sorted = data.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let len = sorted.len();
    if len == 0 {
        return 0.0;
    }
    if len % 2 == 0 {
        (sorted[len / 2 - 1] + sorted[len / 2]) / 2.0
    } else {
        sorted[len / 2]
    }
}

/// Nearest-rank percentile. Out-of-range `p` clamps: anything at or below
/// 0 yields the minimum sample, anything above 100 the maximum.
pub fn calculate_percentile(data: &[f64], p: f64) -> f64 {
    let mut sorted = data.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    if sorted.is_empty() {
        return 0.0;
    }
    let rank = ((p / 100.0) * sorted.len() as f64).ceil() as usize;
    sorted[rank.clamp(1, sorted.len()) - 1]
}
