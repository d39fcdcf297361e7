//! Black-box HTTP load-generation and check harness.
//!
//! A scenario file describes one endpoint, a number of virtual users and a
//! duration; each virtual user loops {build request → send → evaluate
//! checks → pace} until the deadline, and the run ends with an aggregate
//! report of per-check pass rates and latency statistics.

pub mod checks;
pub mod client;
pub mod executor;
pub mod models;
pub mod utils;
