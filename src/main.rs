use std::process::ExitCode;

use colored::*;

use loadcheck::executor::{print_summary, run_scenario};
use loadcheck::models::scenario::ScenarioConfig;
use loadcheck::utils::hardware::get_hardware_info;

const DEFAULT_SCENARIO: &str = "scenarios/shorten.json";

#[tokio::main]
async fn main() -> ExitCode {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_SCENARIO.to_string());

    let raw = match std::fs::read_to_string(&path) {
        Ok(raw) => raw,
        Err(e) => {
            eprintln!("{} {}: {}", "cannot read scenario".red().bold(), path, e);
            return ExitCode::FAILURE;
        }
    };

    let config: ScenarioConfig = match serde_json::from_str(&raw) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {}: {}", "invalid scenario".red().bold(), path, e);
            return ExitCode::FAILURE;
        }
    };

    let hw = get_hardware_info();
    println!(
        "{} {} cores, {} MiB total, {} MiB free",
        "worker capacity :".blue().bold(),
        hw.cpu_cores,
        hw.total_mem_mib,
        hw.free_mem_mib
    );
    println!(
        "{} {} ({} VUs, {}s, pacing {}ms)",
        "running scenario:".blue().bold(),
        config.name.bold(),
        config.vus,
        config.duration,
        config.pacing_ms
    );

    let metrics = run_scenario(config).await;
    print_summary(&metrics);

    ExitCode::SUCCESS
}
