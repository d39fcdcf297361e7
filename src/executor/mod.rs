use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use chrono::Local;
use colored::*;
use tokio::task;
use tokio::time::{sleep, timeout};

use crate::checks::{evaluate_all, ResponseRecord};
use crate::client::{build_client, send_request};
use crate::models::metrics::{calculate_median, calculate_percentile, Metrics};
use crate::models::scenario::ScenarioConfig;

/// Drive the scenario: `vus` independent iteration loops until the global
/// deadline, sharing only the client pool and the aggregate metrics.
pub async fn run_scenario(config: ScenarioConfig) -> Metrics {
    let client = Arc::new(build_client());
    let config = Arc::new(config);

    let metrics = Arc::new(Mutex::new(Metrics {
        fastest_response: f64::MAX,
        slowest_response: f64::MIN,
        ..Default::default()
    }));

    let response_times = Arc::new(Mutex::new(Vec::new()));
    let running = Arc::new(AtomicBool::new(true));
    let mut handles = Vec::new();

    let duration_secs = config.duration;
    let end_time = Instant::now() + Duration::from_secs(duration_secs);
    let max_request_duration = Duration::from_millis(config.timeout_ms.unwrap_or(5000));
    let pacing = Duration::from_millis(config.pacing_ms);

    for _ in 0..config.vus {
        let client = Arc::clone(&client);
        let config = Arc::clone(&config);
        let metrics = Arc::clone(&metrics);
        let response_times = Arc::clone(&response_times);
        let running = Arc::clone(&running);

        let handle = task::spawn(async move {
            while running.load(Ordering::Relaxed) && Instant::now() < end_time {
                let request_start = Instant::now();

                let result = timeout(max_request_duration, send_request(&client, &config)).await;

                let elapsed = request_start.elapsed().as_secs_f64() * 1000.0;

                {
                    let mut rt = response_times.lock().unwrap();
                    rt.push(elapsed);
                }

                let (record, status_key) = match result {
                    Ok(Ok((status, body))) => (
                        ResponseRecord {
                            status: Some(status.as_u16()),
                            body,
                            elapsed_ms: elapsed,
                        },
                        status.as_u16().to_string(),
                    ),
                    Ok(Err(_)) => (
                        ResponseRecord {
                            status: None,
                            body: Vec::new(),
                            elapsed_ms: elapsed,
                        },
                        "REQUEST_ERROR".to_string(),
                    ),
                    Err(_) => (
                        ResponseRecord {
                            status: None,
                            body: Vec::new(),
                            elapsed_ms: elapsed,
                        },
                        "TIMEOUT".to_string(),
                    ),
                };

                // All checks run on every iteration, pass or fail.
                let outcomes = evaluate_all(&config.checks, &record);
                let checks_failed = outcomes.iter().filter(|(_, pass)| !pass).count();

                {
                    let mut m = metrics.lock().unwrap();
                    m.total_iterations += 1;
                    if record.status.is_some() {
                        m.successful_requests += 1;
                    } else {
                        m.failed_requests += 1;
                    }
                    m.record_status(status_key.clone());
                    m.observe_latency(elapsed);
                    for (name, passed) in outcomes {
                        m.record_check(name, passed);
                    }
                }

                if record.status.is_some() && checks_failed == 0 {
                    println!(
                        "{} {} {} {}",
                        "status :".green().bold(),
                        status_key.bold(),
                        "| duration :".blue().bold(),
                        format!("{:.0}ms", elapsed).bold()
                    );
                } else {
                    eprintln!(
                        "{} {} {} {} {}",
                        "status :".red().bold(),
                        status_key.red().bold(),
                        "| duration :".blue().bold(),
                        format!("{:.0}ms", elapsed).bold(),
                        format!("| checks failed : {}", checks_failed).red().bold()
                    );
                }

                sleep(pacing).await;
            }
        });

        handles.push(handle);
    }

    sleep(Duration::from_secs(duration_secs)).await;
    running.store(false, Ordering::Relaxed);

    for handle in handles.iter() {
        handle.abort();
    }

    for handle in handles {
        let _ = handle.await;
    }

    let mut final_metrics = std::mem::take(&mut *metrics.lock().unwrap());
    let response_times = response_times.lock().unwrap();

    final_metrics.target_url = config.target.clone();
    final_metrics.http_method = format!("{:?}", config.method);
    final_metrics.duration_secs = config.duration;
    final_metrics.vus = config.vus;
    final_metrics.throughput = final_metrics.total_iterations as f64 / duration_secs as f64;
    final_metrics.median_response_time = calculate_median(&response_times);
    final_metrics.p90_response_time = calculate_percentile(&response_times, 90.0);
    final_metrics.p95_response_time = calculate_percentile(&response_times, 95.0);
    final_metrics.timestamp = Local::now().format("%Y/%m/%d %H:%M:%S").to_string();

    if final_metrics.total_iterations == 0 {
        final_metrics.fastest_response = 0.0;
        final_metrics.slowest_response = 0.0;
    }

    final_metrics
}

pub fn print_summary(metrics: &Metrics) {
    println!();
    println!("\x1b[1;97;44m🔥 ======== TEST RESULTS ======== 🔥\x1b[0m");
    println!("\x1b[1;94m⏰ Timestamp                : \x1b[0m\x1b[1;97m{}\x1b[0m", metrics.timestamp);
    println!("\x1b[1;94m🎯 Target                   : \x1b[0m\x1b[1;97m{} {}\x1b[0m", metrics.http_method, metrics.target_url);
    println!("\x1b[1;94m👥 Virtual users            : \x1b[0m\x1b[1;97m{}\x1b[0m", metrics.vus);
    println!("\x1b[1;92m✅ Total iterations         : \x1b[0m\x1b[1;97m{}\x1b[0m", metrics.total_iterations);
    println!("\x1b[1;92m✅ Successful requests      : \x1b[0m\x1b[1;97m{}\x1b[0m", metrics.successful_requests);
    println!("\x1b[1;91m❌ Failed requests          : \x1b[0m\x1b[1;97m{}\x1b[0m", metrics.failed_requests);
    println!("\x1b[1;96m⚡ Fastest response (ms)    : \x1b[0m\x1b[1;97m{:.2}\x1b[0m", metrics.fastest_response);
    println!("\x1b[1;93m🐢 Slowest response (ms)    : \x1b[0m\x1b[1;97m{:.2}\x1b[0m", metrics.slowest_response);
    println!("\x1b[1;95m📊 Median response time (ms): \x1b[0m\x1b[1;97m{:.2}\x1b[0m", metrics.median_response_time);
    println!("\x1b[1;95m📊 p90 response time (ms)   : \x1b[0m\x1b[1;97m{:.2}\x1b[0m", metrics.p90_response_time);
    println!("\x1b[1;95m📊 p95 response time (ms)   : \x1b[0m\x1b[1;97m{:.2}\x1b[0m", metrics.p95_response_time);
    println!("\x1b[1;94m📈 Iterations per second    : \x1b[0m\x1b[1;97m{:.2}\x1b[0m", metrics.throughput);

    println!();
    println!("\x1b[1;97;44m📦 ======== STATUS BREAKDOWN ========\x1b[0m");
    for (status, count) in &metrics.status_counts {
        println!("\x1b[1;97m• {}: {}\x1b[0m", status, count);
    }

    if !metrics.check_counts.is_empty() {
        println!();
        println!("\x1b[1;97;44m✔ ======== CHECKS ========\x1b[0m");
        let mut names: Vec<&String> = metrics.check_counts.keys().collect();
        names.sort();
        for name in names {
            let counter = metrics.check_counts[name];
            let line = format!(
                "{:<28}: {}/{} ({:.2}%)",
                name,
                counter.passes,
                counter.total(),
                counter.pass_rate()
            );
            if counter.fails == 0 {
                println!("{} {}", "✓".green().bold(), line.bold());
            } else {
                println!("{} {}", "✗".red().bold(), line.bold());
            }
        }
    }
}
