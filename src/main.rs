use std::process::ExitCode;

use apigauge::config::app_config::load_config;
use apigauge::engine::{ProbeCycle, ProbeEngine};
use apigauge::error::error_chain;
use apigauge::report::{History, ScoreReport, render_history};
use tracing::{error, warn};

fn print_cycle(cycle: &ProbeCycle) {
    let r = &cycle.report;
    println!("🌍 Testing API: {} ({})", r.url, r.method);
    for (attempt, outcome) in cycle.outcomes.iter().enumerate() {
        match outcome.status_code {
            Some(status) => println!(
                "   attempt {}: status {}, {:.2}ms",
                attempt + 1,
                status,
                outcome.elapsed_ms
            ),
            None => println!(
                "   attempt {}: ❌ failed after {:.2}ms",
                attempt + 1,
                outcome.elapsed_ms
            ),
        }
    }
    println!("✅ API testing complete.");
    println!("🛠 Functionality Score: {}/100", r.functionality);
    println!(
        "🔄 Reliability Score: {}/100 (Avg: {:.2} ms)",
        r.reliability, r.avg_latency_ms
    );
    println!("🚀 Performance Score: {}/100", r.performance);
    println!("🔒 Security Score: {}/100", r.security);
    println!();
}

fn print_history(history: &[ScoreReport], url_width: usize) {
    println!("📜 Past Results");
    print!("{}", render_history(history, Some(url_width)));
    if history.is_empty() {
        println!();
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "apigauge=info".into()),
        )
        .init();

    let app_config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", error_chain(&e));
            return ExitCode::FAILURE;
        }
    };

    let engine = match ProbeEngine::http(app_config.timeout, History::new()) {
        Ok(engine) => engine.with_attempts(app_config.attempts),
        Err(e) => {
            error!("Failed to create HTTP client: {}", error_chain(&e));
            return ExitCode::FAILURE;
        }
    };

    for target in &app_config.config.targets {
        let request = match target.to_request() {
            Ok(request) => request,
            Err(e) => {
                warn!("Skipping target '{}': {}", target.url, e);
                continue;
            }
        };

        match engine.run_probe_cycle(request).await {
            Ok(cycle) => print_cycle(&cycle),
            Err(e) => {
                error!("Probe cycle for {} aborted: {}", target.url, e);
                return ExitCode::FAILURE;
            }
        }
    }

    print_history(&engine.list_history(), app_config.max_url_width);
    ExitCode::SUCCESS
}
