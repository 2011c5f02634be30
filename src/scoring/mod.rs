//! Reduces the outcomes of one probe cycle into four 0-100 scores.
//!
//! Everything here is a pure function of its inputs: scoring the same
//! outcomes twice gives the same numbers.

use serde::Serialize;
use url::Url;

use crate::http_probe::outcome::ProbeOutcome;

/// Response headers that each add to the security score when present.
/// Membership is checked case-sensitively against canonical header names.
pub const SECURITY_HEADERS: [&str; 4] = [
    "Strict-Transport-Security",
    "Content-Security-Policy",
    "X-Content-Type-Options",
    "X-Frame-Options",
];

/// Number of attempts sampled per probe cycle.
pub const DEFAULT_ATTEMPTS: usize = 3;

/// Upper bound for an overridden attempt count.
pub const MAX_ATTEMPTS: usize = 100;

/// Average latency assumed when no attempt succeeded.
pub const FAILED_CYCLE_LATENCY_MS: f64 = 1000.0;

const MAX_SCORE: f64 = 100.0;
const OK_STATUS_SCORE: f64 = 100.0;
const OTHER_STATUS_SCORE: f64 = 50.0;
const HTTPS_SCORE: f64 = 100.0;
const PLAIN_HTTP_SCORE: f64 = 50.0;
const SECURITY_HEADER_SCORE: f64 = 25.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Scores {
    pub functionality: f64,
    pub reliability: f64,
    pub performance: f64,
    pub security: f64,
    pub avg_latency_ms: f64,
}

/// Scores a whole cycle. `url` is the probed URL, `outcomes` are in attempt order.
pub fn score(url: &str, outcomes: &[ProbeOutcome]) -> Scores {
    let first = outcomes.first();
    let avg_latency_ms = average_latency_ms(outcomes);
    Scores {
        functionality: functionality(first),
        reliability: latency_score(avg_latency_ms),
        performance: latency_score(avg_latency_ms),
        security: security(url, first),
        avg_latency_ms,
    }
}

/// 100 for a 200 response, 50 for any other status, 0 when the attempt failed.
pub fn functionality(first: Option<&ProbeOutcome>) -> f64 {
    match first {
        Some(outcome) if !outcome.failed => match outcome.status_code {
            Some(200) => OK_STATUS_SCORE,
            Some(_) => OTHER_STATUS_SCORE,
            None => 0.0,
        },
        _ => 0.0,
    }
}

/// Mean `elapsed_ms` over the successful attempts only.
pub fn average_latency_ms(outcomes: &[ProbeOutcome]) -> f64 {
    let successful: Vec<f64> = outcomes
        .iter()
        .filter(|o| !o.failed)
        .map(|o| o.elapsed_ms)
        .collect();
    if successful.is_empty() {
        return FAILED_CYCLE_LATENCY_MS;
    }
    successful.iter().sum::<f64>() / successful.len() as f64
}

pub fn reliability(outcomes: &[ProbeOutcome]) -> f64 {
    latency_score(average_latency_ms(outcomes))
}

/// Same number as [`reliability`], reported under its own label.
pub fn performance(outcomes: &[ProbeOutcome]) -> f64 {
    latency_score(average_latency_ms(outcomes))
}

/// `100 - avg/10`, clamped to [0, 100] and rounded to 2 decimals.
pub fn latency_score(avg_latency_ms: f64) -> f64 {
    round2((MAX_SCORE - avg_latency_ms / 10.0).clamp(0.0, MAX_SCORE))
}

pub fn security(url: &str, first: Option<&ProbeOutcome>) -> f64 {
    let Some(outcome) = first.filter(|o| !o.failed) else {
        return 0.0;
    };

    let https = Url::parse(url)
        .map(|u| u.scheme() == "https")
        .unwrap_or(false);
    let transport_score = if https { HTTPS_SCORE } else { PLAIN_HTTP_SCORE };

    let present = SECURITY_HEADERS
        .iter()
        .filter(|name| outcome.response_headers.contains_key(**name))
        .count();

    (transport_score + SECURITY_HEADER_SCORE * present as f64).min(MAX_SCORE)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
