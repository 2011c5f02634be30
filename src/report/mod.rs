use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::Serialize;

use crate::http_probe::prelude::*;
use crate::scoring::Scores;

pub const HISTORY_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// The result of one probe cycle. Never mutated once assembled.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreReport {
    pub functionality: f64,
    pub reliability: f64,
    pub performance: f64,
    pub security: f64,
    pub avg_latency_ms: f64,
    pub timestamp: DateTime<Utc>,
    pub url: String,
    pub method: Method,
    pub attempts: usize,
    pub failed_attempts: usize,
}

pub fn assemble(request: &ProbeRequest, outcomes: &[ProbeOutcome], scores: Scores) -> ScoreReport {
    ScoreReport {
        functionality: scores.functionality,
        reliability: scores.reliability,
        performance: scores.performance,
        security: scores.security,
        avg_latency_ms: scores.avg_latency_ms,
        timestamp: Utc::now(),
        url: request.url.clone(),
        method: request.method,
        attempts: outcomes.len(),
        failed_attempts: outcomes.iter().filter(|o| o.failed).count(),
    }
}

impl ScoreReport {
    /// Two-line history entry; `url_width` pads or truncates the URL column.
    pub fn history_entry(&self, url_width: Option<usize>) -> String {
        let url = match url_width {
            Some(width) => to_fixed_width(&self.url, width),
            None => self.url.clone(),
        };
        format!(
            "{} | {} | {}\nFunctionality: {} | Reliability: {} | Performance: {} | Security: {}",
            self.timestamp.format(HISTORY_TIME_FORMAT),
            self.method,
            url,
            self.functionality,
            self.reliability,
            self.performance,
            self.security
        )
    }
}

impl fmt::Display for ScoreReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.history_entry(None))
    }
}

fn to_fixed_width(input: &str, width: usize) -> String {
    use unicode_truncate::UnicodeTruncateStr;

    let (truncated, _) = input.unicode_truncate(width);
    format!("{:<width$}", truncated, width = width)
}

/// Append-only run history, shared between the engine and its readers.
///
/// Cloning the handle shares the same underlying list.
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: Arc<RwLock<Vec<ScoreReport>>>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&self, report: ScoreReport) {
        self.entries.write().push(report);
    }

    /// Copy of the entries in append order.
    pub fn snapshot(&self) -> Vec<ScoreReport> {
        self.entries.read().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

pub fn render_history(reports: &[ScoreReport], url_width: Option<usize>) -> String {
    if reports.is_empty() {
        return "No past results yet.".to_string();
    }
    reports
        .iter()
        .map(|r| format!("{}\n\n", r.history_entry(url_width)))
        .collect()
}
