use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::info;

use crate::error::Result;
use crate::http_probe::prelude::*;
use crate::report::{History, ScoreReport, assemble};
use crate::scoring::{self, DEFAULT_ATTEMPTS, MAX_ATTEMPTS};

/// Everything one probe cycle produced: the report and the raw samples.
#[derive(Debug, Clone, Serialize)]
pub struct ProbeCycle {
    pub report: ScoreReport,
    pub outcomes: Vec<ProbeOutcome>,
}

/// Samples an endpoint, scores it and records the report in its history.
///
/// Cycles on the same engine (and its clones) never overlap.
pub struct ProbeEngine<T> {
    transport: Arc<T>,
    history: History,
    attempts: usize,
    cycle_lock: Arc<Mutex<()>>,
}

impl<T> Clone for ProbeEngine<T> {
    fn clone(&self) -> Self {
        Self {
            transport: self.transport.clone(),
            history: self.history.clone(),
            attempts: self.attempts,
            cycle_lock: self.cycle_lock.clone(),
        }
    }
}

impl ProbeEngine<HttpTransport> {
    pub fn http(timeout: Duration, history: History) -> Result<Self> {
        Ok(Self::new(HttpTransport::new(timeout)?, history))
    }
}

impl<T: Transport + 'static> ProbeEngine<T> {
    pub fn new(transport: T, history: History) -> Self {
        Self {
            transport: Arc::new(transport),
            history,
            attempts: DEFAULT_ATTEMPTS,
            cycle_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Overrides the number of sampled attempts, kept within `1..=MAX_ATTEMPTS`.
    pub fn with_attempts(mut self, attempts: usize) -> Self {
        self.attempts = attempts.clamp(1, MAX_ATTEMPTS);
        self
    }

    pub fn attempts(&self) -> usize {
        self.attempts
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn list_history(&self) -> Vec<ScoreReport> {
        self.history.snapshot()
    }

    /// Runs one probe cycle on the current task.
    pub async fn probe(&self, request: ProbeRequest) -> ProbeCycle {
        let _guard = self.cycle_lock.lock().await;

        info!(
            "probing {} {} with {} attempts",
            request.method, request.url, self.attempts
        );
        let outcomes = sample(self.transport.as_ref(), &request, self.attempts).await;
        let scores = scoring::score(&request.url, &outcomes);
        let report = assemble(&request, &outcomes, scores);
        info!(
            "{} {}: functionality {}, reliability {}, performance {}, security {} (avg {:.2}ms)",
            report.method,
            report.url,
            report.functionality,
            report.reliability,
            report.performance,
            report.security,
            report.avg_latency_ms
        );

        self.history.append(report.clone());
        ProbeCycle { report, outcomes }
    }

    /// Spawns a probe cycle on the tokio runtime.
    ///
    /// The caller decides how to observe completion: await the handle, poll it,
    /// or forward the result elsewhere. A panic inside the cycle comes back as
    /// a `JoinError`.
    pub fn run_probe_cycle(&self, request: ProbeRequest) -> JoinHandle<ProbeCycle> {
        let engine = self.clone();
        tokio::spawn(async move { engine.probe(request).await })
    }
}
