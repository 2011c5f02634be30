//! Probes an HTTP API a handful of times and scores what it saw.
//!
//! A probe cycle samples one endpoint [`scoring::DEFAULT_ATTEMPTS`] times,
//! reduces the outcomes into functionality, reliability, performance and
//! security scores (0-100 each) and appends the resulting report to an
//! in-memory [`report::History`].
//!
//! ```no_run
//! use apigauge::engine::ProbeEngine;
//! use apigauge::http_probe::prelude::*;
//! use apigauge::report::History;
//! use std::time::Duration;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let engine = ProbeEngine::http(Duration::from_secs(5), History::new())?;
//! let cycle = engine
//!     .run_probe_cycle(ProbeRequest::new("https://example.com", Method::Get))
//!     .await?;
//! println!("{}", cycle.report);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod http_probe;
pub mod report;
pub mod scoring;
