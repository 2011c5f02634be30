use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::HeaderMap;
use tracing::debug;

use super::prelude::*;
use crate::error::error_chain;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

const USER_AGENT: &str = concat!("apigauge/", env!("CARGO_PKG_VERSION"));

/// Sends exactly one request and reports what happened.
///
/// Implementations never fail: anything that prevents a response from
/// arriving is recorded as `ProbeOutcome::failure`.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: &ProbeRequest) -> ProbeOutcome;
}

#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { client })
    }

    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: &ProbeRequest) -> ProbeOutcome {
        let mut builder = self
            .client
            .request(request.method.into(), request.url.as_str());
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let start = Instant::now();
        let response = match builder.send().await {
            Ok(response) => response,
            Err(e) => {
                let elapsed = elapsed_ms(start);
                debug!(
                    "{} {} failed after {:.2}ms: {}",
                    request.method,
                    request.url,
                    elapsed,
                    error_chain(&e)
                );
                return ProbeOutcome::failure(elapsed);
            }
        };

        let status = response.status().as_u16();
        let headers = canonical_headers(response.headers());

        // The attempt only counts once the whole body has arrived.
        match response.bytes().await {
            Ok(_) => {
                let elapsed = elapsed_ms(start);
                debug!(
                    "{} {} returned {} in {:.2}ms",
                    request.method, request.url, status, elapsed
                );
                ProbeOutcome::success(elapsed, status, headers)
            }
            Err(e) => {
                let elapsed = elapsed_ms(start);
                debug!(
                    "{} {} body read failed after {:.2}ms: {}",
                    request.method,
                    request.url,
                    elapsed,
                    error_chain(&e)
                );
                ProbeOutcome::failure(elapsed)
            }
        }
    }
}

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

/// `x-content-type-options` -> `X-Content-Type-Options`
pub fn canonical_header_name(name: &str) -> String {
    name.split('-')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => {
                    first.to_ascii_uppercase().to_string() + &chars.as_str().to_ascii_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join("-")
}

fn canonical_headers(headers: &HeaderMap) -> BTreeMap<String, String> {
    headers
        .keys()
        .map(|name| {
            let value = headers
                .get_all(name)
                .iter()
                .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
                .collect::<Vec<_>>()
                .join(", ");
            (canonical_header_name(name.as_str()), value)
        })
        .collect()
}
