use std::collections::BTreeMap;

use serde::Serialize;

/// What a single attempt observed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProbeOutcome {
    pub elapsed_ms: f64,
    pub status_code: Option<u16>,
    pub response_headers: BTreeMap<String, String>,
    pub failed: bool,
}

impl ProbeOutcome {
    pub fn success(
        elapsed_ms: f64,
        status_code: u16,
        response_headers: BTreeMap<String, String>,
    ) -> Self {
        Self {
            elapsed_ms: elapsed_ms.max(0.0),
            status_code: Some(status_code),
            response_headers,
            failed: false,
        }
    }

    /// An attempt that never got a response (DNS, connect, TLS, timeout...).
    pub fn failure(elapsed_ms: f64) -> Self {
        Self {
            elapsed_ms: elapsed_ms.max(0.0),
            status_code: None,
            response_headers: BTreeMap::new(),
            failed: true,
        }
    }
}
