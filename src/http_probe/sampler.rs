use tracing::debug;

use super::prelude::*;
use crate::scoring::DEFAULT_ATTEMPTS;

/// Sends the same request `attempts` times, one after the other.
///
/// Failed attempts are kept in the output, so the result always holds exactly
/// `attempts` outcomes in attempt order.
pub async fn sample<T: Transport + ?Sized>(
    transport: &T,
    request: &ProbeRequest,
    attempts: usize,
) -> Vec<ProbeOutcome> {
    let mut outcomes = Vec::with_capacity(attempts.min(DEFAULT_ATTEMPTS));
    for attempt in 1..=attempts {
        let outcome = transport.execute(request).await;
        debug!(
            "attempt {attempt}/{attempts} for {} {}: status {:?}, {:.2}ms, failed: {}",
            request.method, request.url, outcome.status_code, outcome.elapsed_ms, outcome.failed
        );
        outcomes.push(outcome);
    }
    outcomes
}
