//! Server discovery: probe candidates in order, first reachable wins.

use std::time::Duration;

use tracing::{debug, info, instrument, warn};

use crate::error::ClientError;

/// Per-candidate liveness deadline.
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(2);

/// Probes `candidates` in order and returns the first base address that
/// answers a `HEAD` request with a 2xx status within [`PROBE_TIMEOUT`].
///
/// Single pass, no retries: once a candidate succeeds, later candidates are
/// never probed. Fails with [`ClientError::NoServerReachable`] when the list
/// is exhausted.
#[instrument(skip(candidates), fields(count = candidates.len()))]
pub async fn discover_server(candidates: &[String]) -> Result<String, ClientError> {
    let client = reqwest::Client::builder().timeout(PROBE_TIMEOUT).build()?;

    for candidate in candidates {
        debug!(candidate = %candidate, "Probing server candidate");
        match client.head(candidate).send().await {
            Ok(response) if response.status().is_success() => {
                info!(server = %candidate, "Server reachable");
                return Ok(candidate.clone());
            }
            Ok(response) => {
                debug!(
                    candidate = %candidate,
                    status = %response.status(),
                    "Candidate answered outside the success range"
                );
            }
            Err(e) => {
                debug!(candidate = %candidate, error = %e, "Candidate unreachable");
            }
        }
    }

    warn!("All server candidates failed the liveness probe");
    Err(ClientError::NoServerReachable)
}
