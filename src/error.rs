//! Client error taxonomy.

use derive_more::{Display, Error};

/// Errors surfaced by the game client and the session synchronizer.
///
/// `Clone` so the most recent error can live in the observable session state
/// while also being returned to the caller.
#[derive(Debug, Clone, Display, Error)]
pub enum ClientError {
    /// Every candidate server failed the liveness probe.
    #[display("no server reachable")]
    NoServerReachable,

    /// Connection-level failure on a single call, including a body that
    /// failed to decode.
    #[display("transport error: {message}")]
    Transport {
        /// Human-readable cause.
        message: String,
    },

    /// The server answered with a non-success HTTP status.
    #[display("request failed with status {status}")]
    RequestFailed {
        /// The HTTP status code.
        status: u16,
    },

    /// A move attempt suppressed locally, before any network call.
    #[display("move rejected: {reason}")]
    MoveRejected {
        /// Why the move was not sent.
        reason: String,
    },
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport {
            message: err.to_string(),
        }
    }
}
