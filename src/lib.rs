//! Gomoku client core: server discovery, typed HTTP client, turn derivation,
//! and the session synchronizer.
//!
//! The authoritative game state lives entirely on a remote server. This crate
//! keeps a local view synchronized by polling and exposes it read-only to a
//! rendering layer.
//!
//! # Architecture
//!
//! - **Discovery**: probe an ordered list of candidate servers, first
//!   reachable one wins
//! - **Client**: typed operations against the matchmaking/state/move HTTP API
//! - **Status**: pure derivation of whose turn it is from a snapshot
//! - **Session**: the synchronizer owning the polling loop, cancellation,
//!   and the observable [`SessionState`]

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod client;
pub mod discovery;
pub mod error;
pub mod session;
pub mod status;
pub mod types;

// Crate-level exports - HTTP client
pub use client::GomokuClient;

// Crate-level exports - Server discovery
pub use discovery::{PROBE_TIMEOUT, discover_server};

// Crate-level exports - Errors
pub use error::ClientError;

// Crate-level exports - Session synchronizer
pub use session::{POLL_INTERVAL, Phase, SessionState, SessionSync, random_player_id};

// Crate-level exports - Turn derivation
pub use status::{TurnStatus, determine_turn};

// Crate-level exports - Wire types
pub use types::{BOARD_SIZE, GameAssignment, GameSnapshot, Move, Role};
