//! Session synchronizer: matchmaking sequencing, the polling loop, and the
//! observable session state.

use std::sync::{Arc, Mutex};

use derive_getters::Getters;
use tokio::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use crate::client::GomokuClient;
use crate::discovery::discover_server;
use crate::error::ClientError;
use crate::status::{TurnStatus, determine_turn};
use crate::types::{BOARD_SIZE, GameSnapshot, Move, Role};

/// Poll cadence while a game is bound.
pub const POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Coarse position in the session state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No server bound; discovery has not succeeded yet.
    Idle,
    /// Probing candidate servers.
    Discovering,
    /// Server bound, no game in progress.
    Ready,
    /// Matchmaking request in flight.
    Searching,
    /// Game bound; the polling loop is running.
    InGame,
    /// The bound game reached an outcome. A new search may start from here.
    Finished,
}

/// Observable session state, owned by [`SessionSync`] and exposed to the
/// rendering layer by clone.
#[derive(Debug, Clone, Getters)]
pub struct SessionState {
    /// State-machine position.
    phase: Phase,
    /// Bound game, if any. Always set and cleared together with `role`.
    game_id: Option<i64>,
    /// Local seat in the bound game.
    role: Option<Role>,
    /// Derived turn classification of the latest snapshot.
    turn: Option<TurnStatus>,
    /// Latest authoritative snapshot, replaced wholesale on every apply.
    snapshot: Option<GameSnapshot>,
    /// Most recent failure; cleared by the next successful apply.
    last_error: Option<ClientError>,
}

impl SessionState {
    fn new() -> Self {
        Self {
            phase: Phase::Idle,
            game_id: None,
            role: None,
            turn: None,
            snapshot: None,
            last_error: None,
        }
    }

    /// True only while the local player may place a stone.
    pub fn is_my_turn(&self) -> bool {
        self.turn.is_some_and(|t| t.is_my_turn())
    }

    /// Drawing contract for the rendering layer: the first seat's id (stones
    /// by that id draw black) and the moves in play order.
    pub fn board_view(&self) -> Option<(&str, &[Move])> {
        self.snapshot
            .as_ref()
            .map(|s| (s.player_1_id.as_str(), s.moves.as_slice()))
    }
}

#[derive(Debug)]
struct Inner {
    state: SessionState,
    client: Option<GomokuClient>,
    poll_token: Option<CancellationToken>,
}

/// Owns one logical game session: discovery, matchmaking, the polling loop,
/// and all mutations of [`SessionState`].
///
/// Cheap to clone; clones share the same session. All state changes funnel
/// through one mutex-guarded choke point, held only for in-memory updates
/// and never across a network call.
#[derive(Debug, Clone)]
pub struct SessionSync {
    player_id: String,
    poll_interval: Duration,
    inner: Arc<Mutex<Inner>>,
}

impl SessionSync {
    /// Creates a synchronizer with a fresh process-wide player identity.
    #[instrument]
    pub fn new() -> Self {
        Self::with_player_id(random_player_id())
    }

    /// Creates a synchronizer with a fixed player identity (tests).
    pub fn with_player_id(player_id: impl Into<String>) -> Self {
        let player_id = player_id.into();
        info!(player_id = %player_id, "Creating session synchronizer");
        Self {
            player_id,
            poll_interval: POLL_INTERVAL,
            inner: Arc::new(Mutex::new(Inner {
                state: SessionState::new(),
                client: None,
                poll_token: None,
            })),
        }
    }

    /// Overrides the poll cadence. Tests run on millisecond intervals; the
    /// default is [`POLL_INTERVAL`].
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// The local player's identity.
    pub fn player_id(&self) -> &str {
        &self.player_id
    }

    /// Clones out the observable state for rendering.
    pub fn state(&self) -> SessionState {
        self.inner.lock().unwrap().state.clone()
    }

    /// Runs server discovery once and binds the winning base address.
    ///
    /// Only meaningful from `Idle`; in any other phase this is a logged
    /// no-op (a second press of the start button is a UI race, not a fault).
    /// On failure the phase returns to `Idle` so discovery can be retried.
    #[instrument(skip(self, candidates), fields(count = candidates.len()))]
    pub async fn discover(&self, candidates: &[String]) -> Result<(), ClientError> {
        {
            let mut inner = self.inner.lock().unwrap();
            if inner.state.phase != Phase::Idle {
                debug!(phase = ?inner.state.phase, "Ignoring discover outside Idle");
                return Ok(());
            }
            inner.state.phase = Phase::Discovering;
            inner.state.last_error = None;
        }

        match discover_server(candidates).await {
            Ok(base_url) => {
                info!(server = %base_url, "Server bound");
                let mut inner = self.inner.lock().unwrap();
                inner.client = Some(GomokuClient::new(base_url));
                inner.state.phase = Phase::Ready;
                Ok(())
            }
            Err(e) => {
                let mut inner = self.inner.lock().unwrap();
                inner.state.phase = Phase::Idle;
                inner.state.last_error = Some(e.clone());
                Err(e)
            }
        }
    }

    /// Enters matchmaking and, on success, starts the polling loop.
    ///
    /// Accepted from `Ready` and `Finished` (rematch); any other phase is a
    /// logged no-op. Leaving `Finished` cancels any residual poll token and
    /// clears the previous game's bindings before searching. On failure the
    /// phase reverts to `Ready` so the user can retry.
    #[instrument(skip(self), fields(player_id = %self.player_id))]
    pub async fn find_game(&self) -> Result<(), ClientError> {
        let client = {
            let mut inner = self.inner.lock().unwrap();
            if !matches!(inner.state.phase, Phase::Ready | Phase::Finished) {
                debug!(phase = ?inner.state.phase, "Ignoring find_game outside Ready/Finished");
                return Ok(());
            }
            let Some(client) = inner.client.clone() else {
                warn!("No client bound despite Ready phase");
                return Ok(());
            };
            if let Some(token) = inner.poll_token.take() {
                debug!("Cancelling residual poll loop before rematch");
                token.cancel();
            }
            inner.state.game_id = None;
            inner.state.role = None;
            inner.state.turn = None;
            inner.state.snapshot = None;
            inner.state.last_error = None;
            inner.state.phase = Phase::Searching;
            client
        };

        match client.find_game(&self.player_id).await {
            Ok(assignment) => {
                info!(
                    game_id = assignment.game_id,
                    role = ?assignment.role,
                    "Matched into game"
                );
                {
                    let mut inner = self.inner.lock().unwrap();
                    // game_id and role change together, always.
                    inner.state.game_id = Some(assignment.game_id);
                    inner.state.role = Some(assignment.role);
                    inner.state.phase = Phase::InGame;
                }
                self.start_polling(assignment.game_id);
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Matchmaking failed");
                let mut inner = self.inner.lock().unwrap();
                inner.state.phase = Phase::Ready;
                inner.state.last_error = Some(e.clone());
                Err(e)
            }
        }
    }

    /// Submits a move at `(x, y)` for the local player.
    ///
    /// Suppressed locally with [`ClientError::MoveRejected`] — zero network
    /// calls — unless a game is bound, the cell is on the board, and it is
    /// the local player's turn. On submission success one out-of-cadence
    /// state fetch refreshes the view without waiting for the next tick. On
    /// submission failure the error is recorded but the phase is unchanged;
    /// the next poll tick reconciles truth either way.
    #[instrument(skip(self))]
    pub async fn place_move(&self, x: u16, y: u16) -> Result<(), ClientError> {
        let (client, game_id, token) = {
            let inner = self.inner.lock().unwrap();
            let Some(game_id) = inner.state.game_id else {
                debug!("Suppressing move with no game bound");
                return Err(ClientError::MoveRejected {
                    reason: "no game in progress".to_string(),
                });
            };
            if !inner.state.is_my_turn() {
                debug!("Suppressing move out of turn");
                return Err(ClientError::MoveRejected {
                    reason: "not your turn".to_string(),
                });
            }
            if x >= BOARD_SIZE || y >= BOARD_SIZE {
                return Err(ClientError::MoveRejected {
                    reason: "off the board".to_string(),
                });
            }
            let Some(client) = inner.client.clone() else {
                warn!("No client bound despite a bound game");
                return Err(ClientError::MoveRejected {
                    reason: "no server bound".to_string(),
                });
            };
            (client, game_id, inner.poll_token.clone())
        };

        match client.place_move(game_id, &self.player_id, x, y).await {
            Ok(()) => {
                // Out-of-cadence refresh so the move lands on screen without
                // waiting for the next tick. The regular tick may be in
                // flight at the same time; the apply choke point makes the
                // last complete snapshot win.
                match client.get_state(game_id).await {
                    Ok(snapshot) => self.apply_snapshot(game_id, snapshot, token.as_ref()),
                    Err(e) => {
                        warn!(error = %e, "Post-move refresh failed");
                        self.record_error(e);
                    }
                }
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Move submission failed");
                self.record_error(e.clone());
                Err(e)
            }
        }
    }

    /// Cancels any active poll loop. Idempotent; safe when nothing runs.
    /// Meant for UI teardown.
    #[instrument(skip(self))]
    pub fn stop(&self) {
        let mut inner = self.inner.lock().unwrap();
        if let Some(token) = inner.poll_token.take() {
            info!("Stopping poll loop");
            token.cancel();
        }
    }

    /// Starts the polling loop for `game_id`, cancelling any previous loop
    /// first so at most one loop is ever active per synchronizer.
    fn start_polling(&self, game_id: i64) {
        let token = {
            let mut inner = self.inner.lock().unwrap();
            if let Some(previous) = inner.poll_token.take() {
                debug!("Cancelling previous poll loop");
                previous.cancel();
            }
            let token = CancellationToken::new();
            inner.poll_token = Some(token.clone());
            token
        };

        let sync = self.clone();
        let interval = self.poll_interval;
        tokio::spawn(async move {
            info!(game_id, "Poll loop started");
            loop {
                sync.poll_once(game_id, &token).await;
                if token.is_cancelled() {
                    break;
                }
                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = tokio::time::sleep(interval) => {}
                }
            }
            info!(game_id, "Poll loop stopped");
        });
    }

    /// One poll tick: fetch the snapshot and apply it. A failed fetch is
    /// recorded and swallowed; the loop continues on the next tick.
    async fn poll_once(&self, game_id: i64, token: &CancellationToken) {
        let client = { self.inner.lock().unwrap().client.clone() };
        let Some(client) = client else {
            return;
        };

        match client.get_state(game_id).await {
            Ok(snapshot) => self.apply_snapshot(game_id, snapshot, Some(token)),
            Err(e) => {
                warn!(error = %e, "Poll failed; continuing on next tick");
                let mut inner = self.inner.lock().unwrap();
                if !token.is_cancelled() {
                    inner.state.last_error = Some(e);
                }
            }
        }
    }

    /// Single choke point for snapshot application.
    ///
    /// Results land in completion order, not issue order: when an
    /// out-of-cadence fetch and a scheduled tick are both in flight, the
    /// later arrival overwrites the earlier one. Both carry full
    /// self-consistent snapshots, so the worst case is a briefly stale view,
    /// never a partial merge. A result whose token was cancelled, or whose
    /// game is no longer the bound one, is discarded.
    fn apply_snapshot(
        &self,
        game_id: i64,
        snapshot: GameSnapshot,
        token: Option<&CancellationToken>,
    ) {
        let mut inner = self.inner.lock().unwrap();
        if let Some(token) = token
            && token.is_cancelled()
        {
            debug!(game_id, "Discarding snapshot from a cancelled poll loop");
            return;
        }
        if inner.state.game_id != Some(game_id) {
            debug!(game_id, "Discarding snapshot from an unbound game");
            return;
        }

        let turn = determine_turn(&snapshot, &self.player_id);
        debug!(game_id, turn = ?turn, moves = snapshot.moves.len(), "Applying snapshot");
        inner.state.snapshot = Some(snapshot);
        inner.state.turn = Some(turn);
        inner.state.last_error = None;

        if turn.is_over() {
            info!(game_id, outcome = ?turn, "Game finished; stopping poll loop");
            inner.state.phase = Phase::Finished;
            if let Some(token) = inner.poll_token.take() {
                token.cancel();
            }
        } else {
            inner.state.phase = Phase::InGame;
        }
    }

    fn record_error(&self, error: ClientError) {
        let mut inner = self.inner.lock().unwrap();
        inner.state.last_error = Some(error);
    }
}

impl Default for SessionSync {
    fn default() -> Self {
        Self::new()
    }
}

/// Generates the process-wide player identity: a fixed prefix plus a random
/// hex suffix. Not a security boundary, only a session-distinguishing label
/// with negligible collision probability.
pub fn random_player_id() -> String {
    format!("tui_{:08x}", rand::random::<u32>())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_id_shape() {
        let id = random_player_id();
        assert!(id.starts_with("tui_"));
        assert_eq!(id.len(), 12);
        assert!(id[4..].chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_player_ids_are_distinct() {
        assert_ne!(random_player_id(), random_player_id());
    }

    #[test]
    fn test_fresh_state_is_idle() {
        let sync = SessionSync::with_player_id("tui_00000000");
        let state = sync.state();
        assert_eq!(*state.phase(), Phase::Idle);
        assert_eq!(*state.game_id(), None);
        assert!(!state.is_my_turn());
        assert!(state.board_view().is_none());
    }
}
