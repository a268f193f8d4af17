//! Turn derivation: pure classification of a snapshot from the local
//! player's perspective.

use crate::types::{GameSnapshot, STATUS_FINISHED, STATUS_WAITING};

/// Derived turn/outcome classification for one snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnStatus {
    /// Matchmaking assigned a game but no opponent has joined yet.
    WaitingForOpponent,
    /// Active game, the local player moves next.
    MyTurn,
    /// Active game, the opponent moves next.
    OpponentTurn,
    /// Finished with the local player as winner.
    Won,
    /// Finished with another player as winner.
    Lost,
    /// Finished with no winner reported.
    ///
    /// The observed server contract never names a draw explicitly; an absent
    /// winner on a finished game is treated as a neutral outcome rather than
    /// a guessed winner. If the server ever grows a real draw/abandon status,
    /// this is the spot to revisit.
    Drawn,
}

impl TurnStatus {
    /// True only while the local player may place a stone.
    pub fn is_my_turn(&self) -> bool {
        matches!(self, TurnStatus::MyTurn)
    }

    /// True once the game has reached an outcome.
    pub fn is_over(&self) -> bool {
        matches!(self, TurnStatus::Won | TurnStatus::Lost | TurnStatus::Drawn)
    }
}

/// Classifies `snapshot` from the local player's perspective.
///
/// Depends only on `status`, `current_turn_id`, and `winner_id` — never on
/// the move list. Any status other than `"waiting"` or `"finished"` means an
/// in-progress game; that permissive fallback is deliberate so future server
/// status values stay playable instead of being rejected.
pub fn determine_turn(snapshot: &GameSnapshot, local_player_id: &str) -> TurnStatus {
    if snapshot.status == STATUS_WAITING {
        TurnStatus::WaitingForOpponent
    } else if snapshot.status == STATUS_FINISHED {
        match snapshot.winner_id.as_deref() {
            Some(winner) if winner == local_player_id => TurnStatus::Won,
            Some(_) => TurnStatus::Lost,
            None => TurnStatus::Drawn,
        }
    } else if snapshot.current_turn_id.as_deref() == Some(local_player_id) {
        TurnStatus::MyTurn
    } else {
        TurnStatus::OpponentTurn
    }
}
