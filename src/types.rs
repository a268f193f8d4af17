//! Wire types for the Gomoku HTTP API.
//!
//! Field names match the server's JSON bit-exactly; these shapes are the
//! compatibility boundary and carry no game logic.

use serde::{Deserialize, Serialize};

/// Board dimension shared with the rendering layer (cells per side).
///
/// Fixed by the game, not derived from server data.
pub const BOARD_SIZE: u16 = 15;

/// Wire status of a game still waiting for a second player.
pub const STATUS_WAITING: &str = "waiting";

/// Wire status of a completed game.
pub const STATUS_FINISHED: &str = "finished";

/// Wire role of the first seat. Any other role value means the second seat.
pub const ROLE_PLAYER_1: &str = "player_1";

/// One placed stone, as reported by the server.
///
/// Immutable once produced; the client only ever sees new moves by
/// re-fetching the full snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    /// Id of the player who placed the stone.
    pub player_id: String,
    /// Column, in `[0, BOARD_SIZE)`.
    pub x_coord: u16,
    /// Row, in `[0, BOARD_SIZE)`.
    pub y_coord: u16,
}

/// Complete server-side game state at one instant.
///
/// Replaced wholesale on every successful fetch, never patched. `status` is
/// kept as the raw wire string: the server's contract is open-ended, and
/// anything that is not `"waiting"` or `"finished"` counts as in progress
/// (see [`crate::status::determine_turn`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    /// Server-assigned game id.
    pub game_id: i64,
    /// Raw wire status string.
    pub status: String,
    /// Id of the first-seat player (plays black).
    pub player_1_id: String,
    /// Id of the second-seat player, absent while matchmaking is pending.
    #[serde(default)]
    pub player_2_id: Option<String>,
    /// Id of the player whose turn it is, absent outside active play.
    #[serde(default)]
    pub current_turn_id: Option<String>,
    /// Id of the winner once finished; absent on a finished game means a
    /// draw or abandoned game.
    #[serde(default)]
    pub winner_id: Option<String>,
    /// All moves so far, in play order.
    #[serde(default)]
    pub moves: Vec<Move>,
}

/// Which seat matchmaking assigned to the local player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// First seat (`"player_1"` on the wire), plays black.
    First,
    /// Second seat, plays white.
    Second,
}

impl Role {
    /// Maps a wire role string onto a seat. Only `"player_1"` is the first
    /// seat; everything else is the second.
    pub fn from_wire(role: &str) -> Self {
        if role == ROLE_PLAYER_1 {
            Role::First
        } else {
            Role::Second
        }
    }

    /// Stone color label for status text.
    pub fn stone_label(&self) -> &'static str {
        match self {
            Role::First => "black",
            Role::Second => "white",
        }
    }
}

/// Matchmaking result: the bound game and the local player's seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameAssignment {
    /// Server-assigned game id.
    pub game_id: i64,
    /// Seat assigned to the local player.
    pub role: Role,
}

/// Body of `POST api_find_game.php`.
#[derive(Debug, Clone, Serialize)]
pub struct FindGameRequest {
    /// The local player's id.
    pub my_player_id: String,
}

/// Response of `POST api_find_game.php`.
#[derive(Debug, Clone, Deserialize)]
pub struct FindGameResponse {
    /// Server-assigned game id.
    pub game_id: i64,
    /// Raw wire role string.
    pub role: String,
}

/// Body of `POST api_place_move.php`.
#[derive(Debug, Clone, Serialize)]
pub struct PlaceMoveRequest {
    /// The bound game.
    pub game_id: i64,
    /// The local player's id.
    pub player_id: String,
    /// Column of the attempted move.
    pub x: u16,
    /// Row of the attempted move.
    pub y: u16,
}
