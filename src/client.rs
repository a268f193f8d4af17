//! Typed HTTP client for the Gomoku matchmaking API.

use tracing::{debug, instrument};

use crate::error::ClientError;
use crate::types::{
    FindGameRequest, FindGameResponse, GameAssignment, GameSnapshot, PlaceMoveRequest, Role,
};

/// Stateless client bound to one already-discovered base address.
///
/// No operation retries internally; retry policy belongs to the caller.
#[derive(Debug, Clone)]
pub struct GomokuClient {
    base_url: String,
    client: reqwest::Client,
}

impl GomokuClient {
    /// Creates a client for `base_url` (trailing slashes are trimmed).
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    /// The bound base address.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Enters matchmaking and returns the assigned game and seat.
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    pub async fn find_game(&self, player_id: &str) -> Result<GameAssignment, ClientError> {
        let response = self
            .client
            .post(format!("{}/api_find_game.php", self.base_url))
            .json(&FindGameRequest {
                my_player_id: player_id.to_string(),
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::RequestFailed {
                status: status.as_u16(),
            });
        }

        let body: FindGameResponse = response.json().await?;
        debug!(game_id = body.game_id, role = %body.role, "Matchmaking assignment");
        Ok(GameAssignment {
            game_id: body.game_id,
            role: Role::from_wire(&body.role),
        })
    }

    /// Fetches the authoritative snapshot for `game_id`.
    #[instrument(skip(self))]
    pub async fn get_state(&self, game_id: i64) -> Result<GameSnapshot, ClientError> {
        let response = self
            .client
            .get(format!("{}/api_get_state.php", self.base_url))
            .query(&[("game_id", game_id)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::RequestFailed {
                status: status.as_u16(),
            });
        }

        let snapshot: GameSnapshot = response.json().await?;
        debug!(
            status = %snapshot.status,
            moves = snapshot.moves.len(),
            "Fetched game state"
        );
        Ok(snapshot)
    }

    /// Submits a move attempt.
    ///
    /// The server is the sole arbiter of legality (turn order, occupancy,
    /// win condition); the client sends without game-rule validation. The
    /// acknowledgement body is logged and otherwise not interpreted.
    #[instrument(skip(self))]
    pub async fn place_move(
        &self,
        game_id: i64,
        player_id: &str,
        x: u16,
        y: u16,
    ) -> Result<(), ClientError> {
        let response = self
            .client
            .post(format!("{}/api_place_move.php", self.base_url))
            .json(&PlaceMoveRequest {
                game_id,
                player_id: player_id.to_string(),
                x,
                y,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::RequestFailed {
                status: status.as_u16(),
            });
        }

        let ack = response.text().await?;
        debug!(ack = %ack, "Move acknowledged");
        Ok(())
    }
}
