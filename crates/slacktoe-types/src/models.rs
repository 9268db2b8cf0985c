use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A Slack workspace, keyed by Slack's `team_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: Uuid,
    pub external_id: String,
}

/// A Slack channel inside one team. At most one game runs per channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    pub id: Uuid,
    pub team_id: Uuid,
    pub external_id: String,
    /// Most recently issued challenge, answered or not.
    pub active_challenge_id: Option<Uuid>,
    /// Most recently started game, finished or not.
    pub active_game_id: Option<Uuid>,
}

/// A Slack user as seen from one channel. `user_name` is refreshed on every
/// challenge/accept, last write wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: Uuid,
    pub channel_id: Uuid,
    pub user_id: String,
    pub user_name: String,
}

/// An open invitation. The opponent is only a display name until someone
/// with that name accepts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Challenge {
    pub id: Uuid,
    pub channel_id: Uuid,
    pub challenger: Player,
    pub opponent_name: String,
    pub expired: bool,
}

/// A game between the challenger (`player1`, always X) and the accepter
/// (`player2`, always O).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub id: Uuid,
    pub channel_id: Uuid,
    pub board_size: usize,
    pub player1: Player,
    pub player2: Player,
    pub current_player_name: String,
    pub finished: bool,
}

impl Game {
    /// Whether the given player record takes part in this game.
    pub fn involves(&self, player_id: Uuid) -> bool {
        self.player1.id == player_id || self.player2.id == player_id
    }

    /// The other participant. Callers must pass one of the two players.
    pub fn opponent_of(&self, player_id: Uuid) -> &Player {
        if self.player1.id == player_id {
            &self.player2
        } else {
            &self.player1
        }
    }
}

/// A placed mark. Pieces are never moved or removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    pub id: Uuid,
    pub game_id: Uuid,
    pub player_id: Uuid,
    pub row: usize,
    pub col: usize,
}
