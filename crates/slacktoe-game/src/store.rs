use anyhow::Result;
use uuid::Uuid;

use slacktoe_types::models::{Challenge, Channel, Game, Piece, Player};

use crate::error::GameError;

/// Fields needed to start a game. Ids are assigned by the repository.
#[derive(Debug, Clone)]
pub struct NewGame<'a> {
    pub channel_id: Uuid,
    pub board_size: usize,
    pub player1: &'a Player,
    pub player2: &'a Player,
    pub current_player_name: &'a str,
}

/// Record access for one transaction.
///
/// Implementations must only be handed out by [`GameStore::transaction`], so
/// every call made through them belongs to the same atomic unit.
pub trait Repository {
    /// Looks up a channel without creating anything.
    fn find_channel(&self, team_external_id: &str, channel_external_id: &str)
    -> Result<Option<Channel>>;

    /// Returns the channel, creating its team and itself if they are new.
    fn upsert_channel(&self, team_external_id: &str, channel_external_id: &str) -> Result<Channel>;

    /// Returns the player for `user_id` in the channel, creating it if new and
    /// overwriting its display name otherwise.
    fn upsert_player(&self, channel_id: Uuid, user_id: &str, user_name: &str) -> Result<Player>;

    fn find_player(&self, channel_id: Uuid, user_id: &str) -> Result<Option<Player>>;

    /// The challenge the channel currently points at, if any.
    fn current_challenge(&self, channel: &Channel) -> Result<Option<Challenge>>;

    /// Stores a fresh challenge and makes it the channel's current one.
    fn insert_challenge(
        &self,
        channel_id: Uuid,
        challenger: &Player,
        opponent_name: &str,
    ) -> Result<Challenge>;

    fn expire_challenge(&self, challenge_id: Uuid) -> Result<()>;

    /// The game the channel currently points at, finished or not.
    fn current_game(&self, channel: &Channel) -> Result<Option<Game>>;

    /// Stores a game and makes it the channel's current one.
    fn insert_game(&self, new_game: NewGame<'_>) -> Result<Game>;

    /// Persists `current_player_name` and `finished`.
    fn update_game(&self, game: &Game) -> Result<()>;

    fn pieces(&self, game_id: Uuid) -> Result<Vec<Piece>>;

    fn insert_piece(&self, game_id: Uuid, player_id: Uuid, row: usize, col: usize) -> Result<Piece>;
}

/// Durable storage for games.
///
/// `transaction` is the only way in. Implementations must run the closure
/// atomically and serialize it against every other transaction touching the
/// same channel: commit on `Ok`, roll back on `Err`.
pub trait GameStore: Send + Sync {
    fn transaction<T, F>(&self, f: F) -> Result<T, GameError>
    where
        F: FnOnce(&dyn Repository) -> Result<T, GameError>;
}

impl<S: GameStore> GameStore for std::sync::Arc<S> {
    fn transaction<T, F>(&self, f: F) -> Result<T, GameError>
    where
        F: FnOnce(&dyn Repository) -> Result<T, GameError>,
    {
        (**self).transaction(f)
    }
}
