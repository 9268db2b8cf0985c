//! Database row types, mapped straight from SQLite rows. Ids are stored as
//! UUID text and only parsed when a row becomes a domain model.
use anyhow::{Error, Result, anyhow};
use uuid::Uuid;

use slacktoe_types::models::{Challenge, Channel, Game, Piece, Player};

pub struct ChannelRow {
    pub id: String,
    pub team_id: String,
    pub external_id: String,
    pub active_challenge_id: Option<String>,
    pub active_game_id: Option<String>,
}

pub struct PlayerRow {
    pub id: String,
    pub channel_id: String,
    pub user_id: String,
    pub user_name: String,
}

pub struct ChallengeRow {
    pub id: String,
    pub channel_id: String,
    pub opponent_name: String,
    pub expired: bool,
    pub challenger: PlayerRow,
}

pub struct GameRow {
    pub id: String,
    pub channel_id: String,
    pub board_size: i64,
    pub current_player_name: String,
    pub finished: bool,
    pub player1: PlayerRow,
    pub player2: PlayerRow,
}

pub struct PieceRow {
    pub id: String,
    pub game_id: String,
    pub player_id: String,
    pub row_idx: i64,
    pub col_idx: i64,
}

fn parse_id(column: &str, value: &str) -> Result<Uuid> {
    value
        .parse()
        .map_err(|e| anyhow!("Corrupt {} '{}': {}", column, value, e))
}

fn parse_index(column: &str, value: i64) -> Result<usize> {
    usize::try_from(value).map_err(|_| anyhow!("Corrupt {} {}", column, value))
}

impl TryFrom<ChannelRow> for Channel {
    type Error = Error;

    fn try_from(row: ChannelRow) -> Result<Self> {
        Ok(Channel {
            id: parse_id("channel id", &row.id)?,
            team_id: parse_id("team_id", &row.team_id)?,
            external_id: row.external_id,
            active_challenge_id: row
                .active_challenge_id
                .as_deref()
                .map(|v| parse_id("active_challenge_id", v))
                .transpose()?,
            active_game_id: row
                .active_game_id
                .as_deref()
                .map(|v| parse_id("active_game_id", v))
                .transpose()?,
        })
    }
}

impl TryFrom<PlayerRow> for Player {
    type Error = Error;

    fn try_from(row: PlayerRow) -> Result<Self> {
        Ok(Player {
            id: parse_id("player id", &row.id)?,
            channel_id: parse_id("channel_id", &row.channel_id)?,
            user_id: row.user_id,
            user_name: row.user_name,
        })
    }
}

impl TryFrom<ChallengeRow> for Challenge {
    type Error = Error;

    fn try_from(row: ChallengeRow) -> Result<Self> {
        Ok(Challenge {
            id: parse_id("challenge id", &row.id)?,
            channel_id: parse_id("channel_id", &row.channel_id)?,
            challenger: row.challenger.try_into()?,
            opponent_name: row.opponent_name,
            expired: row.expired,
        })
    }
}

impl TryFrom<GameRow> for Game {
    type Error = Error;

    fn try_from(row: GameRow) -> Result<Self> {
        Ok(Game {
            id: parse_id("game id", &row.id)?,
            channel_id: parse_id("channel_id", &row.channel_id)?,
            board_size: parse_index("board_size", row.board_size)?,
            player1: row.player1.try_into()?,
            player2: row.player2.try_into()?,
            current_player_name: row.current_player_name,
            finished: row.finished,
        })
    }
}

impl TryFrom<PieceRow> for Piece {
    type Error = Error;

    fn try_from(row: PieceRow) -> Result<Self> {
        Ok(Piece {
            id: parse_id("piece id", &row.id)?,
            game_id: parse_id("game_id", &row.game_id)?,
            player_id: parse_id("player_id", &row.player_id)?,
            row: parse_index("row_idx", row.row_idx)?,
            col: parse_index("col_idx", row.col_idx)?,
        })
    }
}
