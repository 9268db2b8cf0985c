use anyhow::{Result, anyhow};
use rusqlite::{Connection, OptionalExtension, Row, params};
use uuid::Uuid;

use slacktoe_game::{NewGame, Repository};
use slacktoe_types::models::{Challenge, Channel, Game, Piece, Player};

use crate::models::{ChallengeRow, ChannelRow, GameRow, PieceRow, PlayerRow};

const PLAYER_COLUMNS: &str = "id, channel_id, user_id, user_name";

/// [`Repository`] over one open SQLite transaction.
pub struct SqliteRepo<'a> {
    conn: &'a Connection,
}

impl<'a> SqliteRepo<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }
}

impl Repository for SqliteRepo<'_> {
    // -- Teams & channels --

    fn find_channel(
        &self,
        team_external_id: &str,
        channel_external_id: &str,
    ) -> Result<Option<Channel>> {
        query_channel(self.conn, team_external_id, channel_external_id)
    }

    fn upsert_channel(&self, team_external_id: &str, channel_external_id: &str) -> Result<Channel> {
        self.conn.execute(
            "INSERT INTO teams (id, external_id) VALUES (?1, ?2)
             ON CONFLICT(external_id) DO NOTHING",
            params![Uuid::new_v4().to_string(), team_external_id],
        )?;
        self.conn.execute(
            "INSERT INTO channels (id, team_id, external_id)
             SELECT ?1, id, ?3 FROM teams WHERE external_id = ?2
             ON CONFLICT(team_id, external_id) DO NOTHING",
            params![Uuid::new_v4().to_string(), team_external_id, channel_external_id],
        )?;

        query_channel(self.conn, team_external_id, channel_external_id)?
            .ok_or_else(|| anyhow!("Channel {} vanished after upsert", channel_external_id))
    }

    // -- Players --

    fn upsert_player(&self, channel_id: Uuid, user_id: &str, user_name: &str) -> Result<Player> {
        self.conn.execute(
            "INSERT INTO players (id, channel_id, user_id, user_name) VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(channel_id, user_id) DO UPDATE SET user_name = excluded.user_name",
            params![Uuid::new_v4().to_string(), channel_id.to_string(), user_id, user_name],
        )?;

        self.find_player(channel_id, user_id)?
            .ok_or_else(|| anyhow!("Player {} vanished after upsert", user_id))
    }

    fn find_player(&self, channel_id: Uuid, user_id: &str) -> Result<Option<Player>> {
        let sql =
            format!("SELECT {PLAYER_COLUMNS} FROM players WHERE channel_id = ?1 AND user_id = ?2");
        let row = self
            .conn
            .query_row(&sql, params![channel_id.to_string(), user_id], |row| {
                player_row(row, 0)
            })
            .optional()?;

        row.map(Player::try_from).transpose()
    }

    // -- Challenges --

    fn current_challenge(&self, channel: &Channel) -> Result<Option<Challenge>> {
        let row = self
            .conn
            .query_row(
                "SELECT ch.id, ch.channel_id, ch.opponent_name, ch.expired,
                        p.id, p.channel_id, p.user_id, p.user_name
                 FROM channels c
                 JOIN challenges ch ON ch.id = c.active_challenge_id
                 JOIN players p ON p.id = ch.challenger_id
                 WHERE c.id = ?1",
                [channel.id.to_string()],
                |row| {
                    Ok(ChallengeRow {
                        id: row.get(0)?,
                        channel_id: row.get(1)?,
                        opponent_name: row.get(2)?,
                        expired: row.get(3)?,
                        challenger: player_row(row, 4)?,
                    })
                },
            )
            .optional()?;

        row.map(Challenge::try_from).transpose()
    }

    fn insert_challenge(
        &self,
        channel_id: Uuid,
        challenger: &Player,
        opponent_name: &str,
    ) -> Result<Challenge> {
        let id = Uuid::new_v4();
        self.conn.execute(
            "INSERT INTO challenges (id, channel_id, challenger_id, opponent_name)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                id.to_string(),
                channel_id.to_string(),
                challenger.id.to_string(),
                opponent_name
            ],
        )?;
        self.conn.execute(
            "UPDATE channels SET active_challenge_id = ?1 WHERE id = ?2",
            params![id.to_string(), channel_id.to_string()],
        )?;

        Ok(Challenge {
            id,
            channel_id,
            challenger: challenger.clone(),
            opponent_name: opponent_name.to_string(),
            expired: false,
        })
    }

    fn expire_challenge(&self, challenge_id: Uuid) -> Result<()> {
        let updated = self.conn.execute(
            "UPDATE challenges SET expired = 1 WHERE id = ?1",
            [challenge_id.to_string()],
        )?;
        if updated == 0 {
            return Err(anyhow!("Challenge not found: {}", challenge_id));
        }
        Ok(())
    }

    // -- Games --

    fn current_game(&self, channel: &Channel) -> Result<Option<Game>> {
        let row = self
            .conn
            .query_row(
                "SELECT g.id, g.channel_id, g.board_size, g.current_player_name, g.finished,
                        p1.id, p1.channel_id, p1.user_id, p1.user_name,
                        p2.id, p2.channel_id, p2.user_id, p2.user_name
                 FROM channels c
                 JOIN games g ON g.id = c.active_game_id
                 JOIN players p1 ON p1.id = g.player1_id
                 JOIN players p2 ON p2.id = g.player2_id
                 WHERE c.id = ?1",
                [channel.id.to_string()],
                |row| {
                    Ok(GameRow {
                        id: row.get(0)?,
                        channel_id: row.get(1)?,
                        board_size: row.get(2)?,
                        current_player_name: row.get(3)?,
                        finished: row.get(4)?,
                        player1: player_row(row, 5)?,
                        player2: player_row(row, 9)?,
                    })
                },
            )
            .optional()?;

        row.map(Game::try_from).transpose()
    }

    fn insert_game(&self, new_game: NewGame<'_>) -> Result<Game> {
        let id = Uuid::new_v4();
        self.conn.execute(
            "INSERT INTO games
                 (id, channel_id, board_size, player1_id, player2_id, current_player_name)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                id.to_string(),
                new_game.channel_id.to_string(),
                new_game.board_size as i64,
                new_game.player1.id.to_string(),
                new_game.player2.id.to_string(),
                new_game.current_player_name,
            ],
        )?;
        self.conn.execute(
            "UPDATE channels SET active_game_id = ?1 WHERE id = ?2",
            params![id.to_string(), new_game.channel_id.to_string()],
        )?;

        Ok(Game {
            id,
            channel_id: new_game.channel_id,
            board_size: new_game.board_size,
            player1: new_game.player1.clone(),
            player2: new_game.player2.clone(),
            current_player_name: new_game.current_player_name.to_string(),
            finished: false,
        })
    }

    fn update_game(&self, game: &Game) -> Result<()> {
        let updated = self.conn.execute(
            "UPDATE games SET current_player_name = ?1, finished = ?2 WHERE id = ?3",
            params![game.current_player_name, game.finished, game.id.to_string()],
        )?;
        if updated == 0 {
            return Err(anyhow!("Game not found: {}", game.id));
        }
        Ok(())
    }

    // -- Pieces --

    fn pieces(&self, game_id: Uuid) -> Result<Vec<Piece>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, game_id, player_id, row_idx, col_idx FROM pieces WHERE game_id = ?1",
        )?;

        let rows = stmt
            .query_map([game_id.to_string()], |row| {
                Ok(PieceRow {
                    id: row.get(0)?,
                    game_id: row.get(1)?,
                    player_id: row.get(2)?,
                    row_idx: row.get(3)?,
                    col_idx: row.get(4)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        rows.into_iter().map(Piece::try_from).collect()
    }

    fn insert_piece(
        &self,
        game_id: Uuid,
        player_id: Uuid,
        row: usize,
        col: usize,
    ) -> Result<Piece> {
        let id = Uuid::new_v4();
        self.conn.execute(
            "INSERT INTO pieces (id, game_id, player_id, row_idx, col_idx)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                id.to_string(),
                game_id.to_string(),
                player_id.to_string(),
                row as i64,
                col as i64
            ],
        )?;

        Ok(Piece {
            id,
            game_id,
            player_id,
            row,
            col,
        })
    }
}

fn query_channel(
    conn: &Connection,
    team_external_id: &str,
    channel_external_id: &str,
) -> Result<Option<Channel>> {
    let row = conn
        .query_row(
            "SELECT c.id, c.team_id, c.external_id, c.active_challenge_id, c.active_game_id
             FROM channels c
             JOIN teams t ON t.id = c.team_id
             WHERE t.external_id = ?1 AND c.external_id = ?2",
            params![team_external_id, channel_external_id],
            |row| {
                Ok(ChannelRow {
                    id: row.get(0)?,
                    team_id: row.get(1)?,
                    external_id: row.get(2)?,
                    active_challenge_id: row.get(3)?,
                    active_game_id: row.get(4)?,
                })
            },
        )
        .optional()?;

    row.map(Channel::try_from).transpose()
}

/// Reads the four player columns starting at `base`.
fn player_row(row: &Row<'_>, base: usize) -> rusqlite::Result<PlayerRow> {
    Ok(PlayerRow {
        id: row.get(base)?,
        channel_id: row.get(base + 1)?,
        user_id: row.get(base + 2)?,
        user_name: row.get(base + 3)?,
    })
}
