use anyhow::Result;
use rusqlite::Connection;
use tracing::info;

pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch("CREATE TABLE IF NOT EXISTS schema_version (version INTEGER NOT NULL);")?;

    let version: i64 = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |r| r.get(0),
    )?;

    if version < 1 {
        info!("Running migration v1 (initial schema)");
        conn.execute_batch(
            "
            CREATE TABLE teams (
                id          TEXT PRIMARY KEY,
                external_id TEXT NOT NULL UNIQUE,
                created_at  TEXT NOT NULL DEFAULT (datetime('now'))
            );

            CREATE TABLE channels (
                id                  TEXT PRIMARY KEY,
                team_id             TEXT NOT NULL REFERENCES teams(id),
                external_id         TEXT NOT NULL,
                active_challenge_id TEXT,
                active_game_id      TEXT,
                created_at          TEXT NOT NULL DEFAULT (datetime('now')),
                UNIQUE(team_id, external_id)
            );

            CREATE TABLE players (
                id          TEXT PRIMARY KEY,
                channel_id  TEXT NOT NULL REFERENCES channels(id),
                user_id     TEXT NOT NULL,
                user_name   TEXT NOT NULL,
                created_at  TEXT NOT NULL DEFAULT (datetime('now')),
                UNIQUE(channel_id, user_id)
            );

            CREATE TABLE challenges (
                id              TEXT PRIMARY KEY,
                channel_id      TEXT NOT NULL REFERENCES channels(id),
                challenger_id   TEXT NOT NULL REFERENCES players(id),
                opponent_name   TEXT NOT NULL,
                expired         INTEGER NOT NULL DEFAULT 0,
                created_at      TEXT NOT NULL DEFAULT (datetime('now'))
            );

            CREATE INDEX idx_challenges_channel ON challenges(channel_id);

            CREATE TABLE games (
                id                  TEXT PRIMARY KEY,
                channel_id          TEXT NOT NULL REFERENCES channels(id),
                board_size          INTEGER NOT NULL,
                player1_id          TEXT NOT NULL REFERENCES players(id),
                player2_id          TEXT NOT NULL REFERENCES players(id),
                current_player_name TEXT NOT NULL,
                finished            INTEGER NOT NULL DEFAULT 0,
                created_at          TEXT NOT NULL DEFAULT (datetime('now'))
            );

            CREATE INDEX idx_games_channel ON games(channel_id);

            CREATE TABLE pieces (
                id          TEXT PRIMARY KEY,
                game_id     TEXT NOT NULL REFERENCES games(id),
                player_id   TEXT NOT NULL REFERENCES players(id),
                row_idx     INTEGER NOT NULL CHECK (row_idx >= 0 AND row_idx < 3),
                col_idx     INTEGER NOT NULL CHECK (col_idx >= 0 AND col_idx < 3),
                created_at  TEXT NOT NULL DEFAULT (datetime('now')),
                UNIQUE(game_id, row_idx, col_idx)
            );

            INSERT INTO schema_version (version) VALUES (1);
            ",
        )?;
    }

    info!("Database migrations complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn running_twice_is_harmless() {
        let conn = Connection::open_in_memory().unwrap();
        run(&conn).unwrap();
        run(&conn).unwrap();

        let versions: i64 = conn
            .query_row("SELECT COUNT(*) FROM schema_version", [], |r| r.get(0))
            .unwrap();
        assert_eq!(versions, 1);
    }

    #[test]
    fn pieces_stay_on_the_board() {
        let conn = Connection::open_in_memory().unwrap();
        run(&conn).unwrap();

        let insert = |id: &str, row: i64, col: i64| {
            conn.execute(
                "INSERT INTO pieces (id, game_id, player_id, row_idx, col_idx)
                 VALUES (?1, 'g', 'p', ?2, ?3)",
                rusqlite::params![id, row, col],
            )
        };

        assert!(insert("a", 2, 2).is_ok());
        assert!(insert("b", 3, 0).is_err());
        assert!(insert("c", 0, 3).is_err());
        assert!(insert("d", -1, 0).is_err());
    }
}
