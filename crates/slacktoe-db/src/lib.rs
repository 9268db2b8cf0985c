pub mod migrations;
pub mod models;
pub mod queries;

use anyhow::{Result, anyhow};
use rusqlite::{Connection, TransactionBehavior};
use std::path::Path;
use std::sync::Mutex;
use tracing::info;

use slacktoe_game::{GameError, GameStore, Repository};

use crate::queries::SqliteRepo;

pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;

        // WAL mode for concurrent reads
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "foreign_keys", "ON")?;
        conn.busy_timeout(std::time::Duration::from_secs(5))?;

        migrations::run(&conn)?;

        info!("Database opened at {}", path.display());
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Private throwaway database, used by tests.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.pragma_update(None, "foreign_keys", "ON")?;
        migrations::run(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

impl GameStore for Database {
    /// Runs `f` inside `BEGIN IMMEDIATE`. The connection mutex serializes
    /// callers in this process and the immediate write lock serializes other
    /// processes sharing the file, so read-modify-write sequences never see
    /// stale state.
    fn transaction<T, F>(&self, f: F) -> Result<T, GameError>
    where
        F: FnOnce(&dyn Repository) -> Result<T, GameError>,
    {
        let mut conn = self.conn.lock().map_err(|e| anyhow!("DB lock poisoned: {}", e))?;
        let tx = conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(anyhow::Error::from)?;

        // dropping `tx` on the error path rolls back
        let out = f(&SqliteRepo::new(&tx))?;

        tx.commit().map_err(anyhow::Error::from)?;
        Ok(out)
    }
}
