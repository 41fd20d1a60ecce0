use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

use rusqlite::{Connection, params};
use serde::{Deserialize, Serialize};

use crate::LeaderboardError;
use crate::validate::NewScore;

/// One leaderboard row as served to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreEntry {
    pub name: String,
    pub score: u64,
    pub time_seconds: u64,
    /// SQLite `datetime('now')`, UTC.
    pub created_at: String,
}

/// SQLite-backed score table.
pub struct Leaderboard {
    conn: Mutex<Connection>,
}

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS scores (
    id           INTEGER PRIMARY KEY AUTOINCREMENT,
    player_name  TEXT NOT NULL,
    score        INTEGER NOT NULL CHECK (score >= 0),
    time_seconds INTEGER NOT NULL CHECK (time_seconds >= 0),
    created_at   TEXT NOT NULL DEFAULT (datetime('now'))
);";

impl Leaderboard {
    /// Open (or create) the database file and ensure the table exists.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, LeaderboardError> {
        let path = path.as_ref();
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA busy_timeout=5000;")?;
        tracing::info!(path = %path.display(), "leaderboard database opened");
        Self::with_connection(conn)
    }

    pub fn open_in_memory() -> Result<Self, LeaderboardError> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self, LeaderboardError> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Insert a validated score and return its row id.
    pub fn submit(&self, entry: &NewScore) -> Result<i64, LeaderboardError> {
        let conn = self.conn();
        conn.execute(
            "INSERT INTO scores (player_name, score, time_seconds) VALUES (?1, ?2, ?3)",
            params![entry.name, entry.score as i64, entry.time_seconds as i64],
        )?;
        let id = conn.last_insert_rowid();
        tracing::debug!(id, name = %entry.name, score = entry.score, "score stored");
        Ok(id)
    }

    /// Best `limit` scores; ties go to the earlier submission.
    pub fn top(&self, limit: usize) -> Result<Vec<ScoreEntry>, LeaderboardError> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT player_name, score, time_seconds, created_at
             FROM scores
             ORDER BY score DESC, created_at ASC, id ASC
             LIMIT ?1",
        )?;
        let rows = stmt.query_map(params![limit as i64], |row| {
            Ok(ScoreEntry {
                name: row.get(0)?,
                score: row.get::<_, i64>(1)? as u64,
                time_seconds: row.get::<_, i64>(2)? as u64,
                created_at: row.get(3)?,
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    pub fn count(&self) -> Result<u64, LeaderboardError> {
        let n: i64 = self
            .conn()
            .query_row("SELECT COUNT(*) FROM scores", [], |row| row.get(0))?;
        Ok(n as u64)
    }
}
