// SQLite persistence for recommendation history ("what did we recommend
// before" queries).

use std::sync::{Mutex, MutexGuard};

use anyhow::{Context, Result};
use rusqlite::{params, Connection};

/// One saved recommendation email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub id: i64,
    /// ISO-8601 UTC timestamp, assigned by SQLite at insert time.
    pub sent_at: String,
    pub subject: String,
    pub body: String,
}

/// SQLite-backed history of sent recommendations.
pub struct HistoryDb {
    conn: Mutex<Connection>,
}

impl HistoryDb {
    /// Open (or create) the history database at `path` and ensure the schema
    /// exists. Pass `":memory:"` for an ephemeral in-memory database (useful
    /// for tests).
    pub fn open(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("failed to open history database at {path}"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA busy_timeout = 5000;",
        )
        .context("failed to set database pragmas")?;

        conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS recommendations (
                id      INTEGER PRIMARY KEY AUTOINCREMENT,
                sent_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
                subject TEXT NOT NULL,
                body    TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_recommendations_sent_at
                ON recommendations(sent_at);
            ",
        )
        .context("failed to create history schema")?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Acquire the database connection.
    ///
    /// Panics if the mutex is poisoned (another thread panicked while holding
    /// the lock). This should never happen in normal operation.
    fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().expect("history database mutex poisoned")
    }

    /// Append a recommendation to the history. Timestamp is assigned by
    /// SQLite.
    pub fn save(&self, subject: &str, body: &str) -> Result<i64> {
        let conn = self.conn();
        conn.execute(
            "INSERT INTO recommendations (subject, body) VALUES (?1, ?2)",
            params![subject, body],
        )
        .context("failed to save recommendation")?;
        Ok(conn.last_insert_rowid())
    }

    /// Entries from the last `weeks_back` weeks, newest first.
    pub fn recent(&self, weeks_back: u32) -> Result<Vec<HistoryEntry>> {
        let conn = self.conn();
        let cutoff_modifier = format!("-{} days", weeks_back * 7);
        let mut stmt = conn
            .prepare(
                "SELECT id, sent_at, subject, body FROM recommendations
                 WHERE sent_at >= strftime('%Y-%m-%dT%H:%M:%fZ', 'now', ?1)
                 ORDER BY sent_at DESC, id DESC",
            )
            .context("failed to prepare recent-history query")?;

        let entries = stmt
            .query_map(params![cutoff_modifier], row_to_entry)
            .context("failed to query recent history")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .context("failed to map history rows")?;

        Ok(entries)
    }

    /// Entries whose subject or body contains `term`, case-insensitive,
    /// newest first.
    pub fn search(&self, term: &str) -> Result<Vec<HistoryEntry>> {
        let conn = self.conn();
        let pattern = format!("%{}%", term.to_lowercase());
        let mut stmt = conn
            .prepare(
                "SELECT id, sent_at, subject, body FROM recommendations
                 WHERE lower(subject) LIKE ?1 OR lower(body) LIKE ?1
                 ORDER BY sent_at DESC, id DESC",
            )
            .context("failed to prepare history search query")?;

        let entries = stmt
            .query_map(params![pattern], row_to_entry)
            .context("failed to search history")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .context("failed to map history rows")?;

        Ok(entries)
    }
}

fn row_to_entry(row: &rusqlite::Row<'_>) -> rusqlite::Result<HistoryEntry> {
    Ok(HistoryEntry {
        id: row.get(0)?,
        sent_at: row.get(1)?,
        subject: row.get(2)?,
        body: row.get(3)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_and_recall_round_trip() {
        let db = HistoryDb::open(":memory:").unwrap();
        db.save("Weekly Analysis - Week of Oct 14", "Drop A, pick up B.")
            .unwrap();
        db.save("Weekly Analysis - Week of Oct 21", "No opportunities found.")
            .unwrap();

        let entries = db.recent(4).unwrap();
        assert_eq!(entries.len(), 2);
        // Newest first.
        assert_eq!(entries[0].subject, "Weekly Analysis - Week of Oct 21");
        assert_eq!(entries[1].body, "Drop A, pick up B.");
    }

    #[test]
    fn recent_is_empty_on_fresh_database() {
        let db = HistoryDb::open(":memory:").unwrap();
        assert!(db.recent(4).unwrap().is_empty());
    }

    #[test]
    fn search_matches_subject_and_body_case_insensitively() {
        let db = HistoryDb::open(":memory:").unwrap();
        db.save("Streaming picks", "Drop Frank Vatrano, pick up Alex Lafreniere.")
            .unwrap();
        db.save("Quiet week", "No beneficial opportunities.").unwrap();

        assert_eq!(db.search("VATRANO").unwrap().len(), 1);
        assert_eq!(db.search("streaming").unwrap().len(), 1);
        assert_eq!(db.search("nothing-here").unwrap().len(), 0);
    }

    #[test]
    fn save_returns_increasing_row_ids() {
        let db = HistoryDb::open(":memory:").unwrap();
        let first = db.save("a", "b").unwrap();
        let second = db.save("c", "d").unwrap();
        assert!(second > first);
    }
}
