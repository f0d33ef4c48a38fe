use crate::error::Result;
use crate::model::{CommitRecord, CommitterCount};
use rusqlite::{params, Connection};
use std::path::{Path, PathBuf};
use tracing::debug;

pub const DEFAULT_DB_PATH: &str = "github_commits.db";

/// SQLite-backed commit table. Each operation opens its own connection.
pub struct CommitStore {
    path: PathBuf,
}

impl CommitStore {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn connect(&self) -> Result<Connection> {
        Ok(Connection::open(&self.path)?)
    }

    pub fn ensure_schema(&self) -> Result<()> {
        let conn = self.connect()?;
        create_schema(&conn)
    }

    /// Insert records, ignoring any whose sha is already stored. Returns the
    /// number of rows actually written.
    pub fn upsert(&self, records: &[CommitRecord]) -> Result<usize> {
        let mut conn = self.connect()?;
        create_schema(&conn)?;

        let tx = conn.transaction()?;
        let mut inserted = 0;
        {
            let mut stmt = tx.prepare(
                "INSERT OR IGNORE INTO commits (sha, committer_login, commit_date, message)
                 VALUES (?, ?, ?, ?)",
            )?;
            for record in records {
                inserted += stmt.execute(params![
                    record.sha,
                    record.committer_login,
                    record.commit_date,
                    record.message
                ])?;
            }
        }
        tx.commit()?;

        debug!(offered = records.len(), inserted, "loaded commits");
        Ok(inserted)
    }

    pub fn drop_all(&self) -> Result<()> {
        let conn = self.connect()?;
        conn.execute_batch("DROP TABLE IF EXISTS commits;")?;
        Ok(())
    }

    pub fn count(&self) -> Result<u64> {
        let conn = self.connect()?;
        create_schema(&conn)?;
        let n: i64 = conn.query_row("SELECT COUNT(*) FROM commits", [], |row| row.get(0))?;
        Ok(n as u64)
    }

    pub fn contains(&self, sha: &str) -> Result<bool> {
        let conn = self.connect()?;
        create_schema(&conn)?;
        let found: i64 = conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM commits WHERE sha = ?)",
            params![sha],
            |row| row.get(0),
        )?;
        Ok(found != 0)
    }

    pub fn get_commit(&self, sha: &str) -> Result<Option<CommitRecord>> {
        let conn = self.connect()?;
        create_schema(&conn)?;
        let result = conn.query_row(
            "SELECT sha, committer_login, commit_date, message FROM commits WHERE sha = ?",
            params![sha],
            |row| {
                Ok(CommitRecord {
                    sha: row.get(0)?,
                    committer_login: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
                    commit_date: row.get(2)?,
                    message: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
                })
            },
        );
        match result {
            Ok(record) => Ok(Some(record)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Committers ordered by commit count, ties broken alphabetically.
    pub fn top_committers(&self, limit: usize) -> Result<Vec<CommitterCount>> {
        let conn = self.connect()?;
        create_schema(&conn)?;
        let mut stmt = conn.prepare(
            "SELECT committer_login, COUNT(*) AS commit_count
             FROM commits
             WHERE committer_login IS NOT NULL
             GROUP BY committer_login
             ORDER BY commit_count DESC, committer_login ASC
             LIMIT ?",
        )?;
        let rows = stmt.query_map(params![limit as i64], |row| {
            Ok(CommitterCount {
                login: row.get(0)?,
                commits: row.get(1)?,
            })
        })?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// `(login, commit_date)` pairs ordered by login, then date.
    pub fn commit_dates_by_committer(&self) -> Result<Vec<(String, String)>> {
        let conn = self.connect()?;
        create_schema(&conn)?;
        let mut stmt = conn.prepare(
            "SELECT committer_login, commit_date
             FROM commits
             WHERE committer_login IS NOT NULL
             ORDER BY committer_login, commit_date",
        )?;
        let rows = stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    pub fn commit_dates(&self) -> Result<Vec<String>> {
        let conn = self.connect()?;
        create_schema(&conn)?;
        let mut stmt = conn.prepare("SELECT commit_date FROM commits ORDER BY commit_date")?;
        let rows = stmt.query_map([], |row| row.get(0))?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }
}

fn create_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS commits (
            sha TEXT PRIMARY KEY,
            committer_login TEXT,
            commit_date TEXT,
            message TEXT
        );
        CREATE INDEX IF NOT EXISTS idx_commits_login ON commits(committer_login);
        ",
    )?;
    Ok(())
}
