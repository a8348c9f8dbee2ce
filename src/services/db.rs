use crate::models::history_types::VerificationRecord;
use crate::models::validation_types::Verdict;
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use rusqlite::{params, Connection, Result, Row};
use std::path::Path;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

impl ToSql for Verdict {
    fn to_sql(&self) -> Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for Verdict {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        match value.as_str()? {
            "real" => Ok(Verdict::Real),
            "fake" => Ok(Verdict::Fake),
            other => Err(FromSqlError::Other(
                format!("unknown verdict: {}", other).into(),
            )),
        }
    }
}

#[derive(Clone)]
pub struct HistoryDb {
    conn: Arc<Mutex<Connection>>,
}

impl HistoryDb {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;

        // WAL mode for better concurrency and performance
        conn.execute_batch("PRAGMA journal_mode = WAL;")?;
        conn.execute_batch("PRAGMA synchronous = NORMAL;")?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS verification_history (
                id TEXT PRIMARY KEY,
                file_name TEXT NOT NULL,
                file_path TEXT,
                result TEXT NOT NULL,
                probability REAL,
                verified_at INTEGER NOT NULL
            )",
            [],
        )?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_history_result ON verification_history(result)",
            [],
        )?;
        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_history_verified_at ON verification_history(verified_at)",
            [],
        )?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Insert one completed validation and return the stored record.
    pub fn record(
        &self,
        file_name: &str,
        result: Verdict,
        probability: Option<f64>,
        file_path: Option<&str>,
    ) -> Result<VerificationRecord> {
        let record = VerificationRecord {
            id: Uuid::new_v4().to_string(),
            file_name: file_name.to_string(),
            file_path: file_path.map(|p| p.to_string()),
            result,
            probability,
            verified_at: now_unix(),
        };

        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO verification_history (id, file_name, file_path, result, probability, verified_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                record.id,
                record.file_name,
                record.file_path,
                record.result,
                record.probability,
                record.verified_at
            ],
        )?;

        Ok(record)
    }

    pub fn get_by_id(&self, id: &str) -> Result<Option<VerificationRecord>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT id, file_name, file_path, result, probability, verified_at
             FROM verification_history WHERE id = ?1",
        )?;
        let mut rows = stmt.query_map(params![id], row_to_record)?;
        rows.next().transpose()
    }

    /// Most recent validations first.
    pub fn recent(&self, limit: usize) -> Result<Vec<VerificationRecord>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT id, file_name, file_path, result, probability, verified_at
             FROM verification_history ORDER BY verified_at DESC, id LIMIT ?1",
        )?;
        let rows = stmt.query_map(params![limit as i64], row_to_record)?;
        rows.collect()
    }

    pub fn find_by_result(&self, result: Verdict) -> Result<Vec<VerificationRecord>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT id, file_name, file_path, result, probability, verified_at
             FROM verification_history WHERE result = ?1 ORDER BY verified_at DESC, id",
        )?;
        let rows = stmt.query_map(params![result], row_to_record)?;
        rows.collect()
    }

    /// Records with `from <= verified_at <= to` (unix seconds).
    pub fn find_by_date_range(&self, from: i64, to: i64) -> Result<Vec<VerificationRecord>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT id, file_name, file_path, result, probability, verified_at
             FROM verification_history
             WHERE verified_at >= ?1 AND verified_at <= ?2
             ORDER BY verified_at DESC, id",
        )?;
        let rows = stmt.query_map(params![from, to], row_to_record)?;
        rows.collect()
    }

    /// Returns true when a row was actually removed.
    pub fn delete(&self, id: &str) -> Result<bool> {
        let conn = self.conn.lock().unwrap();
        let changed = conn.execute("DELETE FROM verification_history WHERE id = ?1", params![id])?;
        Ok(changed > 0)
    }
}

fn row_to_record(row: &Row<'_>) -> Result<VerificationRecord> {
    Ok(VerificationRecord {
        id: row.get(0)?,
        file_name: row.get(1)?,
        file_path: row.get(2)?,
        result: row.get(3)?,
        probability: row.get(4)?,
        verified_at: row.get(5)?,
    })
}

fn now_unix() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0) as i64
}
