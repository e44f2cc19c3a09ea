use std::path::Path;
use std::sync::Mutex;

use rusqlite::{params, Connection, OptionalExtension};
use serde_json::Value;
use tracing::debug;

use crate::survey::types::SurveyDefinition;

use super::{merge_patch, new_record, StoreError, SurveyRepository};

/// Survey table backed by a single SQLite file. Each survey is kept as its
/// JSON document so unknown top-level fields survive a round trip.
pub struct SqliteRepository {
    conn: Mutex<Connection>,
}

impl SqliteRepository {
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        debug!(path = %path.display(), "opening survey database");
        Self::with_connection(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self, StoreError> {
        init_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

fn init_schema(conn: &Connection) -> Result<(), StoreError> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS surveys (
            id TEXT PRIMARY KEY,
            document TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT
          );",
    )?;
    Ok(())
}

fn decode(document: &str) -> Result<SurveyDefinition, StoreError> {
    Ok(serde_json::from_str(document)?)
}

fn load(conn: &Connection, id: &str) -> Result<SurveyDefinition, StoreError> {
    let document: Option<String> = conn
        .query_row(
            "SELECT document FROM surveys WHERE id = ?1",
            params![id],
            |row| row.get(0),
        )
        .optional()?;
    match document {
        Some(document) => decode(&document),
        None => Err(StoreError::NotFound(id.to_string())),
    }
}

impl SurveyRepository for SqliteRepository {
    fn create(&self, draft: Value) -> Result<SurveyDefinition, StoreError> {
        let record = new_record(draft)?;
        let document = serde_json::to_string(&record)?;
        let conn = self.conn.lock().map_err(|_| StoreError::Poisoned)?;
        conn.execute(
            "INSERT INTO surveys (id, document, created_at) VALUES (?1, ?2, ?3)",
            params![record.id, document, record.created_at],
        )?;
        Ok(record)
    }

    fn get_by_id(&self, id: &str) -> Result<SurveyDefinition, StoreError> {
        let conn = self.conn.lock().map_err(|_| StoreError::Poisoned)?;
        load(&conn, id)
    }

    fn list(&self) -> Result<Vec<SurveyDefinition>, StoreError> {
        let conn = self.conn.lock().map_err(|_| StoreError::Poisoned)?;
        let mut stmt = conn.prepare("SELECT document FROM surveys ORDER BY rowid ASC")?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

        let mut surveys = Vec::new();
        for row in rows {
            surveys.push(decode(&row?)?);
        }
        Ok(surveys)
    }

    fn update(&self, id: &str, patch: Value) -> Result<SurveyDefinition, StoreError> {
        let conn = self.conn.lock().map_err(|_| StoreError::Poisoned)?;
        let existing = load(&conn, id)?;
        let merged = merge_patch(&existing, patch)?;
        let document = serde_json::to_string(&merged)?;
        conn.execute(
            "UPDATE surveys SET document = ?1, updated_at = ?2 WHERE id = ?3",
            params![document, merged.updated_at, id],
        )?;
        Ok(merged)
    }

    fn delete(&self, id: &str) -> Result<(), StoreError> {
        let conn = self.conn.lock().map_err(|_| StoreError::Poisoned)?;
        let removed = conn.execute("DELETE FROM surveys WHERE id = ?1", params![id])?;
        if removed == 0 {
            return Err(StoreError::NotFound(id.to_string()));
        }
        Ok(())
    }
}
