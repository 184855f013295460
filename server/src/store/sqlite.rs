//! SQLite-backed `TodoStore`.
//!
//! # Invariants
//! - The `todos` table exists before the store is handed out.
//! - Timestamps are stored as ISO-8601 text and must parse back on read;
//!   rows that do not are reported as storage failures, not skipped.
//! - All connection work runs on tokio's blocking pool.

use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Instant;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::{debug, error, info};

use super::{StoreError, StoreResult, TodoStore};
use crate::model::Todo;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

const SCHEMA_SQL: &str = "CREATE TABLE IF NOT EXISTS todos (
    id TEXT PRIMARY KEY NOT NULL,
    title TEXT NOT NULL,
    date_created TEXT NOT NULL,
    date_completed TEXT NULL,
    is_complete INTEGER NOT NULL DEFAULT 0
);";

const TODO_SELECT_SQL: &str = "SELECT id, title, date_created, date_completed, is_complete FROM todos";

/// Raw column values before timestamp parsing.
type RawRow = (String, String, String, Option<String>, bool);

#[derive(Clone, Debug)]
pub struct SqliteTodoStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteTodoStore {
    /// Opens (or creates) a database file and ensures the schema.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        let started_at = Instant::now();
        let conn = Connection::open(path).map_err(|err| {
            error!(path = %path.display(), error = %err, "sqlite open failed");
            StoreError::from(err)
        })?;
        let store = Self::bootstrap(conn)?;
        info!(
            path = %path.display(),
            duration_ms = started_at.elapsed().as_millis() as u64,
            "sqlite store opened"
        );
        Ok(store)
    }

    /// Private in-memory database; dropped with the last clone.
    pub fn open_in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self::bootstrap(conn)?;
        info!("sqlite store opened in memory");
        Ok(store)
    }

    fn bootstrap(conn: Connection) -> StoreResult<Self> {
        conn.execute_batch(SCHEMA_SQL)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    async fn with_conn<T, F>(&self, f: F) -> StoreResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> StoreResult<T> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let guard = conn
                .lock()
                .map_err(|_| StoreError::Storage("sqlite connection lock poisoned".to_string()))?;
            f(&guard)
        })
        .await?
    }
}

#[async_trait]
impl TodoStore for SqliteTodoStore {
    async fn list_all(&self) -> StoreResult<Vec<Todo>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(TODO_SELECT_SQL)?;
            let rows = stmt.query_map([], read_raw)?;
            let mut todos = Vec::new();
            for row in rows {
                todos.push(into_todo(row?)?);
            }
            debug!(count = todos.len(), "listed todos");
            Ok(todos)
        })
        .await
    }

    async fn find_by_id(&self, id: &str) -> StoreResult<Todo> {
        let id = id.to_string();
        self.with_conn(move |conn| match fetch(conn, &id)? {
            Some(todo) => Ok(todo),
            None => Err(StoreError::NotFound(id)),
        })
        .await
    }

    async fn insert(&self, todo: &Todo) -> StoreResult<()> {
        let todo = todo.clone();
        self.with_conn(move |conn| {
            let changed = conn.execute(
                "INSERT OR IGNORE INTO todos (id, title, date_created, date_completed, is_complete)
                 VALUES (?1, ?2, ?3, ?4, ?5);",
                params![
                    todo.id,
                    todo.title,
                    format_timestamp(&todo.date_created),
                    todo.date_completed.as_ref().map(format_timestamp),
                    todo.is_complete,
                ],
            )?;
            if changed == 0 {
                return Err(StoreError::Rejected(format!(
                    "insert of {} affected no rows",
                    todo.id
                )));
            }
            Ok(())
        })
        .await
    }

    async fn remove(&self, id: &str) -> StoreResult<()> {
        let id = id.to_string();
        self.with_conn(move |conn| {
            if fetch(conn, &id)?.is_none() {
                return Err(StoreError::NotFound(id));
            }
            let changed = conn.execute("DELETE FROM todos WHERE id = ?1;", params![id])?;
            if changed == 0 {
                return Err(StoreError::Rejected(format!(
                    "delete of {id} affected no rows"
                )));
            }
            Ok(())
        })
        .await
    }
}

fn fetch(conn: &Connection, id: &str) -> StoreResult<Option<Todo>> {
    let raw = conn
        .query_row(
            &format!("{TODO_SELECT_SQL} WHERE id = ?1;"),
            params![id],
            read_raw,
        )
        .optional()?;
    raw.map(into_todo).transpose()
}

fn read_raw(row: &Row<'_>) -> rusqlite::Result<RawRow> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
    ))
}

fn into_todo((id, title, created, completed, is_complete): RawRow) -> StoreResult<Todo> {
    let date_created = parse_timestamp(&id, &created)?;
    let date_completed = completed
        .as_deref()
        .map(|value| parse_timestamp(&id, value))
        .transpose()?;
    Ok(Todo {
        id,
        title,
        date_created,
        date_completed,
        is_complete,
    })
}

fn format_timestamp(value: &NaiveDateTime) -> String {
    value.format(TIMESTAMP_FORMAT).to_string()
}

fn parse_timestamp(id: &str, value: &str) -> StoreResult<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT).map_err(|err| {
        StoreError::Storage(format!("todo {id} has invalid timestamp `{value}`: {err}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32, s: u32, nanos: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 2, 29)
            .unwrap()
            .and_hms_nano_opt(h, m, s, nanos)
            .unwrap()
    }

    #[test]
    fn timestamps_survive_text_encoding() {
        for value in [at(0, 0, 0, 0), at(23, 59, 59, 123_456_789), at(8, 30, 0, 500_000)] {
            let text = format_timestamp(&value);
            assert_eq!(parse_timestamp("x", &text).unwrap(), value, "{text}");
        }
    }

    #[test]
    fn garbage_timestamp_is_a_storage_error() {
        let err = parse_timestamp("x", "yesterday").unwrap_err();
        assert!(matches!(err, StoreError::Storage(msg) if msg.contains("yesterday")));
    }

    #[tokio::test]
    async fn in_memory_store_keeps_every_field() {
        let store = SqliteTodoStore::open_in_memory().unwrap();
        let mut todo = Todo::new("a", "Wash Dishes", at(9, 15, 0, 42_000));
        todo.date_completed = Some(at(10, 0, 0, 0));
        todo.is_complete = true;
        store.insert(&todo).await.unwrap();

        assert_eq!(store.find_by_id("a").await.unwrap(), todo);
    }

    #[tokio::test]
    async fn duplicate_id_affects_no_rows() {
        let store = SqliteTodoStore::open_in_memory().unwrap();
        store.insert(&Todo::new("a", "one", at(1, 0, 0, 0))).await.unwrap();

        let err = store
            .insert(&Todo::new("a", "two", at(2, 0, 0, 0)))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Rejected(_)));
        assert_eq!(store.find_by_id("a").await.unwrap().title, "one");
    }

    #[tokio::test]
    async fn corrupt_row_fails_list() {
        let store = SqliteTodoStore::open_in_memory().unwrap();
        store
            .with_conn(|conn| {
                conn.execute(
                    "INSERT INTO todos (id, title, date_created, is_complete) VALUES ('bad', 't', 'not-a-date', 0);",
                    [],
                )?;
                Ok(())
            })
            .await
            .unwrap();

        let err = store.list_all().await.unwrap_err();
        assert!(matches!(err, StoreError::Storage(_)));
    }
}
