use crate::Database;
use crate::models::{GridEntryRow, TodoRow};
use anyhow::Result;
use rusqlite::{Connection, ErrorCode};

impl Database {
    // -- Grid entries --

    /// All entries, newest first. `id` breaks ties between rows written in
    /// the same second.
    pub fn list_grid_entries(&self) -> Result<Vec<GridEntryRow>> {
        self.with_conn(query_grid_entries)
    }

    pub fn count_grid_entries(&self) -> Result<i64> {
        self.with_conn(|conn| {
            let count = conn.query_row("SELECT COUNT(*) FROM grid_entries", [], |row| row.get(0))?;
            Ok(count)
        })
    }

    // -- Todos --

    pub fn insert_todo(&self, title: &str) -> Result<i64> {
        self.with_conn(|conn| {
            conn.execute("INSERT INTO todos (title) VALUES (?1)", [title])?;
            Ok(conn.last_insert_rowid())
        })
    }

    pub fn latest_todo(&self) -> Result<Option<TodoRow>> {
        self.with_conn(|conn| {
            let row = conn
                .query_row(
                    "SELECT id, title, created_at FROM todos ORDER BY id DESC LIMIT 1",
                    [],
                    |row| {
                        Ok(TodoRow {
                            id: row.get(0)?,
                            title: row.get(1)?,
                            created_at: row.get(2)?,
                        })
                    },
                )
                .optional()?;
            Ok(row)
        })
    }
}

/// True when some entry already holds `(x, y)`.
pub fn cell_occupied(conn: &Connection, x: i64, y: i64) -> Result<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM grid_entries WHERE x = ?1 AND y = ?2",
        [x, y],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

/// Insert one entry and return its storage-assigned id.
pub fn insert_grid_entry(
    conn: &Connection,
    x: i64,
    y: i64,
    name: &str,
    message: &str,
) -> Result<i64> {
    conn.execute(
        "INSERT INTO grid_entries (x, y, name, message) VALUES (?1, ?2, ?3, ?4)",
        rusqlite::params![x, y, name, message],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn query_grid_entry(conn: &Connection, id: i64) -> Result<Option<GridEntryRow>> {
    let mut stmt = conn.prepare(
        "SELECT id, x, y, name, message, timestamp FROM grid_entries WHERE id = ?1",
    )?;

    let row = stmt.query_row([id], map_grid_entry).optional()?;
    Ok(row)
}

fn query_grid_entries(conn: &Connection) -> Result<Vec<GridEntryRow>> {
    let mut stmt = conn.prepare(
        "SELECT id, x, y, name, message, timestamp
         FROM grid_entries
         ORDER BY timestamp DESC, id DESC",
    )?;

    let rows = stmt
        .query_map([], map_grid_entry)?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}

fn map_grid_entry(row: &rusqlite::Row<'_>) -> rusqlite::Result<GridEntryRow> {
    Ok(GridEntryRow {
        id: row.get(0)?,
        x: row.get(1)?,
        y: row.get(2)?,
        name: row.get(3)?,
        message: row.get(4)?,
        timestamp: row.get::<_, Option<String>>(5)?.unwrap_or_default(),
    })
}

/// True when `err` came from the `(x, y)` uniqueness constraint.
pub fn is_unique_violation(err: &anyhow::Error) -> bool {
    match err.downcast_ref::<rusqlite::Error>() {
        Some(rusqlite::Error::SqliteFailure(e, _)) => {
            e.code == ErrorCode::ConstraintViolation
                && e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
        }
        _ => false,
    }
}

/// Extension trait for optional query results
trait OptionalExt<T> {
    fn optional(self) -> Result<Option<T>>;
}

impl<T> OptionalExt<T> for std::result::Result<T, rusqlite::Error> {
    fn optional(self) -> Result<Option<T>> {
        match self {
            Ok(val) => Ok(Some(val)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
