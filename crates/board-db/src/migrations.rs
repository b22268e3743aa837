use anyhow::Result;
use rusqlite::Connection;
use tracing::info;

/// Which service the database file belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schema {
    Grid,
    Todo,
}

pub fn run(conn: &Connection, schema: Schema) -> Result<()> {
    match schema {
        Schema::Grid => create_grid(conn)?,
        Schema::Todo => reset_todos(conn)?,
    }

    info!("Database schema ready ({:?})", schema);
    Ok(())
}

fn create_grid(conn: &Connection) -> Result<()> {
    // The unique index fails to build on a file that already holds two
    // entries for one cell; startup aborts in that case.
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS grid_entries (
            id          INTEGER NOT NULL PRIMARY KEY AUTOINCREMENT,
            x           INTEGER NOT NULL,
            y           INTEGER NOT NULL,
            name        TEXT NOT NULL,
            message     TEXT NOT NULL,
            timestamp   DATETIME DEFAULT CURRENT_TIMESTAMP
        );

        CREATE UNIQUE INDEX IF NOT EXISTS idx_grid_entries_cell
            ON grid_entries(x, y);

        CREATE INDEX IF NOT EXISTS idx_grid_entries_timestamp
            ON grid_entries(timestamp);
        ",
    )?;
    Ok(())
}

/// The todo board starts empty on every launch.
pub fn reset_todos(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        DROP TABLE IF EXISTS todos;

        CREATE TABLE todos (
            id          INTEGER NOT NULL PRIMARY KEY AUTOINCREMENT,
            title       TEXT NOT NULL,
            created_at  TEXT NOT NULL DEFAULT (datetime('now'))
        );
        ",
    )?;
    Ok(())
}
