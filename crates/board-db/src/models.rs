/// Database row types. These map directly to SQLite rows and stay
/// independent of the wire types in board-types.

#[derive(Debug, Clone)]
pub struct GridEntryRow {
    pub id: i64,
    pub x: i64,
    pub y: i64,
    pub name: String,
    pub message: String,
    pub timestamp: String,
}

#[derive(Debug, Clone)]
pub struct TodoRow {
    pub id: i64,
    pub title: String,
    pub created_at: String,
}
