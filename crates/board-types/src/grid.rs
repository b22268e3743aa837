/// Grid dimensions shared by the server and the browser client.
pub const GRID_WIDTH: i64 = 80;
pub const GRID_HEIGHT: i64 = 25;

/// True when `(x, y)` names a cell inside the grid.
pub fn in_bounds(x: i64, y: i64) -> bool {
    (0..GRID_WIDTH).contains(&x) && (0..GRID_HEIGHT).contains(&y)
}
