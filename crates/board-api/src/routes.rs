use std::path::Path;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::services::ServeDir;

use crate::grid::{self, GridState};
use crate::todo::{self, TodoState};

pub fn grid_router(state: GridState, static_dir: impl AsRef<Path>) -> Router {
    Router::new()
        .route("/", get(grid::index))
        .route(
            "/grid-entries",
            get(grid::list_entries).fallback(grid::method_not_allowed),
        )
        .route(
            "/grid-entry",
            post(grid::place_entry).fallback(grid::method_not_allowed),
        )
        .nest_service("/static", ServeDir::new(static_dir))
        .with_state(state)
}

pub fn todo_router(state: TodoState) -> Router {
    Router::new()
        .route("/", get(todo::index))
        .route("/change", post(todo::change).fallback(todo::ignore))
        .with_state(state)
}
