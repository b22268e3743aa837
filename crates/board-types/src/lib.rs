pub mod api;
pub mod grid;
