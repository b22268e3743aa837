pub mod error;
pub mod grid;
pub mod placement;
pub mod routes;
pub mod shutdown;
pub mod templates;
pub mod todo;
pub mod validation;
