use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

/// Why a placement was refused. The `Display` text is the reason sent back
/// to the browser in the `error` field of the envelope.
#[derive(Debug, Error)]
pub enum PlacementError {
    #[error("Invalid JSON data")]
    InvalidJson,

    #[error("Position out of bounds")]
    OutOfBounds,

    #[error("Name and message are required")]
    MissingFields,

    /// The occupancy check found an entry in the cell.
    #[error("Position already occupied")]
    Occupied,

    /// The insert tripped the `(x, y)` unique index.
    #[error("Position already occupied")]
    Conflict,

    #[error("Database error")]
    Database(#[source] anyhow::Error),

    #[error("Failed to save entry")]
    SaveFailed(#[from] anyhow::Error),
}

impl PlacementError {
    /// Storage failures, as opposed to problems with the request itself.
    pub fn is_internal(&self) -> bool {
        matches!(self, Self::Database(_) | Self::SaveFailed(_))
    }
}

/// Errors on the plain HTTP paths (listing, todo pages).
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Storage(#[from] anyhow::Error),

    #[error("Method not allowed")]
    MethodNotAllowed,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Storage(e) => {
                error!("Storage error: {e:?}");
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
            }
            ApiError::MethodNotAllowed => {
                (StatusCode::METHOD_NOT_ALLOWED, self.to_string()).into_response()
            }
        }
    }
}
