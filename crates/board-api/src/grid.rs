use std::sync::Arc;

use axum::{Json, body::Bytes, extract::State, response::Html};
use tracing::warn;

use board_db::models::GridEntryRow;
use board_types::api::{GridEntryResponse, PlaceEntryRequest, PlaceEntryResponse};

use crate::error::{ApiError, PlacementError};
use crate::placement::PlacementService;
use crate::templates::Template;

pub type GridState = Arc<GridStateInner>;

pub struct GridStateInner {
    pub placements: PlacementService,
    pub index: Template,
}

/// GET / — the page shell; entries are fetched by the browser afterwards.
pub async fn index(State(state): State<GridState>) -> Html<String> {
    Html(state.index.render(&[]))
}

/// GET /grid-entries
pub async fn list_entries(
    State(state): State<GridState>,
) -> Result<Json<Vec<GridEntryResponse>>, ApiError> {
    let rows = state.placements.list().await?;
    Ok(Json(rows.into_iter().map(to_response).collect()))
}

/// POST /grid-entry — always answers 200 with a success envelope; the body is
/// parsed by hand so malformed JSON becomes an envelope too.
pub async fn place_entry(State(state): State<GridState>, body: Bytes) -> Json<PlaceEntryResponse> {
    let req: PlaceEntryRequest = match serde_json::from_slice(&body) {
        Ok(req) => req,
        Err(e) => {
            warn!("Invalid grid entry body: {}", e);
            return Json(PlaceEntryResponse::rejected(PlacementError::InvalidJson.to_string()));
        }
    };

    match state.placements.place(req).await {
        Ok(_) => Json(PlaceEntryResponse::ok()),
        Err(e) => Json(PlaceEntryResponse::rejected(e.to_string())),
    }
}

pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

fn to_response(row: GridEntryRow) -> GridEntryResponse {
    GridEntryResponse {
        id: row.id,
        x: row.x,
        y: row.y,
        name: row.name,
        message: row.message,
    }
}
