use serde::{Deserialize, Serialize};

// -- Grid entries --

/// Body of `POST /grid-entry`. Absent fields fall back to zero values so that
/// a body like `{"x": 1, "y": 2}` reaches validation instead of failing to parse.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PlaceEntryRequest {
    pub x: i64,
    pub y: i64,
    pub name: String,
    pub message: String,
}

/// Envelope returned by `POST /grid-entry`.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlaceEntryResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PlaceEntryResponse {
    pub fn ok() -> Self {
        Self { success: true, error: None }
    }

    pub fn rejected(reason: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(reason.into()),
        }
    }
}

/// One element of the `GET /grid-entries` array.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GridEntryResponse {
    pub id: i64,
    pub x: i64,
    pub y: i64,
    pub name: String,
    pub message: String,
}

// -- Todos --

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ChangeTodoForm {
    pub title: String,
}
