use std::sync::Arc;

use anyhow::anyhow;
use tracing::{error, info, warn};

use board_db::Database;
use board_db::models::GridEntryRow;
use board_db::queries;
use board_types::api::PlaceEntryRequest;

use crate::error::PlacementError;
use crate::validation::validate;

/// Validates, checks occupancy and inserts grid entries against one shared
/// database handle.
#[derive(Clone)]
pub struct PlacementService {
    db: Arc<Database>,
}

impl PlacementService {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Place one entry. On success exactly one row has been written; on any
    /// error nothing has.
    pub async fn place(&self, req: PlaceEntryRequest) -> Result<GridEntryRow, PlacementError> {
        let PlaceEntryRequest { x, y, name, message } = req;

        if let Err(e) = validate(x, y, &name, &message) {
            warn!("Rejected entry at ({}, {}): {}", x, y, e);
            return Err(e);
        }

        // Run blocking DB work off the async runtime
        let service = self.clone();
        let result = tokio::task::spawn_blocking(move || service.store(x, y, &name, &message))
            .await
            .map_err(|e| {
                error!("spawn_blocking join error: {}", e);
                PlacementError::SaveFailed(anyhow!("placement task failed: {}", e))
            })?;

        match &result {
            Ok(row) => info!("Placed entry {} at ({}, {})", row.id, row.x, row.y),
            Err(e) if e.is_internal() => error!("Entry at ({}, {}) failed: {:?}", x, y, e),
            Err(e) => warn!("Rejected entry at ({}, {}): {}", x, y, e),
        }
        result
    }

    /// Every entry, newest first.
    pub async fn list(&self) -> anyhow::Result<Vec<GridEntryRow>> {
        let db = self.db.clone();
        tokio::task::spawn_blocking(move || db.list_grid_entries())
            .await
            .map_err(|e| anyhow!("spawn_blocking join error: {}", e))?
    }

    fn store(
        &self,
        x: i64,
        y: i64,
        name: &str,
        message: &str,
    ) -> Result<GridEntryRow, PlacementError> {
        self.db.with_transaction(|tx| {
            if queries::cell_occupied(tx, x, y).map_err(PlacementError::Database)? {
                return Err(PlacementError::Occupied);
            }

            let id = queries::insert_grid_entry(tx, x, y, name, message).map_err(|e| {
                if queries::is_unique_violation(&e) {
                    PlacementError::Conflict
                } else {
                    PlacementError::SaveFailed(e)
                }
            })?;

            queries::query_grid_entry(tx, id)?
                .ok_or_else(|| PlacementError::SaveFailed(anyhow!("entry {} missing after insert", id)))
        })
    }
}
