use board_types::grid;

use crate::error::PlacementError;

/// Structural checks on a placement, in order: bounds first, then required
/// fields. Nothing else is enforced (no length caps, no trimming).
pub fn validate(x: i64, y: i64, name: &str, message: &str) -> Result<(), PlacementError> {
    if !grid::in_bounds(x, y) {
        return Err(PlacementError::OutOfBounds);
    }
    if name.is_empty() || message.is_empty() {
        return Err(PlacementError::MissingFields);
    }
    Ok(())
}
