use axum::Json;
use pawmap_core::locations::{default_central_locations, CentralLocation};

/// GET /api/locations
///
/// Named reference points the map labels on page load.
pub async fn list_locations() -> Json<Vec<CentralLocation>> {
    Json(default_central_locations())
}
