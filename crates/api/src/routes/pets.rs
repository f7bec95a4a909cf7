//! Route definitions for pet reports.

use axum::extract::DefaultBodyLimit;
use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::pets;
use crate::state::AppState;

/// Pet report routes mounted at `/pets`. Request bodies (the multipart
/// create) may be up to `max_upload_bytes`.
///
/// ```text
/// GET    /              -> list_pets
/// POST   /              -> create_pet
/// DELETE /{id}          -> delete_pet
/// POST   /{id}/status   -> toggle_status
/// ```
pub fn router(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/", get(pets::list_pets).post(pets::create_pet))
        .route("/{id}", delete(pets::delete_pet))
        .route("/{id}/status", post(pets::toggle_status))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
}
