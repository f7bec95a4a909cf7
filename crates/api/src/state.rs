use std::sync::Arc;

use crate::store::PetStore;
use crate::uploads::UploadDir;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Pet report store backed by a JSON document.
    pub store: Arc<PetStore>,
    /// Where uploaded images go.
    pub uploads: Arc<UploadDir>,
}
