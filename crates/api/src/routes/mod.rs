pub mod health;
pub mod locations;
pub mod pets;

use axum::Router;

use crate::config::ServerConfig;
use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /pets                    list, create (multipart)
/// /pets/{id}               delete
/// /pets/{id}/status        toggle lost/found (POST)
///
/// /locations               central reference locations
/// ```
pub fn api_routes(config: &ServerConfig) -> Router<AppState> {
    Router::new()
        .nest("/pets", pets::router(config.max_upload_bytes))
        .nest("/locations", locations::router())
}
