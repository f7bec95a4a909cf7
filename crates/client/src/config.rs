use pawmap_core::icons::IconTemplate;
use pawmap_core::locations::{default_central_locations, CentralLocation, MapView};

/// Client-side settings. Defaults match the public deployment.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the backend, without a trailing slash.
    pub api_base_url: String,
    pub icons: IconTemplate,
    pub map_view: MapView,
    /// Drawn when the backend's location list cannot be fetched.
    pub central_locations: Vec<CentralLocation>,
}

impl ClientConfig {
    pub fn new(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into().trim_end_matches('/').to_string(),
            icons: IconTemplate::default(),
            map_view: MapView::default(),
            central_locations: default_central_locations(),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:3000")
    }
}
