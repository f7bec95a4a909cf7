//! Initial map view and the named reference locations shown on page load.

use serde::{Deserialize, Serialize};

use crate::types::LatLng;

/// A permanently labeled reference point on the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CentralLocation {
    pub name: String,
    pub coords: LatLng,
}

impl CentralLocation {
    pub fn new(name: impl Into<String>, lat: f64, lng: f64) -> Self {
        Self {
            name: name.into(),
            coords: LatLng::new(lat, lng),
        }
    }
}

/// Neighbourhood landmarks in Lahore.
pub fn default_central_locations() -> Vec<CentralLocation> {
    vec![
        CentralLocation::new("DHA Phase 5", 31.478, 74.375),
        CentralLocation::new("Gulberg (Liberty Mkt)", 31.509, 74.333),
        CentralLocation::new("Cantt (Fortress Stadium)", 31.536, 74.366),
        CentralLocation::new("Model Town", 31.474, 74.332),
        CentralLocation::new("Johar Town", 31.464, 74.282),
        CentralLocation::new("Lake City", 31.363, 74.244),
        CentralLocation::new("Bahria Town", 31.365, 74.185),
        CentralLocation::new("Garden Town", 31.500, 74.312),
        CentralLocation::new("Mall Road (Charing Cross)", 31.558, 74.333),
        CentralLocation::new("MM Alam Road", 31.516, 74.343),
        CentralLocation::new("Wapda Town", 31.442, 74.269),
    ]
}

/// Initial viewport and tile source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapView {
    pub center: LatLng,
    pub zoom: u8,
    pub tile_url: String,
    pub max_zoom: u8,
    pub attribution: String,
}

impl Default for MapView {
    fn default() -> Self {
        Self {
            center: LatLng::new(31.5204, 74.3587),
            zoom: 12,
            tile_url: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
            max_zoom: 19,
            attribution: "\u{a9} OpenStreetMap".to_string(),
        }
    }
}
