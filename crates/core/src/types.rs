use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Milliseconds in one day, the unit used for "posted N day(s) ago".
pub const MILLIS_PER_DAY: i64 = 1000 * 60 * 60 * 24;

/// Server-assigned identifier of a pet report (e.g. `pet_1718000000000`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PetId(String);

impl PetId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PetId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for PetId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Borrow<str> for PetId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// A geographic coordinate in degrees.
///
/// Serialized as a `[lat, lng]` pair, which is what the map library and the
/// backend both speak.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Offset both axes by the same number of degrees.
    pub fn offset(self, delta: f64) -> Self {
        Self::new(self.lat + delta, self.lng + delta)
    }
}

impl From<[f64; 2]> for LatLng {
    fn from([lat, lng]: [f64; 2]) -> Self {
        Self { lat, lng }
    }
}

impl From<LatLng> for [f64; 2] {
    fn from(p: LatLng) -> Self {
        [p.lat, p.lng]
    }
}

/// Axis-aligned bounds, serialized as `[[south, west], [north, east]]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[LatLng; 2]", into = "[LatLng; 2]")]
pub struct Bounds {
    pub south_west: LatLng,
    pub north_east: LatLng,
}

impl Bounds {
    /// Square bounds of the given half-width (in degrees) around `center`.
    pub fn around(center: LatLng, half_width: f64) -> Self {
        Self {
            south_west: center.offset(-half_width),
            north_east: center.offset(half_width),
        }
    }

    pub fn center(&self) -> LatLng {
        LatLng::new(
            (self.south_west.lat + self.north_east.lat) / 2.0,
            (self.south_west.lng + self.north_east.lng) / 2.0,
        )
    }
}

impl From<[LatLng; 2]> for Bounds {
    fn from([south_west, north_east]: [LatLng; 2]) -> Self {
        Self {
            south_west,
            north_east,
        }
    }
}

impl From<Bounds> for [LatLng; 2] {
    fn from(b: Bounds) -> Self {
        [b.south_west, b.north_east]
    }
}

/// Whole days elapsed between a millisecond epoch timestamp and `now`.
///
/// Future timestamps count as zero days.
pub fn whole_days_since(epoch_millis: i64, now: Timestamp) -> i64 {
    let elapsed = now.timestamp_millis().saturating_sub(epoch_millis);
    elapsed.max(0).div_euclid(MILLIS_PER_DAY)
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};

    use super::*;

    #[test]
    fn latlng_serializes_as_pair() {
        let json = serde_json::to_string(&LatLng::new(31.5, 74.4)).unwrap();
        assert_eq!(json, "[31.5,74.4]");

        let back: LatLng = serde_json::from_str("[1.0, -2.5]").unwrap();
        assert_eq!(back, LatLng::new(1.0, -2.5));
    }

    #[test]
    fn bounds_are_centered() {
        let center = LatLng::new(31.5, 74.3);
        let b = Bounds::around(center, 0.5);
        assert_eq!(b.south_west, LatLng::new(31.0, 73.8));
        assert_eq!(b.north_east, LatLng::new(32.0, 74.8));
        assert_eq!(b.center(), center);
    }

    #[test]
    fn bounds_serialize_as_nested_pairs() {
        let b = Bounds::around(LatLng::new(0.0, 0.0), 1.0);
        assert_eq!(serde_json::to_string(&b).unwrap(), "[[-1.0,-1.0],[1.0,1.0]]");
    }

    #[test]
    fn pet_id_borrows_as_str() {
        let mut map = std::collections::HashMap::new();
        map.insert(PetId::from("pet_1"), 1);
        assert_eq!(map.get("pet_1"), Some(&1));
        assert_eq!(PetId::from("pet_1").to_string(), "pet_1");
    }

    #[test]
    fn whole_days_floor_and_clamp() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let ms = now.timestamp_millis();
        assert_eq!(whole_days_since(ms, now), 0);
        assert_eq!(whole_days_since(ms - (MILLIS_PER_DAY - 1), now), 0);
        assert_eq!(whole_days_since((now - Duration::hours(25)).timestamp_millis(), now), 1);
        assert_eq!(whole_days_since((now - Duration::days(9)).timestamp_millis(), now), 9);
        assert_eq!(whole_days_since(ms + 5_000, now), 0);
        assert_eq!(whole_days_since(i64::MAX, now), 0);
        assert_eq!(whole_days_since(i64::MIN, now), i64::MAX / MILLIS_PER_DAY);
    }
}
