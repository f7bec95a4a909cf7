//! Per-pet map layers and the registry that owns them.
//!
//! Each report on the map is drawn as a red marker with an action popup, a
//! square search-area overlay, and any number of sighting pins. The registry
//! keeps those handles together so they are created once and destroyed
//! together. It stores only ids; report data stays in the directory.

use std::collections::HashMap;

use serde::Serialize;

use crate::icons::{IconDescriptor, IconFactory, MarkerColor};
use crate::mode::{PopupAction, SightingColor};
use crate::pet::PetReport;
use crate::types::{Bounds, LatLng, PetId};

/// Half-width of the search overlay in degrees (about 1.5 km of latitude).
/// This is a fixed square in degrees, not a true distance radius.
pub const SEARCH_HALF_WIDTH_DEG: f64 = 1.5 * 0.009;

/// Stroke and fill of the search overlay.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlayStyle {
    pub color: &'static str,
    pub weight: u32,
    pub fill_opacity: f64,
}

pub const SEARCH_OVERLAY_STYLE: OverlayStyle = OverlayStyle {
    color: "#e74c3c",
    weight: 1,
    fill_opacity: 0.1,
};

/// Content of the popup bound to a pet's primary marker.
#[derive(Debug, Clone, PartialEq)]
pub struct PetPopup {
    pub title: String,
    pub actions: [PopupAction; 2],
}

impl PetPopup {
    pub fn for_report(report: &PetReport) -> Self {
        let action = |color| PopupAction {
            pet_id: report.id.clone(),
            color,
        };
        Self {
            title: report.name.clone(),
            actions: [action(SightingColor::Green), action(SightingColor::Yellow)],
        }
    }
}

/// The drawing surface the registry puts layers on.
///
/// `Layer` is whatever handle the surface needs to remove a layer later.
pub trait MapSurface {
    type Layer;

    fn add_marker(&mut self, at: LatLng, icon: &IconDescriptor) -> Self::Layer;

    /// Marker with a permanent text label above it.
    fn add_labeled_marker(&mut self, at: LatLng, icon: &IconDescriptor, label: &str)
        -> Self::Layer;

    fn bind_popup(&mut self, marker: &Self::Layer, popup: &PetPopup);

    fn add_rectangle(&mut self, bounds: Bounds, style: &OverlayStyle) -> Self::Layer;

    fn remove_layer(&mut self, layer: &Self::Layer);

    fn close_popup(&mut self);
}

/// Map layers belonging to one pet report.
#[derive(Debug)]
pub struct LayerBundle<L> {
    pub marker: L,
    pub overlay: L,
    pub sightings: Vec<L>,
}

#[derive(Debug)]
pub struct MapLayerRegistry<L> {
    bundles: HashMap<PetId, LayerBundle<L>>,
}

impl<L> Default for MapLayerRegistry<L> {
    fn default() -> Self {
        Self {
            bundles: HashMap::new(),
        }
    }
}

impl<L> MapLayerRegistry<L> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw a report on the map. Returns `false` (and draws nothing) when the
    /// report already has layers.
    pub fn add<M>(&mut self, map: &mut M, icons: &IconFactory, report: &PetReport) -> bool
    where
        M: MapSurface<Layer = L>,
    {
        if self.bundles.contains_key(&report.id) {
            return false;
        }

        let marker = map.add_marker(report.latlng, icons.icon(MarkerColor::Red));
        map.bind_popup(&marker, &PetPopup::for_report(report));

        let bounds = Bounds::around(report.latlng, SEARCH_HALF_WIDTH_DEG);
        let overlay = map.add_rectangle(bounds, &SEARCH_OVERLAY_STYLE);

        self.bundles.insert(
            report.id.clone(),
            LayerBundle {
                marker,
                overlay,
                sightings: Vec::new(),
            },
        );
        true
    }

    /// Remove every layer of a report. Returns `false` when nothing was
    /// registered for `id`.
    pub fn remove<M>(&mut self, map: &mut M, id: &str) -> bool
    where
        M: MapSurface<Layer = L>,
    {
        let Some(bundle) = self.bundles.remove(id) else {
            return false;
        };

        map.remove_layer(&bundle.marker);
        map.remove_layer(&bundle.overlay);
        for sighting in &bundle.sightings {
            map.remove_layer(sighting);
        }
        true
    }

    /// Drop a sighting pin for `id` at `at`. Nothing is drawn when the report
    /// has no layers (e.g. it was deleted while the user was placing).
    pub fn place_sighting<M>(
        &mut self,
        map: &mut M,
        icons: &IconFactory,
        id: &str,
        color: SightingColor,
        at: LatLng,
    ) -> bool
    where
        M: MapSurface<Layer = L>,
    {
        let Some(bundle) = self.bundles.get_mut(id) else {
            return false;
        };

        let pin = map.add_marker(at, icons.icon(color.marker_color()));
        bundle.sightings.push(pin);
        true
    }

    pub fn contains(&self, id: &str) -> bool {
        self.bundles.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&LayerBundle<L>> {
        self.bundles.get(id)
    }

    pub fn sighting_count(&self, id: &str) -> usize {
        self.bundles.get(id).map_or(0, |b| b.sightings.len())
    }

    pub fn ids(&self) -> impl Iterator<Item = &PetId> {
        self.bundles.keys()
    }

    pub fn len(&self) -> usize {
        self.bundles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bundles.is_empty()
    }
}
