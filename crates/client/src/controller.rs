//! Event handling for the map page.
//!
//! [`Controller`] owns one [`AppState`] for the lifetime of the page. Every
//! handler borrows the state only in synchronous sections and never across an
//! `.await`, so events dispatched while a request is in flight see a usable
//! state. Nothing is committed locally until the backend confirms it; a
//! response is applied to whatever state exists when it arrives.

use std::cell::{Ref, RefCell};

use pawmap_core::directory::PetDirectory;
use pawmap_core::icons::{IconFactory, MarkerColor};
use pawmap_core::layers::{MapLayerRegistry, MapSurface};
use pawmap_core::locations::CentralLocation;
use pawmap_core::mode::{ClickIntent, InteractionMode, MapCursor, PopupAction};
use pawmap_core::render::{render_pet_list, ListAction};
use pawmap_core::types::{LatLng, PetId, Timestamp};

use crate::api::PetApi;
use crate::clock::{Clock, SystemClock};
use crate::page::PageSurface;
use crate::submission::PetForm;

pub const SUBMIT_FAILED_MESSAGE: &str = "Error submitting report.";
pub const STATUS_FAILED_MESSAGE: &str = "Error updating report status.";
pub const DELETE_FAILED_MESSAGE: &str = "Error deleting report.";
pub const DELETE_CONFIRM_MESSAGE: &str =
    "Are you sure you want to permanently delete this report?";

/// Everything the page mutates.
pub struct AppState<M: MapSurface, P> {
    pub mode: InteractionMode,
    pub directory: PetDirectory,
    pub layers: MapLayerRegistry<M::Layer>,
    /// Permanent labeled markers for the central locations.
    pub landmarks: Vec<M::Layer>,
    pub map: M,
    pub page: P,
}

impl<M: MapSurface, P: PageSurface> AppState<M, P> {
    fn render_list(&mut self, now: Timestamp) {
        let html = render_pet_list(&self.directory, now);
        self.page.set_list_html(&html);
    }

    fn close_form(&mut self) {
        self.page.reset_form();
        self.page.hide_form();
    }
}

pub struct Controller<A, M: MapSurface, P, C = SystemClock> {
    api: A,
    icons: IconFactory,
    clock: C,
    state: RefCell<AppState<M, P>>,
}

impl<A, M, P> Controller<A, M, P, SystemClock>
where
    A: PetApi,
    M: MapSurface,
    P: PageSurface,
{
    pub fn new(api: A, map: M, page: P, icons: IconFactory) -> Self {
        Self::with_clock(api, map, page, icons, SystemClock)
    }
}

impl<A, M, P, C> Controller<A, M, P, C>
where
    A: PetApi,
    M: MapSurface,
    P: PageSurface,
    C: Clock,
{
    pub fn with_clock(api: A, map: M, page: P, icons: IconFactory, clock: C) -> Self {
        Self {
            api,
            icons,
            clock,
            state: RefCell::new(AppState {
                mode: InteractionMode::Idle,
                directory: PetDirectory::new(),
                layers: MapLayerRegistry::new(),
                landmarks: Vec::new(),
                map,
                page,
            }),
        }
    }

    /// Read-only view of the state.
    pub fn state(&self) -> Ref<'_, AppState<M, P>> {
        self.state.borrow()
    }

    pub fn mode(&self) -> InteractionMode {
        self.state.borrow().mode.clone()
    }

    /// Draw the permanent labeled markers.
    pub fn place_central_locations(&self, locations: &[CentralLocation]) {
        let mut guard = self.state.borrow_mut();
        let state = &mut *guard;
        let icon = self.icons.icon(MarkerColor::Blue);
        for location in locations {
            let marker = state.map.add_labeled_marker(location.coords, icon, &location.name);
            state.landmarks.push(marker);
        }
        tracing::debug!(count = locations.len(), "Central locations placed");
    }

    /// Fetch the central locations from the backend and draw them, drawing
    /// `fallback` instead if the request fails.
    pub async fn load_central_locations(&self, fallback: &[CentralLocation]) {
        match self.api.list_locations().await {
            Ok(locations) => self.place_central_locations(&locations),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load central locations, using defaults");
                self.place_central_locations(fallback);
            }
        }
    }

    /// Fetch the full directory and draw it. Failures are logged and leave
    /// the current state untouched.
    pub async fn load(&self) {
        let pets = match self.api.list_pets().await {
            Ok(pets) => pets,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load pet reports");
                return;
            }
        };

        let now = self.clock.now();
        let mut guard = self.state.borrow_mut();
        let state = &mut *guard;

        state.directory.replace_all(pets);

        let stale: Vec<PetId> = state
            .layers
            .ids()
            .filter(|id| !state.directory.contains(id.as_str()))
            .cloned()
            .collect();
        for id in &stale {
            state.layers.remove(&mut state.map, id.as_str());
        }

        state.render_list(now);
        for report in state.directory.iter() {
            state.layers.add(&mut state.map, &self.icons, report);
        }
        tracing::info!(count = state.directory.len(), "Pet reports loaded");
    }

    /// A click on the map background.
    pub fn on_map_click(&self, at: LatLng) {
        let mut guard = self.state.borrow_mut();
        let state = &mut *guard;

        match state.mode.on_map_click() {
            ClickIntent::NewReport => {
                state.page.set_form_location(at);
                state.page.show_form();
            }
            ClickIntent::PlaceSighting { color, pet_id } => {
                let placed = state.layers.place_sighting(
                    &mut state.map,
                    &self.icons,
                    pet_id.as_str(),
                    color,
                    at,
                );
                if placed {
                    tracing::info!(%pet_id, color = color.as_str(), "Sighting placed");
                } else {
                    tracing::warn!(%pet_id, "Sighting dropped, report no longer on the map");
                }
                state.page.set_map_cursor(MapCursor::Default);
            }
        }
    }

    /// A click on one of the buttons in a pet marker's popup.
    pub fn on_popup_action(&self, action: &PopupAction) {
        let mut guard = self.state.borrow_mut();
        let state = &mut *guard;

        if !state.layers.contains(action.pet_id.as_str()) {
            tracing::warn!(pet_id = %action.pet_id, "Popup action for a report not on the map");
            return;
        }

        state.mode.enter(action);
        state.page.set_map_cursor(state.mode.cursor());
        state.map.close_popup();
    }

    /// Submit the new-report form.
    pub async fn submit(&self, form: PetForm) {
        let submission = form.into_submission(self.clock.now().timestamp_millis());

        let result = self.api.create_pet(&submission).await;

        let now = self.clock.now();
        let mut guard = self.state.borrow_mut();
        let state = &mut *guard;
        match result {
            Ok(report) => {
                tracing::info!(pet_id = %report.id, "Pet report created");
                state.layers.add(&mut state.map, &self.icons, &report);
                state.directory.insert(report);
                state.render_list(now);
                state.close_form();
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to submit pet report");
                state.page.alert(SUBMIT_FAILED_MESSAGE);
            }
        }
    }

    /// The form's cancel button. The mode is left as it is.
    pub fn cancel_form(&self) {
        self.state.borrow_mut().close_form();
    }

    /// A click on a card button in the side panel.
    pub async fn on_list_action(&self, action: ListAction) {
        match action {
            ListAction::ToggleStatus(id) => self.toggle_status(id).await,
            ListAction::Delete(id) => self.delete(id).await,
        }
    }

    async fn toggle_status(&self, id: PetId) {
        let result = self.api.toggle_status(&id).await;

        let now = self.clock.now();
        let mut state = self.state.borrow_mut();
        match result {
            Ok(report) => {
                tracing::info!(pet_id = %id, status = report.status.as_str(), "Pet status updated");
                state.directory.upsert(id, report);
                state.render_list(now);
            }
            Err(e) => {
                tracing::warn!(pet_id = %id, error = %e, "Failed to update pet status");
                state.page.alert(STATUS_FAILED_MESSAGE);
            }
        }
    }

    async fn delete(&self, id: PetId) {
        let confirmed = self
            .state
            .borrow_mut()
            .page
            .confirm(DELETE_CONFIRM_MESSAGE);
        if !confirmed {
            return;
        }

        let result = self.api.delete_pet(&id).await;

        let now = self.clock.now();
        let mut guard = self.state.borrow_mut();
        let state = &mut *guard;
        match result {
            Ok(()) => {
                tracing::info!(pet_id = %id, "Pet report deleted");
                state.layers.remove(&mut state.map, id.as_str());
                state.directory.remove(id.as_str());
                state.render_list(now);
            }
            Err(e) => {
                tracing::warn!(pet_id = %id, error = %e, "Failed to delete pet report");
                state.page.alert(DELETE_FAILED_MESSAGE);
            }
        }
    }
}
