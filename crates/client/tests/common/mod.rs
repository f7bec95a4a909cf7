#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use indexmap::IndexMap;
use pawmap_client::api::{ApiError, PetApi};
use pawmap_client::clock::Clock;
use pawmap_client::controller::Controller;
use pawmap_client::page::PageSurface;
use pawmap_client::submission::{ImageUpload, PetForm, PetSubmission};
use pawmap_core::icons::{IconDescriptor, IconFactory};
use pawmap_core::layers::{MapSurface, OverlayStyle, PetPopup};
use pawmap_core::locations::CentralLocation;
use pawmap_core::mode::MapCursor;
use pawmap_core::pet::{PetReport, PetStatus};
use pawmap_core::types::{Bounds, LatLng, PetId, Timestamp};

// ---------------------------------------------------------------------------
// Map
// ---------------------------------------------------------------------------

/// What a layer on the fake map is.
#[derive(Debug, Clone, PartialEq)]
pub enum Drawn {
    Marker { at: LatLng, icon_url: String },
    Labeled { at: LatLng, label: String },
    Rectangle(Bounds),
}

/// Records live layers by handle.
#[derive(Debug, Default)]
pub struct FakeMap {
    next: usize,
    pub layers: BTreeMap<usize, Drawn>,
    pub popups: BTreeMap<usize, PetPopup>,
    pub popups_closed: usize,
}

impl FakeMap {
    fn push(&mut self, drawn: Drawn) -> usize {
        let handle = self.next;
        self.next += 1;
        self.layers.insert(handle, drawn);
        handle
    }

    /// Live markers whose icon url contains `color`.
    pub fn markers_colored(&self, color: &str) -> Vec<LatLng> {
        self.layers
            .values()
            .filter_map(|d| match d {
                Drawn::Marker { at, icon_url } if icon_url.contains(color) => Some(*at),
                _ => None,
            })
            .collect()
    }

    pub fn rectangles(&self) -> Vec<Bounds> {
        self.layers
            .values()
            .filter_map(|d| match d {
                Drawn::Rectangle(b) => Some(*b),
                _ => None,
            })
            .collect()
    }

    pub fn labels(&self) -> Vec<String> {
        self.layers
            .values()
            .filter_map(|d| match d {
                Drawn::Labeled { label, .. } => Some(label.clone()),
                _ => None,
            })
            .collect()
    }
}

impl MapSurface for FakeMap {
    type Layer = usize;

    fn add_marker(&mut self, at: LatLng, icon: &IconDescriptor) -> usize {
        self.push(Drawn::Marker {
            at,
            icon_url: icon.icon_url.clone(),
        })
    }

    fn add_labeled_marker(&mut self, at: LatLng, _icon: &IconDescriptor, label: &str) -> usize {
        self.push(Drawn::Labeled {
            at,
            label: label.to_string(),
        })
    }

    fn bind_popup(&mut self, marker: &usize, popup: &PetPopup) {
        self.popups.insert(*marker, popup.clone());
    }

    fn add_rectangle(&mut self, bounds: Bounds, _style: &OverlayStyle) -> usize {
        self.push(Drawn::Rectangle(bounds))
    }

    fn remove_layer(&mut self, layer: &usize) {
        self.layers.remove(layer);
        self.popups.remove(layer);
    }

    fn close_popup(&mut self) {
        self.popups_closed += 1;
    }
}

// ---------------------------------------------------------------------------
// Page
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct FakePage {
    pub list_html: String,
    pub form_location: Option<LatLng>,
    pub form_visible: bool,
    pub form_resets: usize,
    pub cursor: MapCursor,
    pub alerts: Vec<String>,
    pub confirms: Vec<String>,
    /// Answer given to every confirm prompt.
    pub confirm_answer: bool,
}

impl Default for FakePage {
    fn default() -> Self {
        Self {
            list_html: String::new(),
            form_location: None,
            form_visible: false,
            form_resets: 0,
            cursor: MapCursor::Default,
            alerts: Vec::new(),
            confirms: Vec::new(),
            confirm_answer: true,
        }
    }
}

impl FakePage {
    /// Number of rendered cards.
    pub fn card_count(&self) -> usize {
        self.list_html.matches("class=\"pet-card").count()
    }
}

impl PageSurface for FakePage {
    fn set_list_html(&mut self, html: &str) {
        self.list_html = html.to_string();
    }

    fn set_form_location(&mut self, at: LatLng) {
        self.form_location = Some(at);
    }

    fn show_form(&mut self) {
        self.form_visible = true;
    }

    fn hide_form(&mut self) {
        self.form_visible = false;
    }

    fn reset_form(&mut self) {
        self.form_resets += 1;
        self.form_location = None;
    }

    fn set_map_cursor(&mut self, cursor: MapCursor) {
        self.cursor = cursor;
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }

    fn confirm(&mut self, message: &str) -> bool {
        self.confirms.push(message.to_string());
        self.confirm_answer
    }
}

// ---------------------------------------------------------------------------
// Backend
// ---------------------------------------------------------------------------

/// In-memory backend shared between a test and its [`FakeApi`].
#[derive(Debug, Default)]
pub struct FakeBackend {
    pub pets: IndexMap<PetId, PetReport>,
    pub locations: Vec<CentralLocation>,
    /// Every call fails with a 500 while set.
    pub failing: bool,
    pub calls: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct FakeApi(pub Rc<RefCell<FakeBackend>>);

impl FakeApi {
    pub fn backend(&self) -> Rc<RefCell<FakeBackend>> {
        Rc::clone(&self.0)
    }

    fn begin(&self, call: String) -> Result<(), ApiError> {
        let mut backend = self.0.borrow_mut();
        backend.calls.push(call);
        if backend.failing {
            return Err(ApiError::Status {
                status: 500,
                body: r#"{"error":"boom"}"#.into(),
            });
        }
        Ok(())
    }

    fn not_found(id: &PetId) -> ApiError {
        ApiError::Status {
            status: 404,
            body: format!(r#"{{"error":"Pet with id {id} not found"}}"#),
        }
    }
}

#[async_trait(?Send)]
impl PetApi for FakeApi {
    async fn list_pets(&self) -> Result<IndexMap<PetId, PetReport>, ApiError> {
        self.begin("list".into())?;
        Ok(self.0.borrow().pets.clone())
    }

    async fn create_pet(&self, submission: &PetSubmission) -> Result<PetReport, ApiError> {
        self.begin(format!("create {}", submission.fields.name))?;
        let report = submission
            .fields
            .clone()
            .into_report(format!("/uploads/{}", submission.image.file_name));
        self.0
            .borrow_mut()
            .pets
            .insert(report.id.clone(), report.clone());
        Ok(report)
    }

    async fn toggle_status(&self, id: &PetId) -> Result<PetReport, ApiError> {
        self.begin(format!("toggle {id}"))?;
        let mut backend = self.0.borrow_mut();
        let report = backend.pets.get_mut(id).ok_or_else(|| Self::not_found(id))?;
        report.status = report.status.toggled();
        Ok(report.clone())
    }

    async fn delete_pet(&self, id: &PetId) -> Result<(), ApiError> {
        self.begin(format!("delete {id}"))?;
        self.0
            .borrow_mut()
            .pets
            .shift_remove(id)
            .map(|_| ())
            .ok_or_else(|| Self::not_found(id))
    }

    async fn list_locations(&self) -> Result<Vec<CentralLocation>, ApiError> {
        self.begin("locations".into())?;
        Ok(self.0.borrow().locations.clone())
    }
}

// ---------------------------------------------------------------------------
// Clock
// ---------------------------------------------------------------------------

/// 2024-06-10T06:13:20Z, i.e. 1718000000000 ms.
pub const NOW_MS: i64 = 1_718_000_000_000;

#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub Timestamp);

impl Default for FixedClock {
    fn default() -> Self {
        Self(Utc.timestamp_millis_opt(NOW_MS).unwrap())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        self.0
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub type TestController = Controller<FakeApi, FakeMap, FakePage, FixedClock>;

/// A controller over fresh fakes, plus a handle on the fake backend.
pub fn controller() -> (TestController, Rc<RefCell<FakeBackend>>) {
    controller_with_page(FakePage::default())
}

pub fn controller_with_page(page: FakePage) -> (TestController, Rc<RefCell<FakeBackend>>) {
    let api = FakeApi::default();
    let backend = api.backend();
    let controller = Controller::with_clock(
        api,
        FakeMap::default(),
        page,
        IconFactory::default(),
        FixedClock::default(),
    );
    (controller, backend)
}

pub fn report(id: &str, name: &str, at: LatLng, status: PetStatus) -> PetReport {
    PetReport {
        id: PetId::from(id),
        name: name.to_string(),
        contact: "0300-1234567".to_string(),
        description: "Friendly".to_string(),
        image_url: format!("/uploads/{id}.png"),
        latlng: at,
        status,
        submission_time: NOW_MS,
    }
}

pub fn form(name: &str, at: LatLng) -> PetForm {
    PetForm {
        name: name.to_string(),
        contact: "0300-1234567".to_string(),
        description: "Brown, white paws".to_string(),
        location: at,
        image: ImageUpload {
            file_name: "dog.png".to_string(),
            content_type: Some("image/png".to_string()),
            bytes: b"\x89PNG fake".to_vec(),
        },
    }
}
