//! [`PageSurface`] over the page's DOM, and reading the new-report form.

use pawmap_client::page::PageSurface;
use pawmap_client::submission::{ImageUpload, PetForm};
use pawmap_core::mode::MapCursor;
use pawmap_core::types::LatLng;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, Element, File, FormData, HtmlElement, HtmlFormElement, HtmlInputElement, Window};

pub const MAP_ID: &str = "map";
pub const LIST_ID: &str = "pet-details-list";
pub const LAT_INPUT_ID: &str = "pet-lat";
pub const LNG_INPUT_ID: &str = "pet-lng";
pub const FORM_CONTAINER_ID: &str = "lost-pet-form-container";
pub const FORM_ID: &str = "lost-pet-form";
pub const CANCEL_BUTTON_ID: &str = "cancel-btn";

/// Look up `#id` and cast it to `T`.
pub fn element<T: JsCast>(document: &Document, id: &str) -> Result<T, JsValue> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("missing #{id} element")))?
        .dyn_into::<T>()
        .map_err(|_| JsValue::from_str(&format!("#{id} has an unexpected element type")))
}

pub struct DomPage {
    window: Window,
    map: HtmlElement,
    list: Element,
    form_container: HtmlElement,
    form: HtmlFormElement,
    lat: HtmlInputElement,
    lng: HtmlInputElement,
}

impl DomPage {
    pub fn new(window: Window, document: &Document) -> Result<Self, JsValue> {
        Ok(Self {
            window,
            map: element(document, MAP_ID)?,
            list: element(document, LIST_ID)?,
            form_container: element(document, FORM_CONTAINER_ID)?,
            form: element(document, FORM_ID)?,
            lat: element(document, LAT_INPUT_ID)?,
            lng: element(document, LNG_INPUT_ID)?,
        })
    }

    fn set_style(element: &HtmlElement, property: &str, value: &str) {
        if let Err(e) = element.style().set_property(property, value) {
            tracing::warn!(property, error = ?e, "Failed to set style");
        }
    }
}

impl PageSurface for DomPage {
    fn set_list_html(&mut self, html: &str) {
        self.list.set_inner_html(html);
    }

    fn set_form_location(&mut self, at: LatLng) {
        self.lat.set_value(&at.lat.to_string());
        self.lng.set_value(&at.lng.to_string());
    }

    fn show_form(&mut self) {
        Self::set_style(&self.form_container, "display", "block");
    }

    fn hide_form(&mut self) {
        Self::set_style(&self.form_container, "display", "none");
    }

    fn reset_form(&mut self) {
        self.form.reset();
    }

    fn set_map_cursor(&mut self, cursor: MapCursor) {
        Self::set_style(&self.map, "cursor", cursor.css_value());
    }

    fn alert(&mut self, message: &str) {
        if let Err(e) = self.window.alert_with_message(message) {
            tracing::warn!(error = ?e, "Failed to show alert");
        }
    }

    fn confirm(&mut self, message: &str) -> bool {
        self.window.confirm_with_message(message).unwrap_or(false)
    }
}

/// Reads the new-report form when it is submitted.
///
/// Field names match the multipart fields the backend expects.
#[derive(Clone)]
pub struct FormReader {
    form: HtmlFormElement,
    lat: HtmlInputElement,
    lng: HtmlInputElement,
}

impl FormReader {
    pub fn new(document: &Document) -> Result<Self, JsValue> {
        Ok(Self {
            form: element(document, FORM_ID)?,
            lat: element(document, LAT_INPUT_ID)?,
            lng: element(document, LNG_INPUT_ID)?,
        })
    }

    pub fn form(&self) -> &HtmlFormElement {
        &self.form
    }

    pub async fn read(&self) -> Result<PetForm, JsValue> {
        let data = FormData::new_with_form(&self.form)?;
        let text = |name: &str| data.get(name).as_string().unwrap_or_default();

        let file: File = data
            .get("pet_image")
            .dyn_into()
            .map_err(|_| JsValue::from_str("no image selected"))?;
        let buffer = JsFuture::from(file.array_buffer()).await?;
        let content_type = file.type_();

        Ok(PetForm {
            name: text("pet_name"),
            contact: text("contact"),
            description: text("description"),
            location: LatLng::new(
                parse_coordinate(&self.lat)?,
                parse_coordinate(&self.lng)?,
            ),
            image: ImageUpload {
                file_name: file.name(),
                content_type: (!content_type.is_empty()).then_some(content_type),
                bytes: js_sys::Uint8Array::new(&buffer).to_vec(),
            },
        })
    }
}

fn parse_coordinate(input: &HtmlInputElement) -> Result<f64, JsValue> {
    let value = input.value();
    value
        .trim()
        .parse()
        .map_err(|_| JsValue::from_str(&format!("invalid coordinate '{value}'")))
}
