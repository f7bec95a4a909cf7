//! Bindings for the parts of the Leaflet `L` namespace the page uses.

use pawmap_core::types::{Bounds, LatLng};
use serde::Serialize;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    /// `L.Map`
    #[derive(Debug, Clone)]
    pub type Map;

    /// `L.map(id)`
    #[wasm_bindgen(js_namespace = L, js_name = map)]
    pub fn create_map(element_id: &str) -> Map;

    #[wasm_bindgen(method, js_name = setView)]
    pub fn set_view(this: &Map, center: &JsValue, zoom: f64) -> Map;

    #[wasm_bindgen(method)]
    pub fn on(this: &Map, event: &str, handler: &js_sys::Function) -> Map;

    #[wasm_bindgen(method, js_name = closePopup)]
    pub fn close_popup(this: &Map) -> Map;

    /// Any `L.Layer`: markers, rectangles, tile layers.
    #[derive(Debug, Clone)]
    pub type Layer;

    #[wasm_bindgen(method, js_name = addTo)]
    pub fn add_to(this: &Layer, map: &Map) -> Layer;

    #[wasm_bindgen(method)]
    pub fn remove(this: &Layer) -> Layer;

    #[wasm_bindgen(method, js_name = bindPopup)]
    pub fn bind_popup(this: &Layer, content: &web_sys::Element) -> Layer;

    #[wasm_bindgen(method, js_name = bindTooltip)]
    pub fn bind_tooltip(this: &Layer, content: &str, options: &JsValue) -> Layer;

    #[wasm_bindgen(method, js_name = openTooltip)]
    pub fn open_tooltip(this: &Layer) -> Layer;

    #[wasm_bindgen(js_namespace = L, js_name = tileLayer)]
    pub fn tile_layer(url_template: &str, options: &JsValue) -> Layer;

    #[wasm_bindgen(js_namespace = L)]
    pub fn marker(at: &JsValue, options: &JsValue) -> Layer;

    /// `L.icon(options)`, returns an `L.Icon`.
    #[wasm_bindgen(js_namespace = L)]
    pub fn icon(options: &JsValue) -> JsValue;

    #[wasm_bindgen(js_namespace = L)]
    pub fn rectangle(bounds: &JsValue, options: &JsValue) -> Layer;
}

/// Convert a serializable options struct into a plain JS object.
pub fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    let json = serde_json::to_string(value).map_err(|e| JsValue::from_str(&e.to_string()))?;
    js_sys::JSON::parse(&json)
}

/// Like [`to_js`], falling back to an empty options object (Leaflet's
/// defaults) if conversion fails.
pub fn options_or_default<T: Serialize>(value: &T) -> JsValue {
    to_js(value).unwrap_or_else(|e| {
        tracing::error!(error = ?e, "Failed to convert map options");
        js_sys::Object::new().into()
    })
}

/// `[lat, lng]`
pub fn lat_lng(p: LatLng) -> JsValue {
    js_sys::Array::of2(&p.lat.into(), &p.lng.into()).into()
}

/// `[[south, west], [north, east]]`
pub fn bounds(b: Bounds) -> JsValue {
    js_sys::Array::of2(&lat_lng(b.south_west), &lat_lng(b.north_east)).into()
}

/// Read `event.latlng` from a Leaflet mouse event.
pub fn event_lat_lng(event: &JsValue) -> Option<LatLng> {
    let latlng = js_sys::Reflect::get(event, &"latlng".into()).ok()?;
    let lat = js_sys::Reflect::get(&latlng, &"lat".into()).ok()?.as_f64()?;
    let lng = js_sys::Reflect::get(&latlng, &"lng".into()).ok()?.as_f64()?;
    Some(LatLng::new(lat, lng))
}
