//! [`MapSurface`] backed by a Leaflet map.

use std::collections::HashMap;

use pawmap_core::icons::IconDescriptor;
use pawmap_core::layers::{MapSurface, OverlayStyle, PetPopup};
use pawmap_core::locations::MapView;
use pawmap_core::mode::PopupAction;
use pawmap_core::render::PET_ID_ATTRIBUTE;
use pawmap_core::types::{Bounds, LatLng};
use serde::Serialize;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Event};

use crate::leaflet::{self, Layer};

/// Attribute carrying the sighting color on popup buttons.
pub const COLOR_ATTRIBUTE: &str = "data-color";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TileOptions<'a> {
    max_zoom: u8,
    attribution: &'a str,
}

/// Options for the permanent name label above a central location.
#[derive(Serialize)]
struct LabelOptions {
    permanent: bool,
    direction: &'static str,
    offset: [i32; 2],
}

const LABEL_OPTIONS: LabelOptions = LabelOptions {
    permanent: true,
    direction: "top",
    offset: [0, -20],
};

pub struct LeafletMap {
    map: leaflet::Map,
    document: Document,
    /// `L.Icon` objects keyed by image URL.
    icons: HashMap<String, JsValue>,
    /// Shared click listener of every popup button.
    popup_listener: Closure<dyn FnMut(Event)>,
}

impl LeafletMap {
    /// Create the map in the element `element_id`, add the tile layer and
    /// route popup button clicks to `on_action`.
    pub fn new(
        document: Document,
        element_id: &str,
        view: &MapView,
        on_action: impl Fn(PopupAction) + 'static,
    ) -> Self {
        let map = leaflet::create_map(element_id);
        map.set_view(&leaflet::lat_lng(view.center), f64::from(view.zoom));
        leaflet::tile_layer(
            &view.tile_url,
            &leaflet::options_or_default(&TileOptions {
                max_zoom: view.max_zoom,
                attribution: &view.attribution,
            }),
        )
        .add_to(&map);

        let popup_listener = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            let Some(button) = event
                .current_target()
                .and_then(|target| target.dyn_into::<Element>().ok())
            else {
                return;
            };
            let action = PopupAction::from_attributes(
                button.get_attribute(PET_ID_ATTRIBUTE).as_deref(),
                button.get_attribute(COLOR_ATTRIBUTE).as_deref(),
            );
            match action {
                Some(action) => on_action(action),
                None => tracing::warn!("Popup button without a valid action"),
            }
        });

        Self {
            map,
            document,
            icons: HashMap::new(),
            popup_listener,
        }
    }

    /// Call `handler` with the coordinate of every click on the map
    /// background.
    pub fn on_click(&self, mut handler: impl FnMut(LatLng) + 'static) {
        let callback = Closure::<dyn FnMut(JsValue)>::new(move |event: JsValue| {
            if let Some(at) = leaflet::event_lat_lng(&event) {
                handler(at);
            }
        });
        self.map.on("click", callback.as_ref().unchecked_ref());
        // Lives as long as the page.
        callback.forget();
    }

    fn marker_options(&mut self, icon: &IconDescriptor) -> JsValue {
        let leaflet_icon = self
            .icons
            .entry(icon.icon_url.clone())
            .or_insert_with(|| leaflet::icon(&leaflet::options_or_default(icon)));

        let options = js_sys::Object::new();
        if let Err(e) = js_sys::Reflect::set(&options, &"icon".into(), leaflet_icon) {
            tracing::warn!(error = ?e, "Failed to set marker icon");
        }
        options.into()
    }

    fn popup_content(&self, popup: &PetPopup) -> Result<Element, JsValue> {
        let root = self.document.create_element("div")?;

        let title = self.document.create_element("strong")?;
        title.set_text_content(Some(&popup.title));
        root.append_child(&title)?;
        root.append_child(&self.document.create_element("br")?)?;

        for action in &popup.actions {
            let button = self.document.create_element("button")?;
            button.set_class_name(&format!("popup-btn {}", action.color.as_str()));
            button.set_attribute(PET_ID_ATTRIBUTE, action.pet_id.as_str())?;
            button.set_attribute(COLOR_ATTRIBUTE, action.color.as_str())?;
            button.set_text_content(Some(action.label()));
            button.add_event_listener_with_callback(
                "click",
                self.popup_listener.as_ref().unchecked_ref(),
            )?;
            root.append_child(&button)?;
        }

        Ok(root)
    }
}

impl MapSurface for LeafletMap {
    type Layer = Layer;

    fn add_marker(&mut self, at: LatLng, icon: &IconDescriptor) -> Layer {
        let options = self.marker_options(icon);
        leaflet::marker(&leaflet::lat_lng(at), &options).add_to(&self.map)
    }

    fn add_labeled_marker(&mut self, at: LatLng, icon: &IconDescriptor, label: &str) -> Layer {
        let marker = self.add_marker(at, icon);
        marker.bind_tooltip(label, &leaflet::options_or_default(&LABEL_OPTIONS));
        marker.open_tooltip();
        marker
    }

    fn bind_popup(&mut self, marker: &Layer, popup: &PetPopup) {
        match self.popup_content(popup) {
            Ok(content) => {
                marker.bind_popup(&content);
            }
            Err(e) => tracing::error!(error = ?e, "Failed to build marker popup"),
        }
    }

    fn add_rectangle(&mut self, bounds: Bounds, style: &OverlayStyle) -> Layer {
        leaflet::rectangle(&leaflet::bounds(bounds), &leaflet::options_or_default(style))
            .add_to(&self.map)
    }

    fn remove_layer(&mut self, layer: &Layer) {
        layer.remove();
    }

    fn close_popup(&mut self) {
        self.map.close_popup();
    }
}
