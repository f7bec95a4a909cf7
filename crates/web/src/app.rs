//! Page start-up: build the controller and attach every event listener.

use std::cell::OnceCell;
use std::rc::{Rc, Weak};

use pawmap_client::api::HttpPetApi;
use pawmap_client::config::ClientConfig;
use pawmap_client::controller::{Controller, SUBMIT_FAILED_MESSAGE};
use pawmap_core::icons::IconFactory;
use pawmap_core::render::{ListAction, PET_ID_ATTRIBUTE};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, Event, EventTarget, Window};

use crate::map::LeafletMap;
use crate::page::{self, DomPage, FormReader};

type App = Controller<HttpPetApi, LeafletMap, DomPage>;

/// Filled once the controller exists. Map callbacks are registered before
/// the map moves into the controller, so they reach it through this.
type AppSlot = Rc<OnceCell<Weak<App>>>;

fn upgrade(slot: &AppSlot) -> Option<Rc<App>> {
    slot.get().and_then(Weak::upgrade)
}

/// Register `handler` for `event` on `target` for the page's lifetime.
fn listen(
    target: &EventTarget,
    event: &str,
    handler: impl FnMut(Event) + 'static,
) -> Result<(), JsValue> {
    let callback = Closure::<dyn FnMut(Event)>::new(handler);
    target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
    callback.forget();
    Ok(())
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let config = ClientConfig::new(window.location().origin()?);

    let slot = AppSlot::default();

    let map = LeafletMap::new(document.clone(), page::MAP_ID, &config.map_view, {
        let slot = Rc::clone(&slot);
        move |action| {
            if let Some(app) = upgrade(&slot) {
                app.on_popup_action(&action);
            }
        }
    });
    map.on_click({
        let slot = Rc::clone(&slot);
        move |at| {
            if let Some(app) = upgrade(&slot) {
                app.on_map_click(at);
            }
        }
    });

    let page = DomPage::new(window.clone(), &document)?;
    let api = HttpPetApi::new(config.api_base_url.clone());
    let app = Rc::new(Controller::new(api, map, page, IconFactory::new(&config.icons)));
    let _ = slot.set(Rc::downgrade(&app));

    attach_form(&app, &window, FormReader::new(&document)?)?;
    attach_list(&app, &page::element(&document, page::LIST_ID)?)?;

    let cancel: Element = page::element(&document, page::CANCEL_BUTTON_ID)?;
    listen(&cancel, "click", {
        let app = Rc::clone(&app);
        move |_| app.cancel_form()
    })?;

    tracing::info!(api = %config.api_base_url, "Map page started");
    spawn_local(async move {
        app.load_central_locations(&config.central_locations).await;
        app.load().await;
    });
    Ok(())
}

fn attach_form(app: &Rc<App>, window: &Window, reader: FormReader) -> Result<(), JsValue> {
    let form = reader.form().clone();
    let app = Rc::clone(app);
    let window = window.clone();

    listen(&form, "submit", move |event| {
        event.prevent_default();
        let app = Rc::clone(&app);
        let window = window.clone();
        let reader = reader.clone();
        spawn_local(async move {
            match reader.read().await {
                Ok(form) => app.submit(form).await,
                Err(e) => {
                    tracing::warn!(error = ?e, "Could not read the report form");
                    let _ = window.alert_with_message(SUBMIT_FAILED_MESSAGE);
                }
            }
        });
    })
}

/// One delegated listener on the list decodes card button clicks.
fn attach_list(app: &Rc<App>, list: &Element) -> Result<(), JsValue> {
    let app = Rc::clone(app);

    listen(list, "click", move |event| {
        let Some(target) = event
            .target()
            .and_then(|target| target.dyn_into::<Element>().ok())
        else {
            return;
        };
        let action = ListAction::from_button(
            &target.class_name(),
            target.get_attribute(PET_ID_ATTRIBUTE).as_deref(),
        );
        if let Some(action) = action {
            let app = Rc::clone(&app);
            spawn_local(async move { app.on_list_action(action).await });
        }
    })
}
