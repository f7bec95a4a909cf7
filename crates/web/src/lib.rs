//! Browser front end for the lost-pet map board.
//!
//! Binds [`pawmap_client::controller::Controller`] to Leaflet and to the
//! page's DOM. The crate only has content on `wasm32-unknown-unknown`; the
//! generated module runs [`app::start`] when it is loaded.

#![cfg(all(target_arch = "wasm32", target_os = "unknown"))]

pub mod app;
pub mod leaflet;
pub mod map;
pub mod page;
