//! Browser-side controller for the lost-pet map board.
//!
//! [`controller::Controller`] owns the application state and reacts to page
//! events. It talks to the backend through [`api::PetApi`] and to the page
//! and map through the [`page::PageSurface`] and
//! [`pawmap_core::layers::MapSurface`] traits, so it runs unchanged in the
//! browser and in native tests.

pub mod api;
pub mod clock;
pub mod config;
pub mod controller;
pub mod page;
pub mod submission;
