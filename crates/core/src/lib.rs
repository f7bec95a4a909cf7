//! Domain model and pure interaction logic for the lost-pet map board.
//!
//! Everything in this crate is free of I/O: the map and the page are reached
//! through traits so the same logic drives the browser build, the native
//! controller tests, and the reference backend.

pub mod directory;
pub mod error;
pub mod icons;
pub mod layers;
pub mod locations;
pub mod mode;
pub mod pet;
pub mod render;
pub mod types;
