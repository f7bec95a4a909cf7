//! PawMap reference backend library.
//!
//! Exposes the building blocks (config, state, error handling, store,
//! routes) so integration tests and the binary entrypoint can both use them.

pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod routes;
pub mod state;
pub mod store;
pub mod uploads;
