//! Saved ranking presets ("shares") for the frontend: a small JSON document
//! store behind `GET/POST /shares` and `DELETE /shares/{id}`.

pub mod routes;
pub mod store;

pub use routes::{router, serve, AppState, SharedState};
