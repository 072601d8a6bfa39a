//! Presentation layer serving the HTTP API.

/// HTTP routes and handlers.
pub mod http;

pub use http::{AppState, router, serve};
