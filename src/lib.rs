//! Whisp Quest - mood-analysis spirit proxy and texture cache.
//!
//! This crate provides the server-side core of Whisp Quest: an HTTP service
//! that turns free text into mood-tagged spirits through external
//! classification and chat APIs, and a single-flight cache of decoded
//! textures.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Application layer containing use cases, services and DTOs.
pub mod application;
/// Domain layer containing entities, errors, and port definitions.
pub mod domain;
/// Infrastructure layer containing adapters for external services.
pub mod infrastructure;
/// Presentation layer serving the HTTP API.
pub mod presentation;

/// Current version of the application.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name.
pub const NAME: &str = "whisp-quest";
