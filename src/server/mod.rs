//! HTTP server for the classification API.
//!
//! - [`routes`]: application state, router, and route handlers
//! - [`error`]: API error taxonomy and response mapping

pub mod error;
pub mod routes;
