//! penguin-api: HTTP inference service for penguin species classification.
//!
//! Loads a gradient-boosted tree model and its training metadata at startup,
//! validates incoming feature records, one-hot encodes them into the model's
//! training-time column order, and returns a predicted species label.
//!
//! Exposes a small JSON HTTP API: `GET /`, `GET /health`, `POST /predict`.

pub mod artifact;
pub mod config;
pub mod features;
pub mod model;
pub mod server;
