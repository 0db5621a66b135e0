//! Classification model loading and evaluation.
//!
//! - [`gbdt`]: gradient-boosted tree forest (JSON format, per-row scoring)
//! - [`metadata`]: feature-column order and label vocabulary
//! - [`service`]: the prediction service holding all of the above

pub mod gbdt;
pub mod metadata;
pub mod service;
