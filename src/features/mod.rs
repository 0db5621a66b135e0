//! Feature records and their numeric encoding.
//!
//! - [`record`]: FeatureRecord, Sex, Island definitions
//! - [`encoder`]: one-hot expansion + reindexing to the training column order
//! - [`validate`]: field-by-field request validation with aggregated errors

pub mod encoder;
pub mod record;
pub mod validate;
