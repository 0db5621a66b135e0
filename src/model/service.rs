//! The prediction service: model, column order, and vocabulary in one place.
//!
//! Constructed once at startup from the loaded artifacts, then shared
//! read-only by every request handler. No locking: nothing here mutates
//! after construction.

use thiserror::Error;

use crate::features::encoder;
use crate::features::record::FeatureRecord;
use crate::model::gbdt::{GbdtClassifier, GbdtError};
use crate::model::metadata::ModelMetadata;

/// Internal prediction failure. The request boundary collapses every
/// variant into an opaque 500; the detail only reaches the logs.
#[derive(Error, Debug)]
pub enum PredictError {
    #[error("model evaluation failed: {0}")]
    Model(#[from] GbdtError),

    #[error("predicted class index {index} outside label vocabulary of {classes} classes")]
    LabelOutOfRange { index: usize, classes: usize },
}

/// Holds everything needed to turn a validated record into a species label.
#[derive(Debug, Clone)]
pub struct PredictionService {
    model: GbdtClassifier,
    feature_columns: Vec<String>,
    label_classes: Vec<String>,
}

impl PredictionService {
    pub fn new(model: GbdtClassifier, metadata: ModelMetadata) -> Self {
        Self {
            model,
            feature_columns: metadata.feature_columns,
            label_classes: metadata.label_classes,
        }
    }

    /// Encode the record, evaluate the model on the single row, and map the
    /// predicted class index to its label.
    pub fn predict(&self, record: &FeatureRecord) -> Result<String, PredictError> {
        let row = encoder::encode(record, &self.feature_columns);
        let index = self.model.predict(&row)?;

        self.label_classes
            .get(index)
            .cloned()
            .ok_or(PredictError::LabelOutOfRange {
                index,
                classes: self.label_classes.len(),
            })
    }

    /// The configured label vocabulary.
    pub fn label_classes(&self) -> &[String] {
        &self.label_classes
    }
}
