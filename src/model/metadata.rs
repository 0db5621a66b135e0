//! Training metadata: feature-column order and label vocabulary.
//!
//! Written by the training pipeline next to the model artifact. The column
//! list fixes the encoder's output order; the label list maps the model's
//! raw class index back to a species name.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("metadata file not found: {0}")]
    FileNotFound(String),

    #[error("invalid metadata format: {0}")]
    InvalidFormat(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Metadata recorded at training time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelMetadata {
    /// Encoded feature columns, in the order the model was trained on.
    pub feature_columns: Vec<String>,

    /// Class names, indexed by the model's raw prediction.
    pub label_classes: Vec<String>,
}

/// Load model metadata from a JSON file.
pub fn load_metadata(path: &Path) -> Result<ModelMetadata, MetadataError> {
    if !path.exists() {
        return Err(MetadataError::FileNotFound(path.display().to_string()));
    }

    let data = std::fs::read_to_string(path)?;
    let metadata: ModelMetadata = serde_json::from_str(&data)
        .map_err(|e| MetadataError::InvalidFormat(e.to_string()))?;

    if metadata.feature_columns.is_empty() {
        return Err(MetadataError::InvalidFormat(
            "feature_columns is empty".to_string(),
        ));
    }
    if metadata.label_classes.is_empty() {
        return Err(MetadataError::InvalidFormat(
            "label_classes is empty".to_string(),
        ));
    }

    info!(
        features = metadata.feature_columns.len(),
        classes = metadata.label_classes.len(),
        "Loaded model metadata"
    );

    Ok(metadata)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_metadata(json: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_metadata() {
        let file = write_metadata(
            r#"{"feature_columns": ["bill_length_mm", "sex_male"],
                "label_classes": ["Adelie", "Chinstrap", "Gentoo"]}"#,
        );
        let metadata = load_metadata(file.path()).unwrap();
        assert_eq!(metadata.feature_columns.len(), 2);
        assert_eq!(metadata.label_classes, vec!["Adelie", "Chinstrap", "Gentoo"]);
    }

    #[test]
    fn test_missing_file() {
        let err = load_metadata(Path::new("/nonexistent/metadata.json")).unwrap_err();
        assert!(matches!(err, MetadataError::FileNotFound(_)));
    }

    #[test]
    fn test_missing_key_rejected() {
        let file = write_metadata(r#"{"feature_columns": ["bill_length_mm"]}"#);
        let err = load_metadata(file.path()).unwrap_err();
        assert!(matches!(err, MetadataError::InvalidFormat(_)));
    }

    #[test]
    fn test_empty_labels_rejected() {
        let file = write_metadata(
            r#"{"feature_columns": ["bill_length_mm"], "label_classes": []}"#,
        );
        let err = load_metadata(file.path()).unwrap_err();
        assert!(matches!(err, MetadataError::InvalidFormat(_)));
    }
}
