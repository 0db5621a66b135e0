//! Artifact resolution: materialize model and metadata files locally.
//!
//! Locations are either plain filesystem paths (returned unchanged) or
//! `gs://bucket/object` URIs, fetched over HTTPS into a temporary directory
//! at startup. The temporary directory is never cleaned up: artifacts are
//! fetched once per process lifetime and must outlive the fetch call.

use std::path::PathBuf;

use thiserror::Error;
use tracing::info;

/// Scheme prefix marking a remote blob-storage location.
const REMOTE_SCHEME: &str = "gs://";

/// Public HTTPS endpoint for blob downloads.
const STORAGE_ENDPOINT: &str = "https://storage.googleapis.com";

#[derive(Error, Debug)]
pub enum ArtifactError {
    #[error("invalid object URI '{0}': expected gs://bucket/object")]
    InvalidUri(String),

    #[error("fetch failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Returns true if the location names a remote blob rather than a local file.
pub fn is_remote(location: &str) -> bool {
    location.starts_with(REMOTE_SCHEME)
}

/// Resolve a location string to a local filesystem path.
///
/// Remote locations are downloaded first; local ones pass through unchanged
/// (a bad local path surfaces later, when the artifact is loaded).
pub async fn resolve(location: &str) -> Result<PathBuf, ArtifactError> {
    if is_remote(location) {
        let (bucket, object) = split_object_uri(location)?;
        download_object(&bucket, &object).await
    } else {
        Ok(PathBuf::from(location))
    }
}

/// Split `gs://bucket/path/to/object` into bucket and object parts.
fn split_object_uri(location: &str) -> Result<(String, String), ArtifactError> {
    let rest = location
        .strip_prefix(REMOTE_SCHEME)
        .ok_or_else(|| ArtifactError::InvalidUri(location.to_string()))?;

    match rest.split_once('/') {
        Some((bucket, object)) if !bucket.is_empty() && !object.is_empty() => {
            Ok((bucket.to_string(), object.to_string()))
        }
        _ => Err(ArtifactError::InvalidUri(location.to_string())),
    }
}

/// Fetch one object into a freshly created temporary directory and return
/// the downloaded file's path.
async fn download_object(bucket: &str, object: &str) -> Result<PathBuf, ArtifactError> {
    let url = format!("{STORAGE_ENDPOINT}/{bucket}/{object}");
    let response = reqwest::get(&url).await?.error_for_status()?;
    let bytes = response.bytes().await?;

    // into_path() drops the cleanup guard; the directory outlives this call.
    let dir = tempfile::tempdir()?.into_path();
    let file_name = object.rsplit('/').next().unwrap_or(object);
    let destination = dir.join(file_name);

    tokio::fs::write(&destination, &bytes).await?;

    info!(
        uri = format!("{REMOTE_SCHEME}{bucket}/{object}"),
        destination = %destination.display(),
        bytes = bytes.len(),
        "Downloaded artifact"
    );

    Ok(destination)
}
