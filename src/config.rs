//! Runtime configuration for penguin-api.
//!
//! Artifact locations come from the environment (`MODEL_PATH`,
//! `METADATA_PATH`), matching how the service is deployed; server knobs come
//! from the CLI.

use clap::Parser;
use serde::{Deserialize, Serialize};

/// Default model artifact location, relative to the working directory.
pub const DEFAULT_MODEL_PATH: &str = "data/model.json";

/// Default metadata artifact location, relative to the working directory.
pub const DEFAULT_METADATA_PATH: &str = "data/metadata.json";

/// Command-line arguments.
#[derive(Parser, Debug, Clone)]
#[command(name = "penguin-api", about = "Penguin species classification server")]
pub struct Cli {
    /// HTTP listen address.
    #[arg(long, default_value = "0.0.0.0:8080")]
    pub listen: String,

    /// Enable verbose logging.
    #[arg(short, long)]
    pub verbose: bool,
}

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Local path or `gs://` URI to the serialized model.
    pub model_path: String,

    /// Local path or `gs://` URI to the model metadata JSON.
    pub metadata_path: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model_path: DEFAULT_MODEL_PATH.to_string(),
            metadata_path: DEFAULT_METADATA_PATH.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from `MODEL_PATH` / `METADATA_PATH`, falling back
    /// to the checked-in defaults for unset variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`Config::from_env`], but with an injectable variable lookup.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            model_path: get("MODEL_PATH").unwrap_or_else(|| DEFAULT_MODEL_PATH.to_string()),
            metadata_path: get("METADATA_PATH")
                .unwrap_or_else(|| DEFAULT_METADATA_PATH.to_string()),
        }
    }
}
