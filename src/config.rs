//! Application configuration.
//!
//! Handles loading configuration from environment variables and .env files.

use dotenv::dotenv;
use std::env;
use std::path::PathBuf;
use crate::error::Result;

/// Default dataset file name under the platform data directory.
const DEFAULT_DATASET_FILE: &str = "KJV.json";

/// Configuration for the application.
#[derive(Debug, Clone)]
pub struct Config {
    /// The application name
    app_name: String,
    /// The application version
    app_version: String,
    /// Path to the flat `"Book C:V"` → text JSON verse dataset
    pub dataset_path: Option<PathBuf>,
    /// Whether free text is treated as speech transcript by default
    /// (aggressive normalization)
    pub speech_mode_default: bool,
}

impl Config {
    /// Get the application name.
    #[must_use]
    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// Get the application version.
    #[must_use]
    pub fn app_version(&self) -> &str {
        &self.app_version
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: env!("CARGO_PKG_NAME").to_string(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            dataset_path: None,
            speech_mode_default: false,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    #[allow(clippy::unnecessary_wraps)] // Returns Result for forward-compatible API
    pub fn load() -> Result<Self> {
        // Try to load .env file if present
        dotenv().ok();

        let mut config = Self::default();
        let app_name = config.app_name().to_string();

        // Dataset path: env var override, or default under the user data dir
        config.dataset_path = env::var("VERSE_DATA_PATH").ok().map_or_else(
            || {
                dirs::data_dir()
                    .map(|d| d.join(&app_name).join(DEFAULT_DATASET_FILE))
                    .filter(|p| p.is_file())
            },
            |path| Some(PathBuf::from(shellexpand::tilde(&path).to_string())),
        );

        if let Ok(value) = env::var("SPEECH_MODE") {
            config.speech_mode_default = matches!(value.as_str(), "1" | "true" | "yes");
        }

        Ok(config)
    }

    /// Check if a verse dataset location is known
    pub const fn has_dataset(&self) -> bool {
        self.dataset_path.is_some()
    }
}
