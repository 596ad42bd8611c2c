use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Optional override file looked up in the working directory.
pub const CONFIG_FILE: &str = "dashboard.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parsing {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Startup settings. Every field has a default; a config file only needs to
/// name the ones it changes.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub data_path: PathBuf,
    pub window_title: String,
    pub window_size: [f32; 2],
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("spacex_launch_dash.csv"),
            window_title: "SpaceX Launch Records Dashboard".to_string(),
            window_size: [1200.0, 900.0],
        }
    }
}

impl DashboardConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Defaults when `path` does not exist; a file that exists but cannot be
    /// used is logged and ignored.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match Self::load(path) {
            Ok(cfg) => {
                log::info!("Using settings from {}", path.display());
                cfg
            }
            Err(e) => {
                log::warn!("Ignoring config: {e}");
                Self::default()
            }
        }
    }
}
