//! Config file loading and storage-root preparation.

use crate::schema::FilehostConfig;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// Default config file name within the config directory.
const CONFIG_FILE_NAME: &str = "filehost.yaml";

/// Resolve the filehost config directory.
/// Priority: `FILEHOST_CONFIG_DIR` env > `~/.filehost/` > `./.filehost`.
pub fn config_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("FILEHOST_CONFIG_DIR") {
        return PathBuf::from(dir);
    }
    if let Some(home) = dirs::home_dir() {
        return home.join(".filehost");
    }
    PathBuf::from(".filehost")
}

/// Resolve the full path to the main config file.
pub fn config_file_path(config_dir: &Path) -> PathBuf {
    config_dir.join(CONFIG_FILE_NAME)
}

/// Load and parse the config from disk.
///
/// Returns defaults if the file doesn't exist (first run). The result is
/// already normalized.
pub async fn load_config(path: &Path) -> Result<FilehostConfig> {
    let mut config = if path.exists() {
        let raw = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let parsed: FilehostConfig = serde_yaml::from_str(&raw)
            .with_context(|| format!("Failed to parse config YAML at: {}", path.display()))?;
        info!(path = %path.display(), "Loaded config");
        parsed
    } else {
        debug!(path = %path.display(), "Config file does not exist; using defaults");
        FilehostConfig::default()
    };
    config.normalize();
    Ok(config)
}

/// Create the upload storage root if it does not exist.
///
/// Best-effort check-then-create; concurrent config reloads are assumed not
/// to race.
pub async fn ensure_upload_root(config: &FilehostConfig) -> Result<PathBuf> {
    let root = PathBuf::from(&config.uploadpath);
    if !root.exists() {
        fs::create_dir_all(&root)
            .await
            .with_context(|| format!("Failed to create upload root: {}", root.display()))?;
        info!(path = %root.display(), "Created upload root");
    }
    Ok(root)
}
