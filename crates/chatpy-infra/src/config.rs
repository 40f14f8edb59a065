//! Client configuration loader.
//!
//! Reads `config.toml` from the data directory (`~/.chatpy/` in production)
//! and deserializes it into [`ClientConfig`]. Falls back to defaults when
//! the file is missing or malformed.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chatpy_types::config::ClientConfig;

/// Requests never time out faster than this.
const MIN_REQUEST_TIMEOUT_SECS: u64 = 1;

/// Resolve the data directory from environment or platform defaults.
///
/// Priority:
/// 1. `CHATPY_DATA_DIR` environment variable
/// 2. `~/.chatpy`
/// 3. `.chatpy` in the current directory
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("CHATPY_DATA_DIR") {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".chatpy");
    }

    PathBuf::from(".chatpy")
}

/// Load client configuration from `{data_dir}/config.toml`.
///
/// - If the file does not exist, returns [`ClientConfig::default()`].
/// - If the file exists but fails to parse, logs a warning and returns the default.
pub async fn load_client_config(data_dir: &Path) -> ClientConfig {
    load_client_config_file(&data_dir.join("config.toml")).await
}

/// Load client configuration from an explicit file path.
pub async fn load_client_config_file(config_path: &Path) -> ClientConfig {
    let content = match tokio::fs::read_to_string(config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return ClientConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return ClientConfig::default();
        }
    };

    match toml::from_str::<ClientConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            ClientConfig::default()
        }
    }
}

/// Per-request timeout, with a floor of one second.
pub fn request_timeout(config: &ClientConfig) -> Duration {
    Duration::from_secs(config.request_timeout_secs.max(MIN_REQUEST_TIMEOUT_SECS))
}
