//! Resolution of the effective client configuration for a chat run.
//!
//! Priority: CLI flag / environment > config file > built-in default.

use std::path::PathBuf;

use chatpy_infra::config::{load_client_config, load_client_config_file, resolve_data_dir};
use chatpy_types::config::ClientConfig;

/// Overrides collected from the command line.
#[derive(Debug, Default)]
pub struct ChatSettings {
    pub base_url: Option<String>,
    pub config_path: Option<PathBuf>,
    pub timeout_secs: Option<u64>,
}

impl ChatSettings {
    /// Load the config file and apply the overrides on top.
    pub async fn resolve(&self) -> ClientConfig {
        let config = match &self.config_path {
            Some(path) => load_client_config_file(path).await,
            None => load_client_config(&resolve_data_dir()).await,
        };
        self.apply(config)
    }

    pub fn apply(&self, mut config: ClientConfig) -> ClientConfig {
        if let Some(url) = &self.base_url {
            config.base_url = url.clone();
        }
        if let Some(secs) = self.timeout_secs {
            config.request_timeout_secs = secs;
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_apply_without_overrides_keeps_config() {
        let config = ChatSettings::default().apply(ClientConfig::default());
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn test_apply_overrides() {
        let settings = ChatSettings {
            base_url: Some("http://10.0.0.5:5000".to_string()),
            config_path: None,
            timeout_secs: Some(3),
        };
        let config = settings.apply(ClientConfig::default());
        assert_eq!(config.base_url, "http://10.0.0.5:5000");
        assert_eq!(config.request_timeout_secs, 3);
        assert_eq!(config.message_quota, 10);
    }

    #[tokio::test]
    async fn test_resolve_from_explicit_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("widget.toml");
        tokio::fs::write(&path, "message_quota = 3\nbase_url = \"http://file\"\n")
            .await
            .unwrap();

        let settings = ChatSettings {
            base_url: Some("http://flag".to_string()),
            config_path: Some(path),
            timeout_secs: None,
        };
        let config = settings.resolve().await;
        assert_eq!(config.base_url, "http://flag");
        assert_eq!(config.message_quota, 3);
    }
}
