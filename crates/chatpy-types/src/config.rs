//! Client configuration types.
//!
//! `ClientConfig` represents the optional `config.toml` that points the
//! widget at a backend and tunes its quota and request timeout.

use serde::{Deserialize, Serialize};

/// Top-level configuration for the widget client.
///
/// Loaded from `~/.chatpy/config.toml`. All fields have sensible defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the chat backend, without a trailing slash.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Messages a fresh session is assumed to have before the server
    /// reports its own count.
    #[serde(default = "default_message_quota")]
    pub message_quota: u32,

    /// Per-request timeout in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Name used in the welcome message.
    #[serde(default = "default_institution")]
    pub institution: String,
}

fn default_base_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_message_quota() -> u32 {
    10
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_institution() -> String {
    "the University of Kimberly".to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            message_quota: default_message_quota(),
            request_timeout_secs: default_request_timeout_secs(),
            institution: default_institution(),
        }
    }
}
