//! HttpChatBackend -- concrete [`ChatBackend`] implementation over HTTP.
//!
//! Posts JSON to `/api/save_user` and `/api/send_message` and decodes the
//! `{success, ...}` envelope. The backend also answers failures with HTTP
//! 4xx/5xx plus an envelope, so the body is decoded regardless of status;
//! only a body that is not a valid envelope is treated as a transport
//! failure.

use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use chatpy_core::backend::ChatBackend;
use chatpy_types::chat::SessionId;
use chatpy_types::config::ClientConfig;
use chatpy_types::error::BackendError;
use chatpy_types::intake::IntakeRecord;
use chatpy_types::wire::{
    MessageReply, SAVE_USER_PATH, SEND_MESSAGE_PATH, SaveUserEnvelope, SendMessageEnvelope,
    SendMessageRequest,
};

use crate::config::request_timeout;

/// Cheap to clone; clones share the connection pool.
#[derive(Clone)]
pub struct HttpChatBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpChatBackend {
    /// Create a backend client for `base_url` (scheme, host and optional
    /// path prefix, e.g. `http://127.0.0.1:5000`).
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, BackendError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("chatpy/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| BackendError::Transport(format!("failed to build HTTP client: {e}")))?;

        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, BackendError> {
        Self::new(config.base_url.clone(), request_timeout(config))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn post_envelope<Req, Resp>(&self, path: &str, body: &Req) -> Result<Resp, BackendError>
    where
        Req: Serialize + ?Sized,
        Resp: DeserializeOwned,
    {
        let url = self.url(path);
        debug!(url = %url, "POST");

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| BackendError::Transport(format!("HTTP request failed: {e}")))?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| BackendError::Transport(format!("failed to read response body: {e}")))?;

        serde_json::from_slice::<Resp>(&bytes).map_err(|e| {
            if status.is_success() {
                BackendError::MalformedResponse(format!("failed to parse response: {e}"))
            } else {
                BackendError::Transport(format!(
                    "HTTP {status}: {}",
                    String::from_utf8_lossy(&bytes).chars().take(200).collect::<String>()
                ))
            }
        })
    }
}

impl ChatBackend for HttpChatBackend {
    async fn save_user(&self, record: &IntakeRecord) -> Result<SessionId, BackendError> {
        let envelope: SaveUserEnvelope = self.post_envelope(SAVE_USER_PATH, record).await?;
        envelope.into_result()
    }

    async fn send_message(&self, request: &SendMessageRequest) -> Result<MessageReply, BackendError> {
        let envelope: SendMessageEnvelope = self.post_envelope(SEND_MESSAGE_PATH, request).await?;
        envelope.into_result()
    }
}
