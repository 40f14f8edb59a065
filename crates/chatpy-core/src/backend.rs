//! ChatBackend trait definition.
//!
//! The remote API the widget talks to. Uses native async fn in traits
//! (RPITIT) like the rest of the workspace. Implementations live in
//! chatpy-infra (e.g., `HttpChatBackend`).

use std::future::Future;

use chatpy_types::chat::SessionId;
use chatpy_types::error::BackendError;
use chatpy_types::intake::IntakeRecord;
use chatpy_types::wire::{MessageReply, SendMessageRequest};

pub trait ChatBackend: Send + Sync {
    /// Submit intake details and obtain a new session identifier.
    fn save_user(
        &self,
        record: &IntakeRecord,
    ) -> impl Future<Output = Result<SessionId, BackendError>> + Send;

    /// Send one user message and receive the bot's reply.
    ///
    /// A `limit_reached` envelope is returned as
    /// `BackendError::LimitReached`.
    fn send_message(
        &self,
        request: &SendMessageRequest,
    ) -> impl Future<Output = Result<MessageReply, BackendError>> + Send;
}
