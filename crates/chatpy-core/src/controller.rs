//! Session controller for the chat widget.
//!
//! Owns the `ChatSession` and mediates every message exchange with the
//! backend. The session phase is the single source of truth for whether
//! the input surface is enabled.
//!
//! A send is split into `begin_send` (render the user message, mark the
//! request outstanding) and `complete_send` (apply the backend result). The
//! request itself runs outside the controller, so an event loop keeps
//! handling other events while it is in flight. Each outbound message
//! carries a sequence number; only the completion for the currently
//! outstanding request is applied.

use chatpy_types::chat::{ChatMessage, ChatSession, SessionId, SessionPhase};
use chatpy_types::error::{BackendError, IntakeError};
use chatpy_types::wire::{MessageReply, SendMessageRequest};
use tracing::{debug, info, warn};

use crate::view::{ChatView, PLACEHOLDER_ACTIVE, PLACEHOLDER_ENDED, PLACEHOLDER_UNAUTHENTICATED};

/// Bot reply shown when the server rejects a message for any reason other
/// than the quota.
pub const SERVER_ERROR_REPLY: &str =
    "Sorry, there was an error processing your message. Please try again.";

/// Bot reply shown when the backend could not be reached or answered garbage.
pub const CONNECTION_ERROR_REPLY: &str = "Sorry, there was a connection error. Please try again.";

/// Shown when the server signals `limit_reached` without its own explanation.
pub const DEFAULT_LIMIT_REPLY: &str =
    "You have reached the maximum number of messages for this session.";

/// A message accepted for sending, tagged with its sequence number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    pub seq: u64,
    pub request: SendMessageRequest,
}

/// What applying a backend result did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// Bot replied; the session is still active.
    Replied,
    /// The session ended (server flag or `limit_reached`).
    Ended,
    /// The exchange failed; the user may retry.
    Failed,
    /// The result belonged to a request that is no longer outstanding.
    Stale,
}

pub struct SessionController {
    session: ChatSession,
    initial_quota: u32,
    /// Last sequence number handed out. Survives `reset`.
    last_seq: u64,
    /// Sequence number of the request awaiting a response.
    pending: Option<u64>,
}

impl SessionController {
    pub fn new(initial_quota: u32) -> Self {
        Self {
            session: ChatSession::new(initial_quota),
            initial_quota,
            last_seq: 0,
            pending: None,
        }
    }

    pub fn session(&self) -> &ChatSession {
        &self.session
    }

    pub fn phase(&self) -> SessionPhase {
        self.session.phase()
    }

    /// Remaining messages as last reported by the server.
    pub fn messages_left(&self) -> u32 {
        self.session.messages_left
    }

    pub fn has_pending_request(&self) -> bool {
        self.pending.is_some()
    }

    /// Input is usable only in an active session with nothing in flight.
    pub fn input_enabled(&self) -> bool {
        self.phase() == SessionPhase::Active && self.pending.is_none()
    }

    /// Attach the server-issued session identifier.
    ///
    /// The identifier is assigned exactly once per controller lifetime.
    pub fn activate(
        &mut self,
        session_id: SessionId,
        view: &mut impl ChatView,
    ) -> Result<(), IntakeError> {
        if self.session.session_id.is_some() {
            return Err(IntakeError::SessionAlreadyActive);
        }

        info!(
            session_id = %session_id,
            messages_left = self.initial_quota,
            "Chat session activated"
        );
        self.session.session_id = Some(session_id);
        self.session.messages_left = self.initial_quota;
        self.sync_view(view);
        Ok(())
    }

    /// Mirror the current phase into the input surface.
    pub fn sync_view(&self, view: &mut impl ChatView) {
        view.set_input_enabled(self.input_enabled());
        let placeholder = match self.phase() {
            SessionPhase::Unauthenticated => PLACEHOLDER_UNAUTHENTICATED,
            SessionPhase::Active => PLACEHOLDER_ACTIVE,
            SessionPhase::Ended => PLACEHOLDER_ENDED,
        };
        view.set_input_placeholder(placeholder);
    }

    /// Accept a user message for sending.
    ///
    /// Returns `None` (and touches nothing) for blank text, outside an
    /// active session, or while another request is outstanding. Otherwise
    /// the user message is rendered immediately, the typing indicator is
    /// shown and input is disabled until `complete_send`.
    pub fn begin_send(&mut self, text: &str, view: &mut impl ChatView) -> Option<OutboundMessage> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        let session_id = match (&self.session.session_id, self.phase()) {
            (Some(id), SessionPhase::Active) => id.as_str().to_string(),
            _ => {
                debug!(phase = %self.phase(), "Ignoring send outside an active session");
                return None;
            }
        };

        if let Some(pending) = self.pending {
            debug!(pending_seq = pending, "Ignoring send while a request is outstanding");
            return None;
        }

        self.last_seq += 1;
        let seq = self.last_seq;
        self.pending = Some(seq);

        view.render_message(&ChatMessage::user(text));
        view.set_typing_indicator(true);
        self.sync_view(view);

        debug!(seq, "Message accepted for sending");
        Some(OutboundMessage {
            seq,
            request: SendMessageRequest {
                session_id,
                message: text.to_string(),
            },
        })
    }

    /// Apply the backend result for request `seq`.
    pub fn complete_send(
        &mut self,
        seq: u64,
        result: Result<MessageReply, BackendError>,
        view: &mut impl ChatView,
    ) -> SendOutcome {
        if self.pending != Some(seq) {
            warn!(seq, pending = ?self.pending, "Discarding stale backend response");
            return SendOutcome::Stale;
        }
        self.pending = None;
        view.set_typing_indicator(false);

        let outcome = match result {
            Ok(reply) => {
                view.render_message(&ChatMessage::bot(reply.response));
                self.session.messages_left = reply.messages_left;
                debug!(seq, messages_left = reply.messages_left, "Bot replied");
                if reply.session_ended {
                    self.end_session("server ended session");
                    SendOutcome::Ended
                } else {
                    SendOutcome::Replied
                }
            }
            Err(BackendError::LimitReached { message }) => {
                let text = message.unwrap_or_else(|| DEFAULT_LIMIT_REPLY.to_string());
                view.render_message(&ChatMessage::bot(text));
                self.end_session("message limit reached");
                SendOutcome::Ended
            }
            Err(e) => {
                warn!(seq, error = %e, "Message exchange failed");
                let text = if e.is_server_reported() {
                    SERVER_ERROR_REPLY
                } else {
                    CONNECTION_ERROR_REPLY
                };
                view.render_message(&ChatMessage::bot(text));
                SendOutcome::Failed
            }
        };

        self.sync_view(view);
        outcome
    }

    /// Forget the session, as a page reload does.
    ///
    /// The sequence counter keeps counting so a response to a request sent
    /// before the reset can never match a request sent after it.
    pub fn reset(&mut self) {
        self.session = ChatSession::new(self.initial_quota);
        self.pending = None;
    }

    fn end_session(&mut self, reason: &str) {
        self.session.ended = true;
        info!(
            session_id = ?self.session.session_id,
            messages_left = self.session.messages_left,
            reason,
            "Chat session ended"
        );
    }
}
