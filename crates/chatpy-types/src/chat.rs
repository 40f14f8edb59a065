//! Chat session and message types for the widget client.
//!
//! A `ChatSession` is the client's view of a server-tracked conversation:
//! the opaque session identifier, the remaining message quota as last
//! reported by the server, and whether the session has ended.

use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

/// Opaque server-issued session identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub String);

impl SessionId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for SessionId {
    fn from(s: String) -> Self {
        SessionId(s)
    }
}

/// Lifecycle phase of the chat session.
///
/// `Ended` is terminal: only a full reload returns to `Unauthenticated`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionPhase {
    Unauthenticated,
    Active,
    Ended,
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionPhase::Unauthenticated => write!(f, "unauthenticated"),
            SessionPhase::Active => write!(f, "active"),
            SessionPhase::Ended => write!(f, "ended"),
        }
    }
}

impl FromStr for SessionPhase {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "unauthenticated" => Ok(SessionPhase::Unauthenticated),
            "active" => Ok(SessionPhase::Active),
            "ended" => Ok(SessionPhase::Ended),
            other => Err(format!("invalid session phase: '{other}'")),
        }
    }
}

impl Default for SessionPhase {
    fn default() -> Self {
        SessionPhase::Unauthenticated
    }
}

/// Client-side state of a chat session.
///
/// `messages_left` is authoritative only as last reported by the server.
/// The client never decrements it on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatSession {
    pub session_id: Option<SessionId>,
    pub messages_left: u32,
    pub ended: bool,
}

impl ChatSession {
    /// A fresh, unauthenticated session seeded with the configured quota.
    pub fn new(initial_quota: u32) -> Self {
        Self {
            session_id: None,
            messages_left: initial_quota,
            ended: false,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        match (&self.session_id, self.ended) {
            (_, true) => SessionPhase::Ended,
            (Some(_), false) => SessionPhase::Active,
            (None, false) => SessionPhase::Unauthenticated,
        }
    }
}

/// Who authored a rendered message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sender::User => write!(f, "user"),
            Sender::Bot => write!(f, "bot"),
        }
    }
}

/// A message as handed to the view for rendering. Not retained anywhere else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub sender: Sender,
    pub text: String,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::User,
            text: text.into(),
        }
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::Bot,
            text: text.into(),
        }
    }
}
