//! JSON envelopes exchanged with the chat backend.
//!
//! Both endpoints answer with a `{success: bool, ...}` envelope. The
//! envelopes are decoded loosely (every payload field optional) and then
//! converted into a typed result, so a missing field surfaces as
//! `BackendError::MalformedResponse` instead of a decode failure.

use serde::{Deserialize, Serialize};

use crate::chat::SessionId;
use crate::error::BackendError;

/// Path of the intake submission endpoint.
pub const SAVE_USER_PATH: &str = "/api/save_user";

/// Path of the message exchange endpoint.
pub const SEND_MESSAGE_PATH: &str = "/api/send_message";

/// Error code the backend uses when the session quota is exhausted.
pub const LIMIT_REACHED: &str = "limit_reached";

/// Response body of `POST /api/save_user`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SaveUserEnvelope {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SaveUserEnvelope {
    pub fn into_result(self) -> Result<SessionId, BackendError> {
        if !self.success {
            return Err(BackendError::Rejected(
                self.error.unwrap_or_else(|| "unknown error".to_string()),
            ));
        }
        match self.session_id {
            Some(id) if !id.is_empty() => Ok(SessionId(id)),
            _ => Err(BackendError::MalformedResponse(
                "success response without session_id".to_string(),
            )),
        }
    }
}

/// Request body of `POST /api/send_message`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendMessageRequest {
    pub session_id: String,
    pub message: String,
}

/// Response body of `POST /api/send_message`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SendMessageEnvelope {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub messages_left: Option<u32>,
    #[serde(default)]
    pub session_ended: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// User-facing explanation, present with `error == "limit_reached"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// A successful bot reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageReply {
    pub response: String,
    pub messages_left: u32,
    pub session_ended: bool,
}

impl SendMessageEnvelope {
    pub fn into_result(self) -> Result<MessageReply, BackendError> {
        if !self.success {
            return Err(match self.error.as_deref() {
                Some(LIMIT_REACHED) => BackendError::LimitReached {
                    message: self.message,
                },
                Some(other) => BackendError::Rejected(other.to_string()),
                None => BackendError::Rejected("unknown error".to_string()),
            });
        }

        let response = self.response.ok_or_else(|| {
            BackendError::MalformedResponse("success response without response text".to_string())
        })?;
        let messages_left = self.messages_left.ok_or_else(|| {
            BackendError::MalformedResponse("success response without messages_left".to_string())
        })?;

        Ok(MessageReply {
            response,
            messages_left,
            session_ended: self.session_ended,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_user_success() {
        let env: SaveUserEnvelope =
            serde_json::from_str(r#"{"success": true, "session_id": "9b1c"}"#).unwrap();
        assert_eq!(env.into_result().unwrap(), SessionId("9b1c".to_string()));
    }

    #[test]
    fn test_save_user_failure() {
        let env: SaveUserEnvelope =
            serde_json::from_str(r#"{"success": false, "error": "disk full"}"#).unwrap();
        assert_eq!(
            env.into_result(),
            Err(BackendError::Rejected("disk full".to_string()))
        );
    }

    #[test]
    fn test_save_user_success_without_id_is_malformed() {
        let env: SaveUserEnvelope = serde_json::from_str(r#"{"success": true}"#).unwrap();
        assert!(matches!(
            env.into_result(),
            Err(BackendError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_send_message_reply() {
        let env: SendMessageEnvelope = serde_json::from_str(
            r#"{"success": true, "response": "Hi there!", "messages_left": 9, "session_ended": false}"#,
        )
        .unwrap();
        assert_eq!(
            env.into_result().unwrap(),
            MessageReply {
                response: "Hi there!".to_string(),
                messages_left: 9,
                session_ended: false,
            }
        );
    }

    #[test]
    fn test_send_message_limit_reached() {
        let env: SendMessageEnvelope = serde_json::from_str(
            r#"{"success": false, "error": "limit_reached", "message": "You have reached your limit."}"#,
        )
        .unwrap();
        assert_eq!(
            env.into_result(),
            Err(BackendError::LimitReached {
                message: Some("You have reached your limit.".to_string())
            })
        );
    }

    #[test]
    fn test_send_message_other_error() {
        let env: SendMessageEnvelope = serde_json::from_str(
            r#"{"success": false, "error": "Missing session_id or message"}"#,
        )
        .unwrap();
        assert_eq!(
            env.into_result(),
            Err(BackendError::Rejected(
                "Missing session_id or message".to_string()
            ))
        );
    }

    #[test]
    fn test_send_message_missing_quota_is_malformed() {
        let env: SendMessageEnvelope =
            serde_json::from_str(r#"{"success": true, "response": "ok"}"#).unwrap();
        assert!(matches!(
            env.into_result(),
            Err(BackendError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_send_message_request_shape() {
        let req = SendMessageRequest {
            session_id: "abc".to_string(),
            message: "Hello".to_string(),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["session_id"], "abc");
        assert_eq!(json["message"], "Hello");
    }
}
