use thiserror::Error;

/// Client-side validation failures of the intake form.
///
/// The `Display` text is what the user sees; these never reach the server.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntakeError {
    #[error("Please fill in all required fields.")]
    MissingField(&'static str),

    #[error("Please enter a valid email address.")]
    InvalidEmail(String),

    #[error("a chat session is already active")]
    SessionAlreadyActive,
}

/// Errors from the remote chat backend.
///
/// `Rejected` and `LimitReached` are business errors reported in the
/// `{success: false}` envelope. `Transport` and `MalformedResponse` cover
/// everything that prevented a well-formed envelope from arriving.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("server rejected request: {0}")]
    Rejected(String),

    #[error("message limit reached")]
    LimitReached { message: Option<String> },
}

impl BackendError {
    /// Whether the error came from the server's business logic rather than
    /// the connection.
    pub fn is_server_reported(&self) -> bool {
        matches!(self, BackendError::Rejected(_) | BackendError::LimitReached { .. })
    }
}

/// Why an intake submission did not produce a session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Intake(#[from] IntakeError),

    #[error(transparent)]
    Backend(#[from] BackendError),
}
