//! Two-step intake flow gating access to the chat.
//!
//! Step 1 collects the required identity fields and is validated before the
//! form advances. Step 2 collects optional school details. Submitting the
//! record creates the server session and hands it to the controller.

use chatpy_types::chat::{ChatMessage, SessionId};
use chatpy_types::error::{BackendError, IntakeError, SubmitError};
use chatpy_types::intake::{IntakeRecord, IntakeStep};
use tracing::{debug, info, warn};

use crate::backend::ChatBackend;
use crate::controller::SessionController;
use crate::view::ChatView;

/// Alert shown when the intake request never produced a readable answer.
pub const INTAKE_CONNECTION_ERROR: &str = "Error connecting to server. Please try again.";

/// Build the bot's first message after a successful intake.
pub fn welcome_message(full_name: &str, institution: &str, messages_left: u32) -> String {
    format!(
        "Thanks, {full_name}! I'm ready to help you with any questions about {institution}. \
         You have {messages_left} messages in this session. Let's start chatting! \u{1F604}"
    )
}

pub struct IntakeFlow {
    step: IntakeStep,
    modal_open: bool,
    institution: String,
}

impl IntakeFlow {
    pub fn new(institution: impl Into<String>) -> Self {
        Self {
            step: IntakeStep::Details,
            modal_open: false,
            institution: institution.into(),
        }
    }

    pub fn step(&self) -> IntakeStep {
        self.step
    }

    pub fn is_modal_open(&self) -> bool {
        self.modal_open
    }

    pub fn open_modal(&mut self, view: &mut impl ChatView) {
        self.modal_open = true;
        view.set_intake_modal_open(true);
        view.show_intake_step(self.step);
    }

    /// Hide the modal. The current step is kept for when it reopens.
    pub fn close_modal(&mut self, view: &mut impl ChatView) {
        self.modal_open = false;
        view.set_intake_modal_open(false);
    }

    /// Validate step 1 and move to step 2.
    ///
    /// On failure the user is alerted and the visible step does not change.
    pub fn advance_step(
        &mut self,
        record: &IntakeRecord,
        view: &mut impl ChatView,
    ) -> Result<(), IntakeError> {
        if let Err(e) = record.validate_details() {
            debug!(error = ?e, "Intake details rejected");
            view.alert(&e.to_string());
            return Err(e);
        }

        self.step = IntakeStep::School;
        view.show_intake_step(self.step);
        Ok(())
    }

    /// Go back to step 1. No validation.
    pub fn retreat_step(&mut self, view: &mut impl ChatView) {
        self.step = IntakeStep::Details;
        view.show_intake_step(self.step);
    }

    /// Submit the record and activate the session on success.
    ///
    /// Failures leave the modal open so the user can resubmit; no session
    /// exists until a submission succeeds. Once a session exists further
    /// submissions are refused without contacting the backend.
    #[tracing::instrument(name = "chat.submit_intake", skip_all)]
    pub async fn submit<B: ChatBackend>(
        &mut self,
        record: &IntakeRecord,
        backend: &B,
        controller: &mut SessionController,
        view: &mut impl ChatView,
    ) -> Result<SessionId, SubmitError> {
        if controller.session().session_id.is_some() {
            warn!("Intake submitted while a session already exists");
            return Err(IntakeError::SessionAlreadyActive.into());
        }

        let record = record.trimmed();
        if let Err(e) = record.validate_details() {
            view.alert(&e.to_string());
            return Err(e.into());
        }

        match backend.save_user(&record).await {
            Ok(session_id) => {
                controller.activate(session_id.clone(), view)?;
                self.close_modal(view);
                view.render_message(&ChatMessage::bot(welcome_message(
                    &record.full_name,
                    &self.institution,
                    controller.messages_left(),
                )));
                info!(session_id = %session_id, "Intake accepted");
                Ok(session_id)
            }
            Err(e) => {
                warn!(error = %e, "Intake submission failed");
                let notice = match &e {
                    BackendError::Rejected(reason) => format!("Error saving details: {reason}"),
                    BackendError::LimitReached { .. } => format!("Error saving details: {e}"),
                    BackendError::Transport(_) | BackendError::MalformedResponse(_) => {
                        INTAKE_CONNECTION_ERROR.to_string()
                    }
                };
                view.alert(&notice);
                Err(e.into())
            }
        }
    }

    pub fn reset(&mut self) {
        self.step = IntakeStep::Details;
        self.modal_open = false;
    }
}
