//! ChatView: the rendering capability set the widget drives.
//!
//! Everything the widget shows goes through this trait, so the session
//! controller and intake flow can run against a terminal, a GUI, or a
//! recording double in tests.

use chatpy_types::chat::ChatMessage;
use chatpy_types::intake::IntakeStep;

/// Input placeholder before a session exists.
pub const PLACEHOLDER_UNAUTHENTICATED: &str = "Submit your details to start chatting";

/// Input placeholder while the session is active.
pub const PLACEHOLDER_ACTIVE: &str = "Enter your message";

/// Input placeholder once the session has ended.
pub const PLACEHOLDER_ENDED: &str = "Session ended. Refresh to start a new session.";

pub trait ChatView {
    /// Append a message to the transcript.
    fn render_message(&mut self, message: &ChatMessage);

    /// Enable or disable the message input and send button.
    fn set_input_enabled(&mut self, enabled: bool);

    fn set_input_placeholder(&mut self, placeholder: &str);

    /// Show or hide the "bot is typing" indicator.
    fn set_typing_indicator(&mut self, visible: bool);

    /// Switch the visible page of the intake form.
    fn show_intake_step(&mut self, step: IntakeStep);

    fn set_intake_modal_open(&mut self, open: bool);

    /// Blocking notice to the user (validation and intake errors).
    fn alert(&mut self, message: &str);

    /// Collapse or expand the widget body.
    fn set_minimized(&mut self, minimized: bool);

    /// Hide the whole widget.
    fn hide_widget(&mut self);

    /// Drop everything rendered so far, as a page reload would.
    fn reset(&mut self);
}
