//! ChatWidget: event dispatcher tying chrome, intake and session together.
//!
//! Every user interaction arrives as a `WidgetEvent`. The dispatcher routes
//! it to the component that owns it; the session controller alone decides
//! whether input is enabled.
//!
//! Dispatching `Send` only accepts the message and returns the outbound
//! request. The caller runs it with [`deliver`] (typically on its own task)
//! and dispatches the resulting `SendCompleted`, so chrome events keep
//! working while a reply is pending.

use chatpy_types::config::ClientConfig;
use chatpy_types::error::BackendError;
use chatpy_types::intake::IntakeRecord;
use chatpy_types::wire::MessageReply;
use tracing::debug;

use crate::backend::ChatBackend;
use crate::chrome::WidgetChrome;
use crate::controller::{OutboundMessage, SessionController};
use crate::intake::IntakeFlow;
use crate::view::ChatView;

/// A user interaction with the widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetEvent {
    ToggleMinimized,
    Dismiss,
    /// Discard all state and start over.
    Reload,
    OpenIntake,
    CloseIntake,
    NextStep(IntakeRecord),
    PrevStep,
    SubmitIntake(IntakeRecord),
    Send(String),
    /// Backend result for the outbound message tagged `seq`.
    SendCompleted {
        seq: u64,
        result: Result<MessageReply, BackendError>,
    },
}

impl WidgetEvent {
    fn name(&self) -> &'static str {
        match self {
            WidgetEvent::ToggleMinimized => "toggle_minimized",
            WidgetEvent::Dismiss => "dismiss",
            WidgetEvent::Reload => "reload",
            WidgetEvent::OpenIntake => "open_intake",
            WidgetEvent::CloseIntake => "close_intake",
            WidgetEvent::NextStep(_) => "next_step",
            WidgetEvent::PrevStep => "prev_step",
            WidgetEvent::SubmitIntake(_) => "submit_intake",
            WidgetEvent::Send(_) => "send",
            WidgetEvent::SendCompleted { .. } => "send_completed",
        }
    }
}

pub struct ChatWidget<B: ChatBackend, V: ChatView> {
    backend: B,
    view: V,
    chrome: WidgetChrome,
    intake: IntakeFlow,
    controller: SessionController,
}

impl<B: ChatBackend, V: ChatView> ChatWidget<B, V> {
    pub fn new(backend: B, view: V, config: &ClientConfig) -> Self {
        Self {
            backend,
            view,
            chrome: WidgetChrome::new(),
            intake: IntakeFlow::new(config.institution.clone()),
            controller: SessionController::new(config.message_quota),
        }
    }

    /// Push the initial state into the view.
    pub fn mount(&mut self) {
        self.view.set_minimized(self.chrome.is_minimized());
        self.view.show_intake_step(self.intake.step());
        self.view.set_typing_indicator(false);
        self.controller.sync_view(&mut self.view);
    }

    /// Handle one event.
    ///
    /// Returns the request to deliver when a `Send` was accepted.
    pub async fn dispatch(&mut self, event: WidgetEvent) -> Option<OutboundMessage> {
        if self.chrome.is_dismissed() && event != WidgetEvent::Reload {
            debug!(event = event.name(), "Widget dismissed, ignoring event");
            return None;
        }
        debug!(event = event.name(), phase = %self.controller.phase(), "Dispatching widget event");

        match event {
            WidgetEvent::ToggleMinimized => {
                self.chrome.toggle_minimized(&mut self.view);
            }
            WidgetEvent::Dismiss => self.chrome.dismiss(&mut self.view),
            WidgetEvent::Reload => self.reload(),
            WidgetEvent::OpenIntake => self.intake.open_modal(&mut self.view),
            WidgetEvent::CloseIntake => self.intake.close_modal(&mut self.view),
            WidgetEvent::NextStep(record) => {
                let _ = self.intake.advance_step(&record, &mut self.view);
            }
            WidgetEvent::PrevStep => self.intake.retreat_step(&mut self.view),
            WidgetEvent::SubmitIntake(record) => {
                let _ = self
                    .intake
                    .submit(&record, &self.backend, &mut self.controller, &mut self.view)
                    .await;
            }
            WidgetEvent::Send(text) => {
                return self.controller.begin_send(&text, &mut self.view);
            }
            WidgetEvent::SendCompleted { seq, result } => {
                self.controller.complete_send(seq, result, &mut self.view);
            }
        }
        None
    }

    fn reload(&mut self) {
        self.chrome.reset();
        self.intake.reset();
        self.controller.reset();
        self.view.reset();
        self.mount();
    }

    pub fn controller(&self) -> &SessionController {
        &self.controller
    }

    pub fn intake(&self) -> &IntakeFlow {
        &self.intake
    }

    pub fn chrome(&self) -> &WidgetChrome {
        &self.chrome
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

/// Run an accepted message against the backend.
///
/// Touches no widget state, so it can run while the widget handles other
/// events. The returned `SendCompleted` must be dispatched to apply it.
#[tracing::instrument(name = "chat.send_message", skip_all, fields(seq = outbound.seq))]
pub async fn deliver<B: ChatBackend>(backend: &B, outbound: OutboundMessage) -> WidgetEvent {
    let result = backend.send_message(&outbound.request).await;
    WidgetEvent::SendCompleted {
        seq: outbound.seq,
        result,
    }
}
