//! Test doubles shared by the widget tests.

use std::collections::VecDeque;
use std::future::Future;
use std::sync::Mutex;

use chatpy_types::chat::{ChatMessage, SessionId};
use chatpy_types::error::BackendError;
use chatpy_types::intake::{IntakeRecord, IntakeStep};
use chatpy_types::wire::{MessageReply, SendMessageRequest};

use crate::backend::ChatBackend;
use crate::controller::{SendOutcome, SessionController};
use crate::view::ChatView;

/// View that records the latest state of every widget element.
#[derive(Debug, Default)]
pub struct RecordingView {
    pub transcript: Vec<ChatMessage>,
    pub alerts: Vec<String>,
    pub input_enabled: bool,
    pub placeholder: String,
    pub typing: bool,
    pub step: Option<IntakeStep>,
    pub modal_open: bool,
    pub minimized: bool,
    pub hidden: bool,
    pub resets: usize,
}

impl ChatView for RecordingView {
    fn render_message(&mut self, message: &ChatMessage) {
        self.transcript.push(message.clone());
    }

    fn set_input_enabled(&mut self, enabled: bool) {
        self.input_enabled = enabled;
    }

    fn set_input_placeholder(&mut self, placeholder: &str) {
        self.placeholder = placeholder.to_string();
    }

    fn set_typing_indicator(&mut self, visible: bool) {
        self.typing = visible;
    }

    fn show_intake_step(&mut self, step: IntakeStep) {
        self.step = Some(step);
    }

    fn set_intake_modal_open(&mut self, open: bool) {
        self.modal_open = open;
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }

    fn set_minimized(&mut self, minimized: bool) {
        self.minimized = minimized;
    }

    fn hide_widget(&mut self) {
        self.hidden = true;
    }

    fn reset(&mut self) {
        let resets = self.resets + 1;
        *self = RecordingView::default();
        self.resets = resets;
    }
}

/// Backend that answers from queues of canned results and records requests.
///
/// An exhausted queue answers with a transport error.
#[derive(Default)]
pub struct ScriptedBackend {
    save_user_results: Mutex<VecDeque<Result<SessionId, BackendError>>>,
    send_results: Mutex<VecDeque<Result<MessageReply, BackendError>>>,
    saved: Mutex<Vec<IntakeRecord>>,
    sent: Mutex<Vec<SendMessageRequest>>,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(id: &str) -> Self {
        let backend = Self::new();
        backend.push_save_user(Ok(SessionId(id.to_string())));
        backend
    }

    pub fn push_save_user(&self, result: Result<SessionId, BackendError>) {
        self.save_user_results.lock().unwrap().push_back(result);
    }

    pub fn push_reply(&self, result: Result<MessageReply, BackendError>) {
        self.send_results.lock().unwrap().push_back(result);
    }

    pub fn saved(&self) -> Vec<IntakeRecord> {
        self.saved.lock().unwrap().clone()
    }

    pub fn sent(&self) -> Vec<SendMessageRequest> {
        self.sent.lock().unwrap().clone()
    }

    pub fn saved_count(&self) -> usize {
        self.saved.lock().unwrap().len()
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

impl ChatBackend for ScriptedBackend {
    fn save_user(
        &self,
        record: &IntakeRecord,
    ) -> impl Future<Output = Result<SessionId, BackendError>> + Send {
        self.saved.lock().unwrap().push(record.clone());
        let result = self
            .save_user_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(BackendError::Transport("no scripted response".to_string())));
        async move { result }
    }

    fn send_message(
        &self,
        request: &SendMessageRequest,
    ) -> impl Future<Output = Result<MessageReply, BackendError>> + Send {
        self.sent.lock().unwrap().push(request.clone());
        let result = self
            .send_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(BackendError::Transport("no scripted response".to_string())));
        async move { result }
    }
}

/// Backend whose requests never complete, like a server that stopped answering.
#[derive(Default)]
pub struct SilentBackend {
    sent: Mutex<Vec<SendMessageRequest>>,
}

impl SilentBackend {
    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

impl ChatBackend for SilentBackend {
    fn save_user(
        &self,
        _record: &IntakeRecord,
    ) -> impl Future<Output = Result<SessionId, BackendError>> + Send {
        std::future::pending()
    }

    fn send_message(
        &self,
        request: &SendMessageRequest,
    ) -> impl Future<Output = Result<MessageReply, BackendError>> + Send {
        self.sent.lock().unwrap().push(request.clone());
        std::future::pending()
    }
}

/// Begin a send, await the backend, and apply the result.
pub async fn round_trip<B: ChatBackend>(
    controller: &mut SessionController,
    backend: &B,
    text: &str,
    view: &mut RecordingView,
) -> Option<SendOutcome> {
    let outbound = controller.begin_send(text, view)?;
    let result = backend.send_message(&outbound.request).await;
    Some(controller.complete_send(outbound.seq, result, view))
}

pub fn reply(text: &str, messages_left: u32, session_ended: bool) -> Result<MessageReply, BackendError> {
    Ok(MessageReply {
        response: text.to_string(),
        messages_left,
        session_ended,
    })
}

pub fn ada() -> IntakeRecord {
    IntakeRecord {
        full_name: "Ada Lovelace".to_string(),
        email: "ada@example.com".to_string(),
        international: "no".to_string(),
        student_category: "High School".to_string(),
        student_type: "Returning".to_string(),
        ..Default::default()
    }
}
