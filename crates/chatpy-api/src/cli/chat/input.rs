//! Readline input for the chat loop.
//!
//! The partially typed line lives in the `Readline` state, not in the
//! `next_line` future, so the loop can race `next_line` against backend
//! replies in `tokio::select!` without losing keystrokes.

use rustyline_async::{Readline, ReadlineError, ReadlineEvent, SharedWriter};
use tracing::warn;

/// What the user did at the prompt.
#[derive(Debug, PartialEq, Eq)]
pub enum InputEvent {
    /// A submitted line, as typed. The widget trims it.
    Line(String),
    /// Ctrl+D, or the terminal went away.
    Eof,
    /// Ctrl+C.
    Interrupted,
}

impl InputEvent {
    fn from_readline(result: Result<ReadlineEvent, ReadlineError>) -> Self {
        match result {
            Ok(ReadlineEvent::Line(line)) => InputEvent::Line(line),
            Ok(ReadlineEvent::Eof) => InputEvent::Eof,
            Ok(ReadlineEvent::Interrupted) => InputEvent::Interrupted,
            Err(e) => {
                warn!(error = %e, "Terminal input failed, closing chat");
                InputEvent::Eof
            }
        }
    }
}

pub struct ChatInput {
    rl: Readline,
}

impl ChatInput {
    /// Take over the terminal with `prompt`.
    ///
    /// The returned `SharedWriter` prints above the prompt line; hand it to
    /// the terminal view.
    pub fn new(prompt: String) -> Result<(Self, SharedWriter), ReadlineError> {
        let (rl, writer) = Readline::new(prompt)?;
        Ok((Self { rl }, writer))
    }

    /// Swap the prompt, e.g. to the placeholder while input is disabled.
    pub fn set_prompt(&mut self, prompt: &str) {
        let _ = self.rl.update_prompt(prompt);
    }

    pub async fn next_line(&mut self) -> InputEvent {
        InputEvent::from_readline(self.rl.readline().await)
    }

    pub fn clear(&mut self) {
        let _ = self.rl.clear();
    }
}
