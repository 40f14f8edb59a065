//! Terminal rendering of transcript messages.
//!
//! Bot replies may carry light markdown and embedded newlines; they go
//! through a `termimad` skin. User messages are echoed plainly.

use console::style;
use termimad::MadSkin;
use termimad::crossterm::style::Color;

use chatpy_types::chat::{ChatMessage, Sender};

pub struct ChatRenderer {
    skin: MadSkin,
}

impl ChatRenderer {
    pub fn new() -> Self {
        let mut skin = MadSkin::default_dark();
        skin.bold.set_fg(Color::Cyan);
        skin.inline_code.set_fg(Color::Yellow);
        Self { skin }
    }

    /// Render one message as indented terminal lines, ready to print.
    pub fn render(&self, message: &ChatMessage) -> String {
        match message.sender {
            Sender::User => format!("  {} {}", style("You >").green().bold(), message.text),
            Sender::Bot => {
                let body = self.skin.term_text(&message.text).to_string();
                let mut lines = body.trim_end().lines();
                let mut out = format!(
                    "  {} {}",
                    style("Bot >").cyan().bold(),
                    lines.next().unwrap_or_default()
                );
                for line in lines {
                    out.push_str("\n        ");
                    out.push_str(line);
                }
                out
            }
        }
    }
}

impl Default for ChatRenderer {
    fn default() -> Self {
        Self::new()
    }
}
