//! `ChatView` implementation for the terminal.
//!
//! Transcript lines go through the readline `SharedWriter` while the input
//! loop is running (so they never corrupt the prompt) and to stdout
//! otherwise. While minimized, incoming messages are held back and shown
//! when the chat is expanded again. Once the widget is hidden nothing is
//! printed until it is reset.

use std::io::Write;
use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use rustyline_async::SharedWriter;

use chatpy_core::view::ChatView;
use chatpy_types::chat::ChatMessage;
use chatpy_types::intake::IntakeStep;

use super::renderer::ChatRenderer;

pub struct TerminalView {
    renderer: ChatRenderer,
    writer: Option<SharedWriter>,
    spinner: Option<ProgressBar>,
    typing: bool,
    input_enabled: bool,
    placeholder: String,
    minimized: bool,
    hidden: bool,
    held_back: Vec<String>,
}

impl TerminalView {
    pub fn new(renderer: ChatRenderer) -> Self {
        Self {
            renderer,
            writer: None,
            spinner: None,
            typing: false,
            input_enabled: false,
            placeholder: String::new(),
            minimized: false,
            hidden: false,
            held_back: Vec::new(),
        }
    }

    /// Route output through the readline writer.
    pub fn attach_writer(&mut self, writer: SharedWriter) {
        self.writer = Some(writer);
    }

    /// Go back to plain stdout (before blocking prompts take the terminal).
    pub fn detach_writer(&mut self) {
        self.writer = None;
    }

    #[cfg(test)]
    fn input_enabled(&self) -> bool {
        self.input_enabled
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    #[cfg(test)]
    fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn held_back_count(&self) -> usize {
        self.held_back.len()
    }

    /// Readline prompt reflecting whether input is accepted.
    pub fn prompt(&self) -> String {
        if self.input_enabled {
            format!("  {} ", style("You >").green().bold())
        } else {
            format!("  {} ", style(format!("({})", self.placeholder)).dim())
        }
    }

    /// Print a line to the active output. Silent while hidden.
    pub fn print_line(&mut self, line: &str) {
        if self.hidden {
            return;
        }
        match &mut self.writer {
            Some(writer) => {
                let _ = writeln!(writer, "{line}");
            }
            None => println!("{line}"),
        }
    }

    fn start_spinner(&mut self) {
        if self.spinner.is_some() || self.minimized || self.hidden {
            return;
        }
        let spinner = ProgressBar::new_spinner();
        if let Ok(spinner_style) = ProgressStyle::default_spinner().template("  {spinner:.cyan} {msg}") {
            spinner.set_style(spinner_style);
        }
        spinner.set_message("typing...");
        spinner.enable_steady_tick(Duration::from_millis(80));
        self.spinner = Some(spinner);
    }

    fn stop_spinner(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }
}

impl ChatView for TerminalView {
    fn render_message(&mut self, message: &ChatMessage) {
        if self.hidden {
            return;
        }
        let rendered = self.renderer.render(message);
        if self.minimized {
            self.held_back.push(rendered);
        } else {
            self.print_line(&rendered);
            self.print_line("");
        }
    }

    fn set_input_enabled(&mut self, enabled: bool) {
        self.input_enabled = enabled;
    }

    fn set_input_placeholder(&mut self, placeholder: &str) {
        self.placeholder = placeholder.to_string();
    }

    fn set_typing_indicator(&mut self, visible: bool) {
        self.typing = visible;
        if visible {
            self.start_spinner();
        } else {
            self.stop_spinner();
        }
    }

    fn show_intake_step(&mut self, step: IntakeStep) {
        let heading = match step {
            IntakeStep::Details => "Step 1 of 2 -- your details",
            IntakeStep::School => "Step 2 of 2 -- school information (optional)",
        };
        self.print_line(&format!("\n  {}", style(heading).bold()));
    }

    fn set_intake_modal_open(&mut self, open: bool) {
        if open {
            self.print_line(&format!(
                "\n  {}",
                style("Before we start, tell us a little about yourself.").cyan()
            ));
        } else {
            self.print_line(&format!("  {}", style("---").dim()));
        }
    }

    fn alert(&mut self, message: &str) {
        self.print_line(&format!("\n  {} {}", style("!").yellow().bold(), message));
    }

    fn set_minimized(&mut self, minimized: bool) {
        let was_minimized = self.minimized;
        self.minimized = minimized;
        if minimized && !was_minimized {
            self.stop_spinner();
            self.print_line(&format!(
                "  {} {}",
                style("[+]").cyan().bold(),
                style("Chat minimized. /min to expand.").dim()
            ));
        } else if !minimized && was_minimized {
            self.print_line(&format!("  {}", style("[\u{2212}]").cyan().bold()));
            for line in std::mem::take(&mut self.held_back) {
                self.print_line(&line);
                self.print_line("");
            }
            if self.typing {
                self.start_spinner();
            }
        }
    }

    fn hide_widget(&mut self) {
        self.stop_spinner();
        self.print_line(&format!("\n  {}", style("Chat closed.").dim()));
        self.hidden = true;
        self.held_back.clear();
    }

    fn reset(&mut self) {
        self.stop_spinner();
        self.held_back.clear();
        self.typing = false;
        self.minimized = false;
        self.hidden = false;
        self.input_enabled = false;
        self.placeholder.clear();
        self.print_line(&format!("\n  {}", style("--- reloaded ---").dim()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_held_back_while_minimized() {
        let mut view = TerminalView::new(ChatRenderer::new());
        view.set_minimized(true);
        view.render_message(&ChatMessage::bot("one"));
        view.render_message(&ChatMessage::bot("two"));
        assert_eq!(view.held_back_count(), 2);

        view.set_minimized(false);
        assert_eq!(view.held_back_count(), 0);
    }

    #[test]
    fn test_prompt_follows_input_state() {
        let mut view = TerminalView::new(ChatRenderer::new());
        view.set_input_placeholder("Session ended. Refresh to start a new session.");
        view.set_input_enabled(false);
        assert!(view.prompt().contains("Session ended"));

        view.set_input_enabled(true);
        assert!(view.prompt().contains("You >"));
    }

    #[test]
    fn test_reset_clears_state() {
        let mut view = TerminalView::new(ChatRenderer::new());
        view.set_minimized(true);
        view.render_message(&ChatMessage::user("hi"));
        view.hide_widget();
        assert!(view.is_hidden());

        view.reset();
        assert!(!view.is_hidden());
        assert_eq!(view.held_back_count(), 0);
        assert!(!view.input_enabled());
        assert_eq!(view.placeholder(), "");
    }

    #[test]
    fn test_hidden_view_drops_messages() {
        let mut view = TerminalView::new(ChatRenderer::new());
        view.set_minimized(true);
        view.render_message(&ChatMessage::bot("before close"));
        view.hide_widget();
        assert_eq!(view.held_back_count(), 0);

        view.render_message(&ChatMessage::bot("after close"));
        view.set_typing_indicator(true);
        assert_eq!(view.held_back_count(), 0);
        assert!(view.spinner.is_none());
    }

    #[test]
    fn test_typing_indicator_resumes_on_expand() {
        let mut view = TerminalView::new(ChatRenderer::new());
        view.set_minimized(true);
        view.set_typing_indicator(true);
        assert!(view.spinner.is_none());

        view.set_minimized(false);
        assert!(view.spinner.is_some());

        view.set_typing_indicator(false);
        assert!(view.spinner.is_none());
    }
}
