//! Slash command parsing for the chat loop.
//!
//! Commands start with `/` and map onto widget chrome actions and a few
//! terminal conveniences.

use console::style;

/// Available slash commands in the chat loop.
#[derive(Debug, PartialEq)]
pub enum ChatCommand {
    /// Show available commands.
    Help,
    /// Clear the terminal screen.
    Clear,
    /// Collapse or expand the chat body.
    Minimize,
    /// Show the session phase and remaining messages.
    Status,
    /// Discard the session and start over with a new intake.
    Reload,
    /// Close the widget and exit.
    Close,
    /// Exit without closing the widget.
    Exit,
    /// Unknown command.
    Unknown(String),
}

/// Parse user input as a slash command.
///
/// Returns `None` if the input doesn't start with `/`.
pub fn parse(input: &str) -> Option<ChatCommand> {
    let trimmed = input.trim();
    if !trimmed.starts_with('/') {
        return None;
    }

    let cmd = trimmed
        .split_whitespace()
        .next()
        .unwrap_or(trimmed)
        .to_lowercase();

    match cmd.as_str() {
        "/help" | "/h" | "/?" => Some(ChatCommand::Help),
        "/clear" | "/cls" => Some(ChatCommand::Clear),
        "/min" | "/minimize" | "/toggle" => Some(ChatCommand::Minimize),
        "/status" => Some(ChatCommand::Status),
        "/reload" | "/refresh" => Some(ChatCommand::Reload),
        "/close" => Some(ChatCommand::Close),
        "/exit" | "/quit" | "/q" => Some(ChatCommand::Exit),
        other => Some(ChatCommand::Unknown(other.to_string())),
    }
}

/// Help text listing all available commands.
pub fn help_text() -> String {
    let rows = [
        ("/help", "Show this help message"),
        ("/clear", "Clear the screen"),
        ("/min", "Minimize or expand the chat"),
        ("/status", "Show session status and messages left"),
        ("/reload", "Start over with a new session"),
        ("/close", "Close the chat widget"),
        ("/exit", "Leave the chat"),
    ];

    let mut out = format!("\n  {}\n\n", style("Available commands:").bold());
    for (cmd, desc) in rows {
        out.push_str(&format!("  {:<9} {}\n", style(cmd).cyan(), desc));
    }
    out.push_str(&format!(
        "\n  {}\n",
        style("Ctrl+D to exit, Ctrl+C safe (no message loss)").dim()
    ));
    out
}
