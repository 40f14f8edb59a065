//! Main chat loop orchestration.
//!
//! Coordinates the widget lifecycle in the terminal: banner, intake form,
//! readline input loop with slash commands, reload back to intake, and
//! closing the widget.
//!
//! Messages are delivered on spawned tasks. The input loop waits on the
//! keyboard and on replies at the same time, so slash commands work while
//! the bot is still typing.

use console::style;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use chatpy_core::controller::OutboundMessage;
use chatpy_core::widget::{ChatWidget, WidgetEvent, deliver};
use chatpy_infra::http::HttpChatBackend;
use chatpy_types::chat::SessionPhase;

use super::banner::print_welcome_banner;
use super::commands::{self, ChatCommand};
use super::input::{ChatInput, InputEvent};
use super::intake_prompt::{IntakeOutcome, run_intake};
use super::renderer::ChatRenderer;
use super::settings::ChatSettings;
use super::terminal_view::TerminalView;

type TerminalWidget = ChatWidget<HttpChatBackend, TerminalView>;

/// What the input loop wants to happen next.
enum LoopExit {
    /// Leave the program.
    Quit,
    /// State was discarded; start again from the intake form.
    Restart,
}

/// Run the interactive chat widget until the user leaves or closes it.
pub async fn run_chat(settings: ChatSettings) -> anyhow::Result<()> {
    let config = settings.resolve().await;
    let backend = HttpChatBackend::from_config(&config)
        .map_err(|e| anyhow::anyhow!("Failed to create backend client: {e}"))?;

    info!(
        base_url = %backend.base_url(),
        message_quota = config.message_quota,
        "Starting chat widget"
    );

    print_welcome_banner(&config.institution, backend.base_url(), config.message_quota);

    let view = TerminalView::new(ChatRenderer::new());
    let mut widget = ChatWidget::new(backend, view, &config);
    widget.mount();

    loop {
        widget.view_mut().detach_writer();
        match run_intake(&mut widget).await? {
            IntakeOutcome::Accepted => {}
            IntakeOutcome::Abandoned => {
                println!("\n  {}", style("No session started. Goodbye!").dim());
                return Ok(());
            }
        }

        match input_loop(&mut widget).await? {
            LoopExit::Quit => break,
            LoopExit::Restart => continue,
        }
    }

    info!(
        phase = %widget.controller().phase(),
        messages_left = widget.controller().messages_left(),
        "Chat widget finished"
    );
    Ok(())
}

/// What woke the input loop.
enum Wakeup {
    Input(InputEvent),
    Reply(WidgetEvent),
}

/// Deliver an accepted message on its own task; the result comes back on `replies`.
fn spawn_delivery(
    backend: HttpChatBackend,
    outbound: OutboundMessage,
    replies: mpsc::UnboundedSender<WidgetEvent>,
) {
    tokio::spawn(async move {
        let completed = deliver(&backend, outbound).await;
        if replies.send(completed).is_err() {
            debug!("Reply arrived after the chat loop ended, dropping it");
        }
    });
}

async fn input_loop(widget: &mut TerminalWidget) -> anyhow::Result<LoopExit> {
    let (mut chat_input, writer) = ChatInput::new(widget.view().prompt())
        .map_err(|e| anyhow::anyhow!("Failed to initialize terminal input: {e}"))?;
    widget.view_mut().attach_writer(writer);

    let (reply_tx, mut reply_rx) = mpsc::unbounded_channel();

    let exit = loop {
        let wakeup = tokio::select! {
            event = chat_input.next_line() => Wakeup::Input(event),
            Some(completed) = reply_rx.recv() => Wakeup::Reply(completed),
        };

        let text = match wakeup {
            Wakeup::Reply(completed) => {
                widget.dispatch(completed).await;
                if widget.controller().phase() == SessionPhase::Ended {
                    print_ended_hint(widget);
                }
                chat_input.set_prompt(&widget.view().prompt());
                continue;
            }
            Wakeup::Input(InputEvent::Eof) => {
                widget.view_mut().print_line(&format!("\n  {}", style("Goodbye!").dim()));
                break LoopExit::Quit;
            }
            Wakeup::Input(InputEvent::Interrupted) => {
                widget
                    .view_mut()
                    .print_line(&format!("  {}", style("Use /exit or Ctrl+D to leave.").dim()));
                continue;
            }
            Wakeup::Input(InputEvent::Line(text)) => text,
        };

        if text.trim().is_empty() {
            continue;
        }

        if let Some(cmd) = commands::parse(&text) {
            match cmd {
                ChatCommand::Help => {
                    widget.view_mut().print_line(&commands::help_text());
                }
                ChatCommand::Clear => chat_input.clear(),
                ChatCommand::Minimize => {
                    widget.dispatch(WidgetEvent::ToggleMinimized).await;
                }
                ChatCommand::Status => print_status(widget),
                ChatCommand::Reload => {
                    info!("Reloading chat widget");
                    widget.dispatch(WidgetEvent::Reload).await;
                    break LoopExit::Restart;
                }
                ChatCommand::Close => {
                    widget.dispatch(WidgetEvent::Dismiss).await;
                    break LoopExit::Quit;
                }
                ChatCommand::Exit => {
                    widget.view_mut().print_line(&format!("\n  {}", style("Goodbye!").dim()));
                    break LoopExit::Quit;
                }
                ChatCommand::Unknown(name) => {
                    widget.view_mut().print_line(&format!(
                        "  {} Unknown command: {}. Type /help for available commands.",
                        style("?").yellow(),
                        name
                    ));
                }
            }
            chat_input.set_prompt(&widget.view().prompt());
            continue;
        }

        if widget.chrome().is_minimized() {
            widget.view_mut().print_line(&format!(
                "  {}",
                style("Chat is minimized. Type /min to expand it first.").dim()
            ));
            continue;
        }

        match widget.controller().phase() {
            SessionPhase::Active if widget.controller().has_pending_request() => {
                widget.view_mut().print_line(&format!(
                    "  {}",
                    style("Still waiting for the last reply.").dim()
                ));
            }
            SessionPhase::Active => {
                if let Some(outbound) = widget.dispatch(WidgetEvent::Send(text)).await {
                    spawn_delivery(widget.backend().clone(), outbound, reply_tx.clone());
                }
            }
            SessionPhase::Ended => print_ended_hint(widget),
            SessionPhase::Unauthenticated => {
                warn!("Message typed without an active session");
            }
        }
        chat_input.set_prompt(&widget.view().prompt());
    };

    widget.view_mut().detach_writer();
    Ok(exit)
}

fn print_ended_hint(widget: &mut TerminalWidget) {
    let hint = format!("{} Type /reload to start over.", widget.view().placeholder());
    widget
        .view_mut()
        .print_line(&format!("  {}", style(hint).dim()));
}

fn print_status(widget: &mut TerminalWidget) {
    let phase = widget.controller().phase();
    let left = widget.controller().messages_left();
    let unread = widget.view().held_back_count();
    let session = widget
        .controller()
        .session()
        .session_id
        .as_ref()
        .map(|id| id.to_string())
        .unwrap_or_else(|| "none".to_string());
    widget.view_mut().print_line(&format!(
        "\n  {} {}\n  {} {}\n  {} {}\n  {} {}\n",
        style("Session:").bold(),
        style(session).dim(),
        style("State:").bold(),
        phase,
        style("Messages left:").bold(),
        left,
        style("Unread:").bold(),
        unread
    ));
}
