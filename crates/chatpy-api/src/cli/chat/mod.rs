//! Interactive terminal chat for the ChatPy widget.
//!
//! The widget core renders through `TerminalView`; intake happens with
//! dialoguer prompts, the conversation with an async readline loop and
//! slash commands. Entry point: `loop_runner::run_chat`.

pub mod banner;
pub mod commands;
pub mod input;
pub mod intake_prompt;
pub mod loop_runner;
pub mod renderer;
pub mod settings;
pub mod terminal_view;
