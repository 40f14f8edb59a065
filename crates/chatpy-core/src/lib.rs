//! Widget logic and port trait definitions for the ChatPy client.
//!
//! This crate defines the "ports" the outer layers implement: `ChatBackend`
//! (the remote chat API) and `ChatView` (whatever renders the widget). It
//! depends only on `chatpy-types` -- never on `chatpy-infra` or any
//! HTTP/terminal crate.

pub mod backend;
pub mod chrome;
pub mod controller;
pub mod intake;
pub mod view;
pub mod widget;

#[cfg(test)]
pub(crate) mod testing;
