//! Shared domain types for the ChatPy widget client.
//!
//! This crate contains the types passed between the widget core, the HTTP
//! backend client and the terminal frontend: the chat session, intake
//! records, rendered messages, the backend wire envelopes, client
//! configuration, and their associated error types.
//!
//! Zero infrastructure dependencies -- only serde and thiserror.

pub mod chat;
pub mod config;
pub mod error;
pub mod intake;
pub mod wire;
