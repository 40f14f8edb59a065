//! Infrastructure layer for the ChatPy widget client.
//!
//! Contains the implementation of the `ChatBackend` port defined in
//! `chatpy-core` (a reqwest client for the chat HTTP API) and the loader
//! for the client configuration file.

pub mod config;
pub mod http;
