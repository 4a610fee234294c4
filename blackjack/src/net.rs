//! Networking layer for dealer-player communication.
//!
//! This module provides TCP-based networking with a plaintext,
//! newline-delimited protocol. The dealer runs one `tokio` task per
//! connection.

/// Async TCP client for playing against a dealer.
pub mod client;

/// Error types for framing, sessions, and clients.
pub mod errors;

/// Client-side views of dealer replies.
pub mod messages;

/// Accept loop and per-connection session driver.
pub mod server;

/// Length-checked message framing.
pub mod utils;
