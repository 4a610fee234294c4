//! Blackjack dealing engine.
//!
//! This module provides the per-session game implementation including:
//! - Card identifiers, formatting, and the session's private deck
//! - A typed state machine for the name, bet, and hit/stand phases
//! - Replies rendered as protocol text

pub mod constants;
pub mod entities;

mod state_machine;

pub use state_machine::*;
