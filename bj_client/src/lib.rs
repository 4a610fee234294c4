//! Internal modules for the blackjack client.
//!
//! This library provides input parsing and the terminal game loop used by
//! the bj_client binary.

pub mod commands;
pub mod terminal;
