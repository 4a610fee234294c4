//! Blackjack dealer server library.
//!
//! Exposes the configuration and logging layers so the binary stays thin
//! and both can be tested on their own.

pub mod config;
pub mod logging;
