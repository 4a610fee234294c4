//! Network error types for framing and session handling.

use std::{io, net::SocketAddr};

use thiserror::Error;

use crate::game::{Phase, TurnError, entities::DealError};

/// Errors due to a message that was read but can't be used.
#[derive(Debug, Eq, Error, PartialEq)]
pub enum ProtocolError {
    /// Message size exceeded maximum allowed
    #[error("message size {actual} exceeds maximum {max}")]
    MessageTooLarge { actual: usize, max: usize },

    /// Message isn't valid UTF-8
    #[error("message is not valid UTF-8")]
    InvalidEncoding,

    /// Empty message where a name or bet was expected
    #[error("empty message while waiting for {phase}")]
    EmptyMessage { phase: Phase },

    /// Player name too long to echo back in the bet confirmation
    #[error("player name size {actual} exceeds maximum {max}")]
    NameTooLong { actual: usize, max: usize },

    /// Message sent after the player stood
    #[error("session already finished")]
    SessionFinished,
}

/// Errors that end a session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Reading from or writing to the connection failed
    #[error("transport error: {0}")]
    Transport(#[from] io::Error),

    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    #[error(transparent)]
    Deal(#[from] DealError),
}

impl From<TurnError> for SessionError {
    fn from(value: TurnError) -> Self {
        match value {
            TurnError::EmptyMessage { phase } => ProtocolError::EmptyMessage { phase }.into(),
            TurnError::NameTooLong { actual, max } => {
                ProtocolError::NameTooLong { actual, max }.into()
            }
            TurnError::SessionFinished => ProtocolError::SessionFinished.into(),
            TurnError::Deal(error) => error.into(),
        }
    }
}

/// Errors seen by a player's client.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("couldn't connect to {addr}: {source}")]
    Connect {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },

    /// The dealer closed the connection
    #[error("dealer closed the connection")]
    Disconnected,

    #[error(transparent)]
    Session(#[from] SessionError),
}

/// Result type for session operations
pub type Result<T> = std::result::Result<T, SessionError>;
