//! # Blackjack
//!
//! A minimal blackjack dealer: every connection gets its own session
//! that deals from a private deck over a plaintext, line-based protocol.
//!
//! ## Architecture
//!
//! A session moves through these phases, one player message each:
//!
//! - **AwaitName**: the player's name is recorded and two cards are dealt
//! - **AwaitBet**: the bet is recorded and echoed back
//! - **HitOrStand**: `h` deals a card, `s` ends the session, anything
//!   else gets a re-prompt
//!
//! ## Core Modules
//!
//! - [`game`]: Deck, card formatting, and the session state machine
//! - [`net`]: Framing, the dealer server, and the client
//!
//! ## Example
//!
//! ```
//! use blackjack::{Deck, Session, SessionView, ShuffleMode};
//!
//! let session = Session::new(Deck::new_shuffled(ShuffleMode::Classic));
//! let (session, reply) = session.handle("Alice").unwrap();
//! assert_eq!(session.hand().len(), 2);
//! assert_eq!(reply.to_string(), session.hand().to_string());
//! ```

/// Dealing engine: deck, cards, and the session state machine.
pub mod game;
pub use game::{
    Phase, Reply, Session, SessionView, TurnError, TurnMessage,
    constants::{self, DECK_SIZE, MAX_MESSAGE_SIZE, MAX_NAME_SIZE},
    entities::{self, Card, Chips, Deck, Hand, ShuffleMode, format_card},
};

/// Networking components for dealer-player communication.
pub mod net;
pub use net::{
    client::Client,
    errors::{self, ClientError, ProtocolError, SessionError},
    messages, server, utils,
};
