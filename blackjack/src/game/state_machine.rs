//! Session state machine.
//!
//! A session moves through its phases strictly in order. Each phase is
//! its own type so a transition can only be taken from the phase that
//! owns it, and [`Session`] wraps the phases for callers that only see
//! raw protocol messages.

use enum_dispatch::enum_dispatch;
use log::{debug, info};
use std::fmt;
use thiserror::Error;

use super::constants::{INITIAL_HAND_SIZE, MAX_NAME_SIZE, REPROMPT, STAND_MARKER};
use super::entities::{Card, Chips, DealError, Deck, Hand, parse_bet};

/// Position of a session within the protocol.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Phase {
    AwaitName,
    AwaitBet,
    HitOrStand,
    Finished,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::AwaitName => "player name",
            Self::AwaitBet => "bet",
            Self::HitOrStand => "hit or stand",
            Self::Finished => "finished",
        };
        write!(f, "{repr}")
    }
}

/// Errors that can occur while handling a player's message.
#[derive(Debug, Eq, Error, PartialEq)]
pub enum TurnError {
    #[error("empty message while waiting for {phase}")]
    EmptyMessage { phase: Phase },
    #[error("player name is {actual} bytes, at most {max} allowed")]
    NameTooLong { actual: usize, max: usize },
    #[error("session already finished")]
    SessionFinished,
    #[error(transparent)]
    Deal(#[from] DealError),
}

/// Text trailing the hand in hit/stand replies.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TurnMessage {
    None,
    Finished,
    Reprompt,
}

impl fmt::Display for TurnMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::None => "",
            Self::Finished => STAND_MARKER,
            Self::Reprompt => REPROMPT,
        };
        write!(f, "{repr}")
    }
}

/// A reply from the dealer to exactly one player message. The
/// [`fmt::Display`] implementation is the wire text.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Reply {
    /// The initial cards dealt after the player gives their name.
    Dealt(Hand),
    /// Confirmation of the player's bet.
    BetPlaced { bet: Chips, player: String },
    /// The player's full hand after a hit/stand choice.
    Update { hand: Hand, message: TurnMessage },
}

impl Reply {
    /// Whether this is the last reply of a session.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Update {
                message: TurnMessage::Finished,
                ..
            }
        )
    }
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dealt(hand) => write!(f, "{hand}"),
            Self::BetPlaced { bet, player } => write!(f, "You have bet ${bet}, {player}."),
            Self::Update { hand, message } => write!(f, "{hand} {message}"),
        }
    }
}

/// Mutable session data shared across all phases.
#[derive(Debug)]
pub struct SessionData {
    /// Private deck. Dropped along with the session.
    pub(super) deck: Deck,
    pub player_name: Option<String>,
    pub bet: Option<Chips>,
    pub hand: Hand,
}

impl SessionData {
    #[must_use]
    pub fn new(deck: Deck) -> Self {
        Self {
            deck,
            player_name: None,
            bet: None,
            hand: Hand::new(),
        }
    }

    fn deal(&mut self) -> Result<Card, DealError> {
        let card = Card(self.deck.draw()?);
        self.hand.push(card);
        debug!(
            "dealt {card} to {}, {} cards left",
            self.player_name.as_deref().unwrap_or("new player"),
            self.deck.remaining()
        );
        Ok(card)
    }
}

/// Waiting for the player's name.
#[derive(Debug)]
pub struct AwaitName;

/// Waiting for the player's bet.
#[derive(Debug)]
pub struct AwaitBet;

/// Waiting for hit or stand. Repeats until the player stands.
#[derive(Debug)]
pub struct HitOrStand {
    hits: usize,
}

/// The player stood. No further messages are accepted.
#[derive(Debug)]
pub struct Finished;

/// Ties a phase type to its [`Phase`] tag.
pub trait PhaseMarker {
    const PHASE: Phase;
}

impl PhaseMarker for AwaitName {
    const PHASE: Phase = Phase::AwaitName;
}

impl PhaseMarker for AwaitBet {
    const PHASE: Phase = Phase::AwaitBet;
}

impl PhaseMarker for HitOrStand {
    const PHASE: Phase = Phase::HitOrStand;
}

impl PhaseMarker for Finished {
    const PHASE: Phase = Phase::Finished;
}

/// A blackjack session in phase `T`.
#[derive(Debug)]
pub struct Game<T> {
    pub data: SessionData,
    pub state: T,
}

/// Read-only queries available in every phase.
#[enum_dispatch]
pub trait SessionView {
    fn phase(&self) -> Phase;
    fn hand(&self) -> &Hand;
    fn player_name(&self) -> Option<&str>;
    fn bet(&self) -> Option<Chips>;
    fn cards_remaining(&self) -> usize;
}

impl<T: PhaseMarker> SessionView for Game<T> {
    fn phase(&self) -> Phase {
        T::PHASE
    }

    fn hand(&self) -> &Hand {
        &self.data.hand
    }

    fn player_name(&self) -> Option<&str> {
        self.data.player_name.as_deref()
    }

    fn bet(&self) -> Option<Chips> {
        self.data.bet
    }

    fn cards_remaining(&self) -> usize {
        self.data.deck.remaining()
    }
}

impl Game<AwaitName> {
    #[must_use]
    pub fn new(deck: Deck) -> Self {
        Self {
            data: SessionData::new(deck),
            state: AwaitName,
        }
    }

    /// Seat the player and deal their first two cards.
    ///
    /// # Errors
    ///
    /// Fails on an empty name, a name longer than [`MAX_NAME_SIZE`], or
    /// if the deck can't cover the deal.
    pub fn seat(mut self, name: &str) -> Result<(Game<AwaitBet>, Reply), TurnError> {
        if name.trim().is_empty() {
            return Err(TurnError::EmptyMessage {
                phase: Phase::AwaitName,
            });
        }
        if name.len() > MAX_NAME_SIZE {
            return Err(TurnError::NameTooLong {
                actual: name.len(),
                max: MAX_NAME_SIZE,
            });
        }
        self.data.player_name = Some(name.to_string());
        info!("Sending cards to {name}...");
        for _ in 0..INITIAL_HAND_SIZE {
            self.data.deal()?;
        }
        let reply = Reply::Dealt(self.data.hand.clone());
        Ok((
            Game {
                data: self.data,
                state: AwaitBet,
            },
            reply,
        ))
    }
}

impl Game<AwaitBet> {
    /// Record the player's bet. Anything that isn't a number is a bet
    /// of zero.
    ///
    /// # Errors
    ///
    /// Fails on an empty message.
    pub fn place_bet(mut self, amount: &str) -> Result<(Game<HitOrStand>, Reply), TurnError> {
        if amount.trim().is_empty() {
            return Err(TurnError::EmptyMessage {
                phase: Phase::AwaitBet,
            });
        }
        let bet = parse_bet(amount);
        let player = self.data.player_name.clone().unwrap_or_default();
        info!("{player} has bet {bet}");
        self.data.bet = Some(bet);
        Ok((
            Game {
                data: self.data,
                state: HitOrStand { hits: 0 },
            },
            Reply::BetPlaced { bet, player },
        ))
    }
}

impl Game<HitOrStand> {
    fn update(&self, message: TurnMessage) -> Reply {
        Reply::Update {
            hand: self.data.hand.clone(),
            message,
        }
    }

    /// Deal one more card.
    ///
    /// # Errors
    ///
    /// Fails once the deck is exhausted.
    pub fn hit(mut self) -> Result<(Self, Reply), TurnError> {
        self.data.deal()?;
        self.state.hits += 1;
        let reply = self.update(TurnMessage::None);
        Ok((self, reply))
    }

    #[must_use]
    pub fn stand(self) -> (Game<Finished>, Reply) {
        info!(
            "{} stands after {} hits with {}",
            self.data.player_name.as_deref().unwrap_or_default(),
            self.state.hits,
            self.data.hand
        );
        let reply = self.update(TurnMessage::Finished);
        (
            Game {
                data: self.data,
                state: Finished,
            },
            reply,
        )
    }

    #[must_use]
    pub fn reprompt(self) -> (Self, Reply) {
        let reply = self.update(TurnMessage::Reprompt);
        (self, reply)
    }
}

/// A session in any phase.
#[enum_dispatch(SessionView)]
#[derive(Debug)]
pub enum Session {
    AwaitName(Game<AwaitName>),
    AwaitBet(Game<AwaitBet>),
    HitOrStand(Game<HitOrStand>),
    Finished(Game<Finished>),
}

impl Session {
    /// Start a session with the given deck. The deck should be fresh.
    #[must_use]
    pub fn new(deck: Deck) -> Self {
        Self::AwaitName(Game::new(deck))
    }

    /// Handle one player message, returning the next session and the
    /// reply to send back. Once the hit/stand phase is reached only the
    /// first character of a message matters.
    ///
    /// # Errors
    ///
    /// Returns a [`TurnError`] if the message can't be handled in the
    /// current phase. The session should be dropped afterwards.
    pub fn handle(self, message: &str) -> Result<(Self, Reply), TurnError> {
        let message = message.trim_end_matches(['\r', '\n']);
        match self {
            Self::AwaitName(game) => {
                let (game, reply) = game.seat(message)?;
                Ok((game.into(), reply))
            }
            Self::AwaitBet(game) => {
                let (game, reply) = game.place_bet(message)?;
                Ok((game.into(), reply))
            }
            Self::HitOrStand(game) => match message.chars().next() {
                Some('h') => {
                    let (game, reply) = game.hit()?;
                    Ok((game.into(), reply))
                }
                Some('s') => {
                    let (game, reply) = game.stand();
                    Ok((game.into(), reply))
                }
                _ => {
                    let (game, reply) = game.reprompt();
                    Ok((game.into(), reply))
                }
            },
            Self::Finished(_) => Err(TurnError::SessionFinished),
        }
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        matches!(self, Self::Finished(_))
    }
}
