use rand::{Rng, SeedableRng, rngs::StdRng, seq::SliceRandom};
use std::{fmt, str::FromStr};
use thiserror::Error;

use super::constants::{DECK_SIZE, SUIT_SIZE};

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Suit {
    Heart,
    Diamond,
    Spade,
    Club,
}

impl Suit {
    /// Suit of a card identifier's bucket. Buckets past the last suit
    /// fall through to clubs.
    #[must_use]
    pub const fn from_bucket(bucket: u8) -> Self {
        match bucket {
            0 => Self::Heart,
            1 => Self::Diamond,
            2 => Self::Spade,
            _ => Self::Club,
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            Self::Heart => "♥",
            Self::Diamond => "♦",
            Self::Spade => "♠",
            Self::Club => "♣",
        };
        write!(f, "{repr}")
    }
}

/// Placeholder for card identifiers.
pub type CardId = u8;

/// Display label for a rank value. King is zero since identifiers
/// are bucketed with a plain modulo.
#[must_use]
pub const fn rank_label(value: u8) -> &'static str {
    match value {
        0 => "K",
        1 => "A",
        2 => "2",
        3 => "3",
        4 => "4",
        5 => "5",
        6 => "6",
        7 => "7",
        8 => "8",
        9 => "9",
        10 => "10",
        11 => "J",
        12 => "Q",
        _ => "N",
    }
}

/// A card is just its identifier in a 52 card deck. Rank and suit are
/// derived from the identifier.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Card(pub CardId);

impl Card {
    #[must_use]
    pub const fn rank(&self) -> u8 {
        self.0 % SUIT_SIZE
    }

    #[must_use]
    pub const fn suit(&self) -> Suit {
        Suit::from_bucket(self.0 / SUIT_SIZE)
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[{:>2}{}]", rank_label(self.rank()), self.suit())
    }
}

/// Format a card identifier as a `[<rank><suit>]` token.
#[must_use]
pub fn format_card(id: CardId) -> String {
    Card(id).to_string()
}

/// Cards dealt to a player during a session. Cards are only ever
/// appended.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, card: Card) {
        self.cards.push(card);
    }

    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for card in &self.cards {
            write!(f, "{card}")?;
        }
        Ok(())
    }
}

/// Type alias for bets. Bets are echoed back to the player and never
/// settled, so negative amounts are kept as-is.
pub type Chips = i32;

/// Parse a bet the way C's `atoi` does: leading whitespace, an optional
/// sign, then digits up to the first non-digit. Text without digits is
/// a bet of zero. Out of range values saturate.
#[must_use]
pub fn parse_bet(input: &str) -> Chips {
    let input = input.trim_start();
    let (negative, digits) = match input.as_bytes().first() {
        Some(b'-') => (true, &input[1..]),
        Some(b'+') => (false, &input[1..]),
        _ => (false, input),
    };
    let ceiling = i64::from(Chips::MAX) + 1;
    let magnitude = digits
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0i64, |acc, digit| {
            (acc * 10 + i64::from(digit - b'0')).min(ceiling)
        });
    let value = if negative { -magnitude } else { magnitude };
    value.clamp(i64::from(Chips::MIN), i64::from(Chips::MAX)) as Chips
}

/// How a fresh deck is shuffled.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum ShuffleMode {
    /// Swap every slot once with a random slot. Every position is
    /// touched, but the resulting permutation isn't uniform.
    #[default]
    Classic,
    /// Fisher-Yates.
    Uniform,
}

impl fmt::Display for ShuffleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::Classic => "classic",
            Self::Uniform => "uniform",
        };
        write!(f, "{repr}")
    }
}

#[derive(Debug, Error, Eq, PartialEq)]
#[error("unknown shuffle mode {0:?} (expected classic or uniform)")]
pub struct ParseShuffleModeError(pub String);

impl FromStr for ShuffleMode {
    type Err = ParseShuffleModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "classic" => Ok(Self::Classic),
            "uniform" => Ok(Self::Uniform),
            _ => Err(ParseShuffleModeError(s.to_string())),
        }
    }
}

/// Errors that can occur while dealing.
#[derive(Debug, Eq, Error, PartialEq)]
pub enum DealError {
    #[error("deck exhausted: all {DECK_SIZE} cards are in use")]
    DeckExhausted,
}

/// A session's private deck. Draws pick random unused slots, so the
/// order cards come out in doesn't depend only on the shuffle.
#[derive(Debug)]
pub struct Deck<R = StdRng> {
    cards: [CardId; DECK_SIZE],
    in_use: [bool; DECK_SIZE],
    drawn: usize,
    rng: R,
}

impl Deck<StdRng> {
    /// Build and shuffle a deck seeded from the thread-local RNG.
    #[must_use]
    pub fn new_shuffled(mode: ShuffleMode) -> Self {
        Self::with_rng(StdRng::from_rng(&mut rand::rng()), mode)
    }

    /// Build and shuffle a deck with a fixed seed. Two decks built with
    /// the same seed and mode deal the same cards.
    #[must_use]
    pub fn seeded(seed: u64, mode: ShuffleMode) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed), mode)
    }
}

impl<R: Rng> Deck<R> {
    pub fn with_rng(rng: R, mode: ShuffleMode) -> Self {
        let mut cards = [0; DECK_SIZE];
        for (slot, id) in cards.iter_mut().zip(0..) {
            *slot = id;
        }
        let mut deck = Self {
            cards,
            in_use: [false; DECK_SIZE],
            drawn: 0,
            rng,
        };
        deck.shuffle(mode);
        deck
    }

    fn shuffle(&mut self, mode: ShuffleMode) {
        match mode {
            ShuffleMode::Classic => {
                for i in 0..DECK_SIZE {
                    let j = self.rng.random_range(0..DECK_SIZE);
                    self.cards.swap(i, j);
                }
            }
            ShuffleMode::Uniform => self.cards.shuffle(&mut self.rng),
        }
    }

    /// Draw a card that hasn't been drawn from this deck yet.
    ///
    /// # Errors
    ///
    /// Returns [`DealError::DeckExhausted`] once all cards are in use.
    pub fn draw(&mut self) -> Result<CardId, DealError> {
        if self.drawn >= DECK_SIZE {
            return Err(DealError::DeckExhausted);
        }
        let mut slot = self.rng.random_range(0..DECK_SIZE);
        while self.in_use[slot] {
            slot = self.rng.random_range(0..DECK_SIZE);
        }
        self.in_use[slot] = true;
        self.drawn += 1;
        Ok(self.cards[slot])
    }

    /// Card identifiers in slot order.
    #[must_use]
    pub fn cards(&self) -> &[CardId] {
        &self.cards
    }

    #[must_use]
    pub fn drawn(&self) -> usize {
        self.drawn
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        DECK_SIZE - self.drawn
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    // === Card Formatting Tests ===

    #[test]
    fn test_format_hearts_bucket() {
        assert_eq!(format_card(0), "[ K♥]");
        assert_eq!(format_card(1), "[ A♥]");
        assert_eq!(format_card(9), "[ 9♥]");
        assert_eq!(format_card(10), "[10♥]");
        assert_eq!(format_card(11), "[ J♥]");
        assert_eq!(format_card(12), "[ Q♥]");
    }

    #[test]
    fn test_format_other_suits() {
        assert_eq!(format_card(13), "[ K♦]");
        assert_eq!(format_card(27), "[ A♠]");
        assert_eq!(format_card(51), "[ Q♣]");
    }

    #[test]
    fn test_format_out_of_range_falls_through_to_clubs() {
        assert_eq!(Card(52).suit(), Suit::Club);
        assert_eq!(format_card(255), format!("[{:>2}♣]", rank_label(255 % 13)));
    }

    #[test]
    fn test_rank_label_fallback() {
        assert_eq!(rank_label(13), "N");
        assert_eq!(rank_label(u8::MAX), "N");
    }

    #[test]
    fn test_every_bucket_has_distinct_ranks() {
        for bucket in 0..4u8 {
            let ranks: HashSet<_> = (0..SUIT_SIZE)
                .map(|offset| Card(bucket * SUIT_SIZE + offset).rank())
                .collect();
            assert_eq!(ranks.len(), SUIT_SIZE as usize);
            let suits: HashSet<_> = (0..SUIT_SIZE)
                .map(|offset| Card(bucket * SUIT_SIZE + offset).suit())
                .collect();
            assert_eq!(suits.len(), 1);
        }
    }

    #[test]
    fn test_hand_display_concatenates_cards() {
        let mut hand = Hand::new();
        assert_eq!(hand.to_string(), "");
        hand.push(Card(1));
        hand.push(Card(0));
        assert_eq!(hand.to_string(), "[ A♥][ K♥]");
        assert_eq!(hand.len(), 2);
    }

    // === Bet Parsing Tests ===

    #[test]
    fn test_parse_bet_plain() {
        assert_eq!(parse_bet("100"), 100);
        assert_eq!(parse_bet("0"), 0);
    }

    #[test]
    fn test_parse_bet_atoi_quirks() {
        assert_eq!(parse_bet("  42"), 42);
        assert_eq!(parse_bet("+7"), 7);
        assert_eq!(parse_bet("-15"), -15);
        assert_eq!(parse_bet("12abc"), 12);
        assert_eq!(parse_bet("abc"), 0);
        assert_eq!(parse_bet("-"), 0);
        assert_eq!(parse_bet(""), 0);
    }

    #[test]
    fn test_parse_bet_saturates() {
        assert_eq!(parse_bet("99999999999999999999"), Chips::MAX);
        assert_eq!(parse_bet("-99999999999999999999"), Chips::MIN);
        assert_eq!(parse_bet("2147483648"), Chips::MAX);
        assert_eq!(parse_bet("-2147483648"), Chips::MIN);
    }

    // === Shuffle Mode Tests ===

    #[test]
    fn test_shuffle_mode_from_str() {
        assert_eq!("classic".parse(), Ok(ShuffleMode::Classic));
        assert_eq!("Uniform".parse(), Ok(ShuffleMode::Uniform));
        assert!("riffle".parse::<ShuffleMode>().is_err());
        assert_eq!(ShuffleMode::default(), ShuffleMode::Classic);
    }

    // === Deck Tests ===

    #[test]
    fn test_deck_is_a_permutation() {
        for mode in [ShuffleMode::Classic, ShuffleMode::Uniform] {
            let deck = Deck::new_shuffled(mode);
            let ids: HashSet<_> = deck.cards().iter().copied().collect();
            assert_eq!(ids.len(), DECK_SIZE);
            assert!(ids.iter().all(|&id| usize::from(id) < DECK_SIZE));
        }
    }

    #[test]
    fn test_deck_draws_every_card_once() {
        let mut deck = Deck::seeded(7, ShuffleMode::Classic);
        let mut seen = HashSet::new();
        for _ in 0..DECK_SIZE {
            assert!(seen.insert(deck.draw().unwrap()));
        }
        assert_eq!(seen.len(), DECK_SIZE);
        assert_eq!(deck.remaining(), 0);
        assert_eq!(deck.drawn(), DECK_SIZE);
    }

    #[test]
    fn test_deck_exhaustion() {
        let mut deck = Deck::seeded(1, ShuffleMode::Uniform);
        for _ in 0..DECK_SIZE {
            deck.draw().unwrap();
        }
        assert_eq!(deck.draw(), Err(DealError::DeckExhausted));
        assert_eq!(deck.draw(), Err(DealError::DeckExhausted));
    }

    #[test]
    fn test_seeded_decks_deal_identically() {
        let mut a = Deck::seeded(42, ShuffleMode::Classic);
        let mut b = Deck::seeded(42, ShuffleMode::Classic);
        assert_eq!(a.cards(), b.cards());
        for _ in 0..10 {
            assert_eq!(a.draw(), b.draw());
        }
    }

    #[test]
    fn test_fresh_deck_counts() {
        let deck = Deck::new_shuffled(ShuffleMode::default());
        assert_eq!(deck.drawn(), 0);
        assert_eq!(deck.remaining(), DECK_SIZE);
    }
}
