//! Property-based tests for the deck and card formatting using proptest
//!
//! These tests check that draws never repeat across many seeds and both
//! shuffle modes, and that every identifier formats to a valid token.

use blackjack::{
    Card, DECK_SIZE, Deck, Session, SessionView, ShuffleMode,
    entities::{DealError, format_card},
};
use proptest::prelude::*;
use std::collections::HashSet;

const RANKS: [&str; 13] = [
    " K", " A", " 2", " 3", " 4", " 5", " 6", " 7", " 8", " 9", "10", " J", " Q",
];
const SUITS: [&str; 4] = ["♥", "♦", "♠", "♣"];

fn shuffle_mode_strategy() -> impl Strategy<Value = ShuffleMode> {
    prop_oneof![Just(ShuffleMode::Classic), Just(ShuffleMode::Uniform)]
}

proptest! {
    #[test]
    fn test_draws_never_repeat(seed in any::<u64>(), mode in shuffle_mode_strategy(), draws in 1..=DECK_SIZE) {
        let mut deck = Deck::seeded(seed, mode);
        let mut seen = HashSet::new();
        for _ in 0..draws {
            let card = deck.draw().unwrap();
            prop_assert!(usize::from(card) < DECK_SIZE);
            prop_assert!(seen.insert(card), "card {} drawn twice", card);
        }
        prop_assert_eq!(deck.remaining(), DECK_SIZE - draws);
    }

    #[test]
    fn test_53rd_draw_fails(seed in any::<u64>(), mode in shuffle_mode_strategy()) {
        let mut deck = Deck::seeded(seed, mode);
        for _ in 0..DECK_SIZE {
            prop_assert!(deck.draw().is_ok());
        }
        prop_assert_eq!(deck.draw(), Err(DealError::DeckExhausted));
    }

    #[test]
    fn test_shuffle_is_a_permutation(seed in any::<u64>(), mode in shuffle_mode_strategy()) {
        let deck = Deck::seeded(seed, mode);
        let mut cards = deck.cards().to_vec();
        cards.sort_unstable();
        let expected: Vec<u8> = (0..DECK_SIZE as u8).collect();
        prop_assert_eq!(cards, expected);
    }

    #[test]
    fn test_format_matches_grammar(id in 0u8..DECK_SIZE as u8) {
        let token = format_card(id);
        let inner = token.strip_prefix('[').and_then(|t| t.strip_suffix(']'));
        prop_assert!(inner.is_some(), "{}", token);
        let inner = inner.unwrap();
        let rank = RANKS.iter().find(|rank| inner.starts_with(*rank));
        prop_assert!(rank.is_some(), "{}", token);
        let suit = &inner[rank.unwrap().len()..];
        prop_assert!(SUITS.contains(&suit), "{}", token);
        prop_assert_eq!(RANKS[usize::from(Card(id).rank())], *rank.unwrap());
        prop_assert_eq!(SUITS[usize::from(id / 13)], suit);
    }

    #[test]
    fn test_hand_is_monotonic(seed in any::<u64>(), choices in prop::collection::vec(prop_oneof![Just("h"), Just("x"), Just(""), Just("hello")], 0..40)) {
        let (mut session, _) = Session::new(Deck::seeded(seed, ShuffleMode::Classic))
            .handle("Player")
            .unwrap();
        let (next, _) = session.handle("10").unwrap();
        session = next;

        for choice in choices {
            let before = session.hand().len();
            let (next, _) = session.handle(choice).unwrap();
            let expected = if choice.starts_with('h') { before + 1 } else { before };
            prop_assert_eq!(next.hand().len(), expected);
            session = next;
        }
    }
}

#[test]
fn test_format_is_a_bijection() {
    let tokens: HashSet<_> = (0..DECK_SIZE as u8).map(format_card).collect();
    assert_eq!(tokens.len(), DECK_SIZE);
}
