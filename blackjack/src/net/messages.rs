use std::fmt;

use crate::game::constants::STAND_MARKER;

/// A dealer reply from the hit/stand phase as seen by a client: the
/// player's full hand followed by an optional message.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct HandUpdate {
    pub hand: String,
    pub message: String,
}

impl HandUpdate {
    /// Split a reply after its last card. Card tokens contain spaces,
    /// so splitting on whitespace would cut the hand apart.
    #[must_use]
    pub fn parse(reply: &str) -> Self {
        match reply.rfind(']') {
            Some(idx) => {
                let (hand, message) = reply.split_at(idx + 1);
                Self {
                    hand: hand.to_string(),
                    message: message.trim().to_string(),
                }
            }
            None => Self {
                hand: String::new(),
                message: reply.trim().to_string(),
            },
        }
    }

    /// Card tokens of the hand, e.g. `["[ A♥]", "[10♣]"]`.
    #[must_use]
    pub fn cards(&self) -> Vec<&str> {
        split_cards(&self.hand)
    }

    /// Whether the dealer ended the session.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.message == STAND_MARKER
    }
}

impl fmt::Display for HandUpdate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.hand, self.message)
    }
}

/// Split a rendered hand into its card tokens.
#[must_use]
pub fn split_cards(hand: &str) -> Vec<&str> {
    hand.split_inclusive(']')
        .filter(|token| token.starts_with('['))
        .collect()
}
