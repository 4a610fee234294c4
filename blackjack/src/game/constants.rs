/// Number of cards in a deck. Card identifiers are `0..DECK_SIZE`.
pub const DECK_SIZE: usize = 52;

/// Number of cards per suit bucket.
pub const SUIT_SIZE: u8 = 13;

/// Cards dealt to a player once they're seated.
pub const INITIAL_HAND_SIZE: usize = 2;

/// Trailing message sent with the final hand after a player stands.
pub const STAND_MARKER: &str = "finished";

/// Trailing message sent when a hit/stand choice isn't recognized.
pub const REPROMPT: &str = "Please choose h (hit) or s (stand).";

/// Maximum size of a single protocol message in bytes, excluding
/// its line terminator.
pub const MAX_MESSAGE_SIZE: usize = 1024;

/// Longest player name in bytes. The bet confirmation echoes the name,
/// so this leaves room for the widest possible bet.
pub const MAX_NAME_SIZE: usize = MAX_MESSAGE_SIZE - "You have bet $-2147483648, .".len();
