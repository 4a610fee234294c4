use std::fmt;

/// What to do with one line typed by the player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Leave the table without telling the dealer.
    Quit,
    /// Send the line to the dealer, terminator removed.
    Send(String),
}

impl fmt::Display for Input {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Quit => write!(f, "quit"),
            Self::Send(line) => write!(f, "send {line:?}"),
        }
    }
}

/// Parse a raw line as returned by `read_line`.
///
/// A bare newline or end of input means quit. Anything else, even
/// whitespace, goes to the dealer, which has the final say on what a
/// valid name, bet or choice is.
///
/// # Examples
///
/// ```
/// use bj_client::commands::{Input, parse_input};
///
/// assert_eq!(parse_input("\n"), Input::Quit);
/// assert_eq!(parse_input(""), Input::Quit);
/// assert_eq!(parse_input("h\n"), Input::Send("h".to_string()));
/// ```
pub fn parse_input(raw: &str) -> Input {
    let line = raw.strip_suffix('\n').map_or(raw, |line| line.strip_suffix('\r').unwrap_or(line));
    if raw.is_empty() || line.is_empty() {
        Input::Quit
    } else {
        Input::Send(line.to_string())
    }
}
