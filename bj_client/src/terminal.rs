//! Line-oriented player terminal.
//!
//! Prompts follow the message count: name, bet, then hit or stand until
//! the dealer says the hand is finished.

use anyhow::Result;
use blackjack::{Client, ClientError, messages::HandUpdate};
use log::debug;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::commands::{Input, parse_input};

pub const GOODBYE: &str = "Finishing the connection";
pub const DEALER_LEFT: &str = "The dealer closed the connection";

/// How a game at the terminal ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ending {
    /// The player stood and the dealer closed the hand.
    Finished,
    /// The player quit with an empty line or end of input.
    Quit,
    /// The dealer hung up first.
    DealerLeft,
}

/// What the player has been told so far.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    replies: usize,
    hand: String,
    message: String,
}

impl Transcript {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The prompt for the next line of input.
    #[must_use]
    pub fn prompt(&self) -> String {
        match self.replies {
            0 => "You are now seated at the table, let the dealer know your name.\nName: ".to_string(),
            1 => "How much would you like to bet?\nAmount: ".to_string(),
            2 => format!(
                "DEALER: {}\nWould you like to hit or stand?\nYour current hand is: {}\nChoice (h/s): ",
                self.message, self.hand
            ),
            _ => format!(
                "{}Would you like to hit or stand?\nChoice (h/s): ",
                self.status()
            ),
        }
    }

    /// Current hand, plus the dealer's message when there is one.
    #[must_use]
    pub fn status(&self) -> String {
        let mut status = format!("Your current hand is: {}\n", self.hand);
        if !self.message.is_empty() {
            status.push_str(&format!("DEALER: {}\n", self.message));
        }
        status
    }

    /// Record a dealer reply. Returns true once the hand is finished.
    pub fn record(&mut self, reply: &str) -> bool {
        let finished = match self.replies {
            0 => {
                self.hand = reply.to_string();
                false
            }
            1 => {
                self.message = reply.to_string();
                false
            }
            _ => {
                let update = HandUpdate::parse(reply);
                let finished = update.is_finished();
                self.hand = update.hand;
                self.message = update.message;
                finished
            }
        };
        self.replies += 1;
        finished
    }
}

/// Play one game, reading the player's lines from `input` and writing
/// prompts to `output`.
///
/// # Errors
///
/// Fails on terminal I/O errors and on any connection error other than
/// the dealer hanging up.
pub async fn play<R, W>(client: &mut Client, input: &mut R, output: &mut W) -> Result<Ending>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut transcript = Transcript::new();
    loop {
        output.write_all(transcript.prompt().as_bytes()).await?;
        output.flush().await?;

        let mut line = String::new();
        input.read_line(&mut line).await?;
        let message = match parse_input(&line) {
            Input::Quit => {
                say(output, GOODBYE).await?;
                return Ok(Ending::Quit);
            }
            Input::Send(message) => message,
        };
        debug!("sending {message:?}");

        let reply = match client.send(&message).await {
            Ok(reply) => reply,
            Err(ClientError::Disconnected) => {
                say(output, DEALER_LEFT).await?;
                return Ok(Ending::DealerLeft);
            }
            Err(error) => return Err(error.into()),
        };

        if transcript.record(&reply) {
            output.write_all(transcript.status().as_bytes()).await?;
            output.flush().await?;
            return Ok(Ending::Finished);
        }
    }
}

async fn say<W: AsyncWrite + Unpin>(output: &mut W, line: &str) -> Result<()> {
    output.write_all(format!("{line}\n").as_bytes()).await?;
    output.flush().await?;
    Ok(())
}
