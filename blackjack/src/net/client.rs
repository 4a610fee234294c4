//! An async blackjack client.
//!
//! Every request gets exactly one reply, so the client just alternates
//! writes and reads on one connection.

use log::debug;
use std::{io, net::SocketAddr, time::Duration};
use tokio::{
    io::{AsyncWriteExt, BufReader},
    net::TcpStream,
    time::{sleep, timeout},
};

use super::{errors::ClientError, messages::HandUpdate, utils};
use crate::game::entities::Chips;

/// A connection to a dealer.
pub struct Client {
    /// The dealer's address.
    pub addr: SocketAddr,
    stream: BufReader<TcpStream>,
}

impl Client {
    /// Connect to a dealer.
    ///
    /// Tries three times with growing timeouts (100ms, 500ms, 1s),
    /// pausing for the same amount between attempts.
    ///
    /// # Errors
    ///
    /// Returns the last connection error if every attempt fails.
    pub async fn connect(addr: SocketAddr) -> Result<Self, ClientError> {
        let mut connect_timeouts = vec![
            Duration::from_secs(1),
            Duration::from_millis(500),
            Duration::from_millis(100),
        ];
        let mut last_error = io::Error::from(io::ErrorKind::TimedOut);
        while let Some(connect_timeout) = connect_timeouts.pop() {
            match timeout(connect_timeout, TcpStream::connect(addr)).await {
                Ok(Ok(stream)) => {
                    debug!("connected to dealer at {addr}");
                    return Ok(Self {
                        addr,
                        stream: BufReader::new(stream),
                    });
                }
                Ok(Err(error)) => last_error = error,
                Err(_) => last_error = io::ErrorKind::TimedOut.into(),
            }
            if !connect_timeouts.is_empty() {
                sleep(connect_timeout).await;
            }
        }
        Err(ClientError::Connect {
            addr,
            source: last_error,
        })
    }

    /// Send one message and wait for the dealer's reply.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Disconnected`] if the dealer closed the
    /// connection instead of replying.
    pub async fn send(&mut self, message: &str) -> Result<String, ClientError> {
        utils::write_message(&mut self.stream, message).await?;
        self.recv().await
    }

    /// Wait for the next reply.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Disconnected`] once the dealer closes the
    /// connection.
    pub async fn recv(&mut self) -> Result<String, ClientError> {
        let reply = utils::read_message(&mut self.stream)
            .await?
            .ok_or(ClientError::Disconnected)?;
        debug!("dealer replied {reply:?}");
        Ok(reply)
    }

    /// Sit down with a name. Returns the two dealt cards.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Disconnected`] if the dealer rejects the
    /// name (empty or too long) by closing the connection.
    pub async fn join(&mut self, name: &str) -> Result<String, ClientError> {
        self.send(name).await
    }

    /// Place a bet. Returns the dealer's bet confirmation.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Disconnected`] if the dealer closed the
    /// connection instead of replying.
    pub async fn place_bet(&mut self, amount: Chips) -> Result<String, ClientError> {
        self.send(&amount.to_string()).await
    }

    /// Send a raw hit/stand choice. Only its first character counts.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Disconnected`] if the dealer closed the
    /// connection instead of replying, for example after the player
    /// stood or the deck ran out.
    pub async fn choose(&mut self, choice: &str) -> Result<HandUpdate, ClientError> {
        let reply = self.send(choice).await?;
        Ok(HandUpdate::parse(&reply))
    }

    /// Ask for one more card.
    ///
    /// # Errors
    ///
    /// Same as [`Client::choose`].
    pub async fn hit(&mut self) -> Result<HandUpdate, ClientError> {
        self.choose("h").await
    }

    /// Stand. The reply carries the final hand and the dealer closes
    /// the connection afterwards.
    ///
    /// # Errors
    ///
    /// Same as [`Client::choose`].
    pub async fn stand(&mut self) -> Result<HandUpdate, ClientError> {
        self.choose("s").await
    }

    /// Close the connection.
    ///
    /// # Errors
    ///
    /// Fails if shutting down the socket fails.
    pub async fn close(mut self) -> Result<(), ClientError> {
        self.stream
            .get_mut()
            .shutdown()
            .await
            .map_err(|error| ClientError::Session(error.into()))
    }
}
