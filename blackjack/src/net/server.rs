//! Dealer server: an accept loop that hands each connection to its own
//! session task.

use log::{debug, error, info, warn};
use std::{future::Future, io, net::SocketAddr, sync::Arc, time::Duration};
use tokio::{
    io::{AsyncRead, AsyncWrite, BufReader},
    net::{TcpListener, TcpStream},
    sync::Semaphore,
    time::sleep,
};

use super::{
    errors::{Result, SessionError},
    utils,
};
use crate::game::{
    Session, SessionView,
    entities::{Deck, ShuffleMode},
};

/// Pause after a failed accept before trying again.
pub const ACCEPT_BACKOFF: Duration = Duration::from_millis(50);

/// A source of incoming connections.
pub trait Listener {
    type Conn: AsyncRead + AsyncWrite + Unpin + Send + 'static;

    fn accept(&mut self) -> impl Future<Output = io::Result<(Self::Conn, SocketAddr)>> + Send;
}

impl Listener for TcpListener {
    type Conn = TcpStream;

    fn accept(&mut self) -> impl Future<Output = io::Result<(TcpStream, SocketAddr)>> + Send {
        TcpListener::accept(self)
    }
}

/// Dealer configuration shared by every session.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct DealerConfig {
    /// Maximum number of sessions running at once. Zero means no limit.
    pub max_sessions: usize,
    pub shuffle: ShuffleMode,
    /// Base seed for reproducible dealing. Session `k` uses `seed + k`.
    pub seed: Option<u64>,
}

impl DealerConfig {
    /// A fresh deck for the given session.
    #[must_use]
    pub fn deck_for(&self, session_id: u64) -> Deck {
        match self.seed {
            Some(seed) => Deck::seeded(seed.wrapping_add(session_id), self.shuffle),
            None => Deck::new_shuffled(self.shuffle),
        }
    }
}

/// How a session ended without error.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SessionEnd {
    /// The player stood and got their final hand.
    Stood,
    /// The player closed the connection.
    Disconnected,
}

/// Run one session over an already connected stream. Replies are paired
/// one to one with messages; nothing is written after the peer closes
/// the connection.
///
/// # Errors
///
/// Any transport, protocol, or dealing error ends the session.
pub async fn drive_session<S>(stream: S, deck: Deck) -> Result<SessionEnd>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let mut stream = BufReader::new(stream);
    let mut session = Session::new(deck);
    loop {
        let Some(message) = utils::read_message(&mut stream).await? else {
            return Ok(SessionEnd::Disconnected);
        };
        debug!("received {message:?} while waiting for {}", session.phase());

        let (next, reply) = session.handle(&message)?;
        session = next;

        let text = reply.to_string();
        debug!("replying {text:?}");
        utils::write_message(&mut stream, &text).await?;

        if reply.is_terminal() {
            return Ok(SessionEnd::Stood);
        }
    }
}

fn log_session_end(session_id: u64, outcome: Result<SessionEnd>) {
    match outcome {
        Ok(SessionEnd::Stood) => info!("session {session_id}: player stood, closing connection"),
        Ok(SessionEnd::Disconnected) => info!("session {session_id}: client disconnected"),
        Err(SessionError::Protocol(error)) => warn!("session {session_id}: {error}"),
        Err(error) => error!("session {session_id}: {error}"),
    }
}

/// Accept connections forever, one session task per connection. A
/// failed accept is logged and retried after [`ACCEPT_BACKOFF`]; running
/// sessions are never affected.
///
/// # Errors
///
/// Returns an error only if the session limiter is closed.
pub async fn serve<L>(mut listener: L, config: DealerConfig) -> io::Result<()>
where
    L: Listener + Send,
{
    let limiter = (config.max_sessions > 0).then(|| Arc::new(Semaphore::new(config.max_sessions)));
    let mut next_session_id: u64 = 0;
    loop {
        // Wait for a free slot before taking the next connection.
        let permit = match &limiter {
            Some(limiter) => Some(
                Arc::clone(limiter)
                    .acquire_owned()
                    .await
                    .map_err(io::Error::other)?,
            ),
            None => None,
        };

        let (stream, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(error) => {
                warn!("failed to accept connection: {error}");
                drop(permit);
                sleep(ACCEPT_BACKOFF).await;
                continue;
            }
        };
        let session_id = next_session_id;
        next_session_id += 1;
        info!("session {session_id}: received connection from {peer}");

        let deck = config.deck_for(session_id);
        tokio::spawn(async move {
            let outcome = drive_session(stream, deck).await;
            log_session_end(session_id, outcome);
            drop(permit);
        });
    }
}

/// Bind to `addr` and serve sessions.
///
/// # Errors
///
/// Returns an error if binding fails.
pub async fn run(addr: SocketAddr, config: DealerConfig) -> io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!(
        "dealer ready and waiting on {} (shuffle: {}, max sessions: {})",
        listener.local_addr()?,
        config.shuffle,
        config.max_sessions
    );
    serve(listener, config).await
}
