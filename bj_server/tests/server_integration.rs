//! Integration tests for dealer startup from configuration.
//!
//! Tests that environment settings reach the accept loop.

use bj_server::config::{Overrides, ServerConfig};
use blackjack::{Client, ShuffleMode, server};
use std::{net::SocketAddr, time::Duration};
use tokio::{net::TcpListener, time::timeout};

fn config_from(vars: &'static [(&'static str, &'static str)]) -> ServerConfig {
    let config = ServerConfig::from_lookup(Overrides::default(), |key| {
        vars.iter()
            .find(|(name, _)| *name == key)
            .map(|(_, value)| value.to_string())
    })
    .expect("valid configuration");
    config.validate().expect("configuration within limits");
    config
}

async fn start(config: ServerConfig) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(server::serve(listener, config.dealer));
    addr
}

#[tokio::test]
async fn test_session_cap_from_env() {
    let config = config_from(&[("MAX_SESSIONS", "1")]);
    assert_eq!(config.dealer.max_sessions, 1);
    let addr = start(config).await;

    let mut first = Client::connect(addr).await.unwrap();
    first.join("First").await.unwrap();

    // The second connection is only accepted once the first one ends.
    let mut second = Client::connect(addr).await.unwrap();
    let waiting = timeout(Duration::from_millis(200), second.join("Second")).await;
    assert!(waiting.is_err(), "second player was served while the table was full");

    first.place_bet(1).await.unwrap();
    first.stand().await.unwrap();

    let cards = timeout(Duration::from_secs(5), second.recv())
        .await
        .expect("second player served after the first stood")
        .unwrap();
    assert!(cards.starts_with('['));
}

#[tokio::test]
async fn test_seed_from_env_deals_reproducibly() {
    let config = config_from(&[("DECK_SEED", "42"), ("SHUFFLE_MODE", "uniform")]);
    assert_eq!(config.dealer.shuffle, ShuffleMode::Uniform);

    let mut hands = Vec::new();
    for _ in 0..2 {
        let addr = start(config.clone()).await;
        let mut client = Client::connect(addr).await.unwrap();
        hands.push(client.join("Frank").await.unwrap());
    }
    assert_eq!(hands[0], hands[1]);
}
