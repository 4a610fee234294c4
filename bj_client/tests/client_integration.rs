//! Integration tests for the terminal client against a live dealer.
//!
//! The player's keystrokes come from a byte slice and the prompts are
//! captured in a buffer.

use bj_client::terminal::{self, Ending};
use blackjack::{
    Client,
    server::{self, DealerConfig},
};
use std::net::SocketAddr;
use tokio::net::TcpListener;

async fn start_dealer() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let config = DealerConfig {
        seed: Some(8642),
        ..DealerConfig::default()
    };
    tokio::spawn(server::serve(listener, config));
    addr
}

async fn play(keys: &str) -> (Ending, String) {
    let addr = start_dealer().await;
    let mut client = Client::connect(addr).await.unwrap();
    let mut input = keys.as_bytes();
    let mut output = Vec::new();
    let ending = terminal::play(&mut client, &mut input, &mut output)
        .await
        .unwrap();
    (ending, String::from_utf8(output).unwrap())
}

#[tokio::test]
async fn test_full_hand() {
    let (ending, screen) = play("Alice\n100\nh\ns\n").await;
    assert_eq!(ending, Ending::Finished);
    assert!(screen.starts_with("You are now seated at the table"));
    assert!(screen.contains("How much would you like to bet?\nAmount: "));
    assert!(screen.contains("DEALER: You have bet $100, Alice.\n"));
    assert!(screen.ends_with("DEALER: finished\n"));
    assert_eq!(screen.matches("Choice (h/s): ").count(), 2);
}

#[tokio::test]
async fn test_invalid_choice_shows_dealer_message() {
    let (ending, screen) = play("Bob\n5\nx\ns\n").await;
    assert_eq!(ending, Ending::Finished);
    assert!(screen.contains("DEALER: Please choose h (hit) or s (stand).\n"));
}

#[tokio::test]
async fn test_empty_line_quits() {
    let (ending, screen) = play("\n").await;
    assert_eq!(ending, Ending::Quit);
    assert!(screen.ends_with(&format!("Name: {}\n", terminal::GOODBYE)));
}

#[tokio::test]
async fn test_quit_mid_game() {
    let (ending, screen) = play("Carol\n10\nh\n\n").await;
    assert_eq!(ending, Ending::Quit);
    assert!(screen.ends_with(&format!("Choice (h/s): {}\n", terminal::GOODBYE)));
}

#[tokio::test]
async fn test_end_of_input_quits() {
    let (ending, screen) = play("Dave\n").await;
    assert_eq!(ending, Ending::Quit);
    assert!(screen.ends_with(&format!("Amount: {}\n", terminal::GOODBYE)));
}

#[tokio::test]
async fn test_dealer_hangs_up_on_blank_name() {
    let (ending, screen) = play("   \n").await;
    assert_eq!(ending, Ending::DealerLeft);
    assert!(screen.ends_with(&format!("{}\n", terminal::DEALER_LEFT)));
}

#[tokio::test]
async fn test_seeded_dealer_shows_same_hand() {
    let (_, first) = play("Erin\n1\ns\n").await;
    let (_, second) = play("Erin\n1\ns\n").await;
    assert_eq!(first, second);
}
