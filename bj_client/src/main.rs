//! A terminal blackjack player.
//!
//! Connects to a dealer, asks for a name and a bet, then hits or stands
//! until the dealer finishes the hand.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use bj_client::terminal::{self, Ending};
use blackjack::Client;
use ctrlc::set_handler;
use log::{debug, info};
use pico_args::Arguments;
use tokio::io::{BufReader, stdin, stdout};

const HELP: &str = "\
Sit at a blackjack dealer's table

USAGE:
  bj_client [OPTIONS]

OPTIONS:
  --server  IP:PORT     Dealer address  [default: 127.0.0.1:8642]

FLAGS:
  -h, --help            Print help information

Enter an empty line at any prompt to leave the table.
";

struct Args {
    server: SocketAddr,
}

#[tokio::main]
async fn main() -> Result<()> {
    let mut pargs = Arguments::from_env();

    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let args = Args {
        server: pargs
            .opt_value_from_str("--server")?
            .unwrap_or_else(|| SocketAddr::from(([127, 0, 0, 1], 8642))),
    };

    // Catching signals for exit.
    set_handler(|| {
        println!("\n{}", terminal::GOODBYE);
        std::process::exit(0)
    })?;

    env_logger::builder().format_target(false).init();

    run(args).await
}

async fn run(args: Args) -> Result<()> {
    println!("\n=== BLACKJACK CLIENT ===\n");
    let mut client = Client::connect(args.server)
        .await
        .with_context(|| format!("Failed to reach the dealer at {}", args.server))?;
    info!("connected to {}", client.addr);

    let mut input = BufReader::new(stdin());
    let mut output = stdout();
    let ending = terminal::play(&mut client, &mut input, &mut output).await?;
    info!("game ended: {ending:?}");

    if ending == Ending::Quit {
        if let Err(error) = client.close().await {
            debug!("closing the connection failed: {error}");
        }
    }
    Ok(())
}
