//! Blackjack dealer server.
//!
//! Deals one independent hand to every connection until the player stands
//! or hangs up.

use anyhow::Error;
use bj_server::{
    config::{Overrides, ServerConfig},
    logging,
};
use blackjack::server;
use pico_args::Arguments;
use tracing::info;

const HELP: &str = "\
Run a blackjack dealer

USAGE:
  bj_server [OPTIONS]

OPTIONS:
  --bind          IP:PORT  Server socket bind address  [default: env SERVER_BIND or 127.0.0.1:8642]
  --max-sessions  N        Sessions served at once, 0 for no limit  [default: env MAX_SESSIONS or 0]
  --shuffle       MODE     Deck shuffle, classic or uniform  [default: env SHUFFLE_MODE or classic]
  --seed          N        Base seed for reproducible decks  [default: env DECK_SEED]

FLAGS:
  -h, --help               Print help information

ENVIRONMENT:
  RUST_LOG                 Log filter (e.g., debug, blackjack=debug)
  (A .env file in the working directory is loaded first)
";

fn parse_overrides(pargs: &mut Arguments) -> Result<Overrides, Error> {
    Ok(Overrides {
        bind: pargs.opt_value_from_str("--bind")?,
        max_sessions: pargs.opt_value_from_str("--max-sessions")?,
        shuffle: pargs.opt_value_from_str("--shuffle")?,
        seed: pargs.opt_value_from_str("--seed")?,
    })
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let overrides = parse_overrides(&mut pargs)?;
    let remaining = pargs.finish();
    if !remaining.is_empty() {
        anyhow::bail!("unexpected arguments: {remaining:?}");
    }

    let config = ServerConfig::from_env(overrides)?;
    config.validate()?;

    logging::init();
    logging::log_startup(&config);

    tokio::select! {
        result = server::run(config.bind, config.dealer) => result?,
        signal = tokio::signal::ctrl_c() => {
            signal?;
            info!("Received Ctrl-C, shutting down");
        }
    }

    Ok(())
}
