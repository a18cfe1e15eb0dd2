//! # Cardroom CLI Library
//!
//! Hosts a [`cardroom_engine`] game table on stdin/stdout. Each input
//! line is a player-prefixed action (`ada join`, `bob play 2 5`), so a
//! single terminal can seat a whole table. The main entry point is
//! [`run`], which loads the deck, builds the room, and pumps input
//! lines until `quit` or end of input.
//!
//! ```no_run
//! use clap::Parser;
//!
//! # async fn demo() {
//! let cli = cardroom_cli::cli::CardroomCli::parse_from(["cardroom"]);
//! cardroom_cli::run(cli).await.expect("session");
//! # }
//! ```

use std::sync::Arc;

use cardroom_engine::deck::CardDeck;
use tokio::io::AsyncBufReadExt;

pub mod cli;
pub mod console;
pub mod error;
pub mod session;

use cli::CardroomCli;
use console::ConsoleNotifier;
pub use error::CliError;
use session::Session;

/// Deck used when no `--deck` file is given.
pub const DEFAULT_DECK: &str = include_str!("../data/cards.json");

/// Initialize logging for the application. Log lines go to stderr so
/// they never interleave with game output on stdout.
pub fn init_logging() {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,cardroom_engine=info"));

    let subscriber = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set global default subscriber");
}

/// Runs one table session until `quit` or stdin closes.
pub async fn run(cli: CardroomCli) -> Result<(), CliError> {
    let raw = match &cli.deck {
        Some(path) => std::fs::read_to_string(path)?,
        None => DEFAULT_DECK.to_string(),
    };
    let deck = CardDeck::from_json(&raw)?;
    let console = Arc::new(ConsoleNotifier::new());
    let mut session = Session::new(cli.game_options(), deck, console)?;

    println!("cardroom is open. type 'help' for commands.");
    let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if !session.handle_line(&line) {
            break;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn the_default_deck_parses() {
        let deck = CardDeck::from_json(DEFAULT_DECK).expect("default deck");
        let stats = deck.stats();
        assert!(stats.prompt_count >= 10);
        assert!(stats.answer_count >= 30);
    }
}
