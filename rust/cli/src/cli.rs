//! Command-line argument definitions.

use std::path::PathBuf;

use cardroom_engine::config::GameOptions;
use clap::Parser;

/// Host a fill-in-the-blank card game at the terminal.
///
/// Every option falls back to the table defaults; the deck falls back
/// to the built-in one.
#[derive(Debug, Parser)]
#[command(name = "cardroom", version, about = "Run a card game table on stdin/stdout")]
pub struct CardroomCli {
    /// JSON deck file with promptCards and answerCards pools
    #[arg(long)]
    pub deck: Option<PathBuf>,

    /// Minimum players needed to start (and to keep a game alive)
    #[arg(long)]
    pub min_players: Option<usize>,

    /// Cards each player is dealt up to
    #[arg(long)]
    pub hand_size: Option<usize>,

    /// Points that win the game
    #[arg(long)]
    pub win_points: Option<u32>,

    /// Points for winning a round
    #[arg(long)]
    pub round_points: Option<u32>,

    /// Seconds players get to play their cards
    #[arg(long)]
    pub play_seconds: Option<u64>,

    /// Seconds the picker gets to choose
    #[arg(long)]
    pub pick_seconds: Option<u64>,
}

impl CardroomCli {
    /// Table defaults with any flag overrides layered on top.
    pub fn game_options(&self) -> GameOptions {
        let mut options = GameOptions::default();
        if let Some(v) = self.min_players {
            options.min_players = v;
        }
        if let Some(v) = self.hand_size {
            options.hand_size = v;
        }
        if let Some(v) = self.win_points {
            options.win_points = v;
        }
        if let Some(v) = self.round_points {
            options.round_points = v;
        }
        if let Some(v) = self.play_seconds {
            options.play_seconds = v;
        }
        if let Some(v) = self.pick_seconds {
            options.pick_seconds = v;
        }
        options
    }
}
