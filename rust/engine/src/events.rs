use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::cards::{AnswerCard, PromptCard};
use crate::deck::DeckStats;

/// Opaque handle for a participant's connection. The transport layer
/// owns the real socket; the engine only uses this for addressing
/// private notifications.
pub type ConnectionId = Uuid;

/// Why a player action was turned away. Every validation failure maps to
/// its own variant so the transport can word each one distinctly.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    /// A game is already running
    GameInProgress,
    /// Roster is below the configured minimum
    NotEnoughPlayers,
    /// No game running yet, so there is nothing to act on
    GameNotStarted,
    /// The picker does not play cards this round
    PickerCannotPlay,
    /// Fewer cards than the prompt requires
    TooFewCards,
    /// More cards than the prompt requires
    TooManyCards,
    /// A choice token did not parse as a number
    NotANumber,
    /// The same card was chosen twice in one play
    DuplicateCard,
    /// Choice is outside the valid range
    InvalidChoice,
    /// This player already played this round
    AlreadyPlayed,
    /// Joined mid-round; cards arrive at the next deal
    HandNotDealt,
    /// Only the current picker may pick
    NotPicker,
    /// Not every player has played yet
    PickNotReady,
}

/// One shuffled candidate presented to the picker. Authorship is
/// deliberately absent so submission order leaks nothing.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct PlayChoice {
    pub cards: Vec<AnswerCard>,
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub name: String,
    pub points: u32,
}

/// Semantic game announcements. The transport layer turns these into
/// whatever text or wire format it speaks.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    Welcome {
        deck: DeckStats,
    },
    PlayerJoined {
        name: String,
    },
    PlayerLeft {
        name: String,
    },
    RoundStarted {
        picker: String,
        prompt: PromptCard,
        round: u32,
    },
    ActionRejected {
        reason: RejectReason,
    },
    HandShown {
        cards: Vec<AnswerCard>,
    },
    PlayRecorded {
        name: String,
        waiting_on: usize,
    },
    ChoicesReady {
        picker: String,
        choices: Vec<PlayChoice>,
        prompt: String,
    },
    PickResolved {
        picker: String,
        winner: String,
        cards: Vec<AnswerCard>,
    },
    Scoreboard {
        entries: Vec<ScoreEntry>,
    },
    GameWon {
        winner: String,
    },
    PlayTimeoutWarning {
        seconds_left: u64,
    },
    PlayTimeoutFailure {
        names: Vec<String>,
    },
    PickTimeoutWarning {
        seconds_left: u64,
        picker: String,
    },
    PickTimeoutFailure {
        picker: String,
    },
    GameFailed,
}

/// Sink the engine announces through. `broadcast` reaches the whole
/// room; `tell` reaches one connection (rejections, hand contents).
pub trait Notifier: Send + Sync {
    fn broadcast(&self, event: GameEvent);
    fn tell(&self, connection: ConnectionId, event: GameEvent);
}
