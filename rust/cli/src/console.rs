//! Terminal rendering of game announcements.
//!
//! The engine speaks in [`GameEvent`] values; this module turns them into
//! lines on stdout. Broadcasts go to everyone at the terminal, private
//! notifications are prefixed with the recipient's name.

use std::collections::HashMap;
use std::fmt::Write as _;
use std::io::Write;
use std::sync::Mutex;

use cardroom_engine::cards::AnswerCard;
use cardroom_engine::events::{ConnectionId, GameEvent, Notifier, RejectReason};

/// Notifier that writes every announcement to stdout. Connection ids are
/// mapped back to player names so private lines read naturally.
#[derive(Debug, Default)]
pub struct ConsoleNotifier {
    names: Mutex<HashMap<ConnectionId, String>>,
}

impl ConsoleNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, connection: ConnectionId, name: impl Into<String>) {
        self.names
            .lock()
            .expect("name table lock poisoned")
            .insert(connection, name.into());
    }

    pub fn unregister(&self, connection: ConnectionId) {
        self.names
            .lock()
            .expect("name table lock poisoned")
            .remove(&connection);
    }

    fn name_of(&self, connection: ConnectionId) -> String {
        self.names
            .lock()
            .expect("name table lock poisoned")
            .get(&connection)
            .cloned()
            .unwrap_or_else(|| "someone".to_string())
    }
}

impl Notifier for ConsoleNotifier {
    fn broadcast(&self, event: GameEvent) {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        let _ = writeln!(out, "{}", render(&event));
    }

    fn tell(&self, connection: ConnectionId, event: GameEvent) {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        let _ = writeln!(out, "[{}] {}", self.name_of(connection), render(&event));
    }
}

fn join_cards(cards: &[AnswerCard]) -> String {
    cards
        .iter()
        .map(AnswerCard::text)
        .collect::<Vec<_>>()
        .join(" + ")
}

/// One distinct line of wording per reason, so a player always knows
/// exactly what was wrong with their input.
pub fn reject_text(reason: RejectReason) -> &'static str {
    match reason {
        RejectReason::GameInProgress => "a game is already running",
        RejectReason::NotEnoughPlayers => "not enough players to start",
        RejectReason::GameNotStarted => "no game is running",
        RejectReason::PickerCannotPlay => "you are picking this round, not playing",
        RejectReason::TooFewCards => "that prompt needs more cards",
        RejectReason::TooManyCards => "that prompt takes fewer cards",
        RejectReason::NotANumber => "card choices must be numbers",
        RejectReason::DuplicateCard => "you chose the same card twice",
        RejectReason::InvalidChoice => "that number is not on the list",
        RejectReason::AlreadyPlayed => "you already played this round",
        RejectReason::HandNotDealt => "you get cards at the next deal",
        RejectReason::NotPicker => "only the picker chooses the winner",
        RejectReason::PickNotReady => "not everyone has played yet",
    }
}

/// Renders one event as display text. Multi-line for lists (hands,
/// choices, scoreboards), a single line otherwise.
pub fn render(event: &GameEvent) -> String {
    match event {
        GameEvent::Welcome { deck } => format!(
            "welcome! the deck holds {} prompts and {} answers",
            deck.prompt_count, deck.answer_count
        ),
        GameEvent::PlayerJoined { name } => format!("{name} joined the table"),
        GameEvent::PlayerLeft { name } => format!("{name} left the table"),
        GameEvent::RoundStarted {
            picker,
            prompt,
            round,
        } => format!(
            "round {round}: \"{}\" (play {} card{}). {picker} picks the winner.",
            prompt.text,
            prompt.pick,
            if prompt.pick == 1 { "" } else { "s" }
        ),
        GameEvent::ActionRejected { reason } => reject_text(*reason).to_string(),
        GameEvent::HandShown { cards } => {
            let mut text = String::from("your hand:");
            for (i, card) in cards.iter().enumerate() {
                let _ = write!(text, "\n  {}. {}", i + 1, card.text());
            }
            text
        }
        GameEvent::PlayRecorded { name, waiting_on } => match waiting_on {
            0 => format!("{name} played. everyone is in."),
            1 => format!("{name} played. waiting on 1 more player."),
            n => format!("{name} played. waiting on {n} more players."),
        },
        GameEvent::ChoicesReady {
            picker,
            choices,
            prompt,
        } => {
            let mut text = format!("all plays are in for \"{prompt}\". {picker}, pick one:");
            for (i, choice) in choices.iter().enumerate() {
                let _ = write!(text, "\n  {}. {}", i + 1, join_cards(&choice.cards));
            }
            text
        }
        GameEvent::PickResolved {
            picker,
            winner,
            cards,
        } => format!(
            "{picker} picked \"{}\". that was {winner}'s play!",
            join_cards(cards)
        ),
        GameEvent::Scoreboard { entries } => {
            let mut text = String::from("scores:");
            for entry in entries {
                let _ = write!(text, "\n  {} - {}", entry.name, entry.points);
            }
            text
        }
        GameEvent::GameWon { winner } => format!("{winner} wins the game!"),
        GameEvent::PlayTimeoutWarning { seconds_left } => {
            format!("{seconds_left} seconds left to play your cards")
        }
        GameEvent::PlayTimeoutFailure { names } => {
            if names.is_empty() {
                "time ran out before anyone could play".to_string()
            } else {
                format!("time ran out. no play from: {}", names.join(", "))
            }
        }
        GameEvent::PickTimeoutWarning {
            seconds_left,
            picker,
        } => format!("{picker} has {seconds_left} seconds left to pick"),
        GameEvent::PickTimeoutFailure { picker } => {
            format!("{picker} never picked. the round is forfeit.")
        }
        GameEvent::GameFailed => "too few players left to keep going".to_string(),
    }
}
