//! The interactive table session: one stdin line per player action.
//!
//! Input lines look like `ada join`, `ada start`, `bob play 2 5`,
//! `ada pick 1`, `bob hand`, `bob leave`. A bare `quit` ends the
//! session, a bare `help` prints the command list. The name at the
//! front stands in for a connection, so one terminal can drive a whole
//! table (handy for hot-seat play and for trying the engine out).

use std::collections::HashMap;
use std::sync::Arc;

use cardroom_engine::config::GameOptions;
use cardroom_engine::deck::CardDeck;
use cardroom_engine::events::{ConnectionId, Notifier};
use cardroom_engine::player::PlayerId;
use cardroom_engine::room::GameRoom;
use uuid::Uuid;

use crate::console::ConsoleNotifier;
use crate::error::CliError;

pub const HELP_TEXT: &str = "\
commands (prefix each with a player name):
  <name> join          sit down at the table
  <name> start         start a game
  <name> play <n>...   play the numbered card(s) from your hand
  <name> pick <n>      pick the winning play (picker only)
  <name> hand          show your hand
  <name> leave         leave the table
and on their own:
  help                 this text
  quit                 end the session";

/// A player-prefixed action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Join,
    Start,
    Play(Vec<String>),
    Pick(String),
    Hand,
    Leave,
}

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedLine {
    Empty,
    Quit,
    Help,
    Action { name: String, command: Command },
    Invalid(String),
}

pub fn parse_line(line: &str) -> ParsedLine {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    match tokens.as_slice() {
        [] => ParsedLine::Empty,
        ["quit"] | ["exit"] => ParsedLine::Quit,
        ["help"] => ParsedLine::Help,
        [name, verb, rest @ ..] => {
            let command = match (*verb, rest) {
                ("join", []) => Command::Join,
                ("start", []) => Command::Start,
                ("play", cards) if !cards.is_empty() => {
                    Command::Play(cards.iter().map(|s| s.to_string()).collect())
                }
                ("pick", [choice]) => Command::Pick(choice.to_string()),
                ("hand", []) => Command::Hand,
                ("leave", []) => Command::Leave,
                _ => {
                    return ParsedLine::Invalid(format!(
                        "did not understand '{verb}' (try 'help')"
                    ))
                }
            };
            ParsedLine::Action {
                name: name.to_string(),
                command,
            }
        }
        _ => ParsedLine::Invalid("expected '<name> <command>' (try 'help')".to_string()),
    }
}

struct Seat {
    player: PlayerId,
    connection: ConnectionId,
}

/// Drives one [`GameRoom`] from parsed input lines, mapping names to
/// seats. Must run inside a tokio runtime so the room can arm timers.
pub struct Session {
    room: GameRoom,
    console: Arc<ConsoleNotifier>,
    seats: HashMap<String, Seat>,
}

impl Session {
    pub fn new(
        options: GameOptions,
        deck: CardDeck,
        console: Arc<ConsoleNotifier>,
    ) -> Result<Self, CliError> {
        let room = GameRoom::new(options, deck, console.clone() as Arc<dyn Notifier>)?;
        Ok(Self {
            room,
            console,
            seats: HashMap::new(),
        })
    }

    pub fn room(&self) -> &GameRoom {
        &self.room
    }

    /// Handles one input line. Returns `false` once the session should
    /// end.
    pub fn handle_line(&mut self, line: &str) -> bool {
        match parse_line(line) {
            ParsedLine::Empty => true,
            ParsedLine::Quit => false,
            ParsedLine::Help => {
                println!("{HELP_TEXT}");
                true
            }
            ParsedLine::Invalid(message) => {
                println!("{message}");
                true
            }
            ParsedLine::Action { name, command } => {
                self.handle_action(&name, command);
                true
            }
        }
    }

    fn handle_action(&mut self, name: &str, command: Command) {
        if command == Command::Join {
            self.join(name);
            return;
        }
        let Some((player, connection)) = self.seat_of(name) else {
            println!("{name} has not joined yet (try '{name} join')");
            return;
        };
        match command {
            Command::Join => unreachable!("handled above"),
            Command::Start => self.room.start(player),
            Command::Play(tokens) => {
                let tokens: Vec<&str> = tokens.iter().map(String::as_str).collect();
                self.room.play(player, &tokens);
            }
            Command::Pick(choice) => self.room.pick(player, &choice),
            Command::Hand => self.room.show_hand(player),
            Command::Leave => {
                self.room.leave(player);
                self.console.unregister(connection);
                self.seats.remove(name);
            }
        }
    }

    fn join(&mut self, name: &str) {
        if self.seat_of(name).is_some() {
            println!("{name} is already at the table");
            return;
        }
        let connection = Uuid::new_v4();
        self.console.register(connection, name);
        let player = self.room.join(name, connection);
        self.seats.insert(name.to_string(), Seat { player, connection });
    }

    /// Looks a name up, dropping the seat if the engine no longer knows
    /// the player (a finished game empties the whole table).
    fn seat_of(&mut self, name: &str) -> Option<(PlayerId, ConnectionId)> {
        let seat = self.seats.get(name)?;
        let (player, connection) = (seat.player, seat.connection);
        if self.room.with_engine(|engine| engine.player(player).is_none()) {
            self.console.unregister(connection);
            self.seats.remove(name);
            return None;
        }
        Some((player, connection))
    }
}
