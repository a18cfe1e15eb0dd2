use std::sync::Arc;

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::cards::{AnswerCard, PromptCard};
use crate::config::GameOptions;
use crate::deck::{CardDeck, DeckStats};
use crate::errors::ConfigError;
use crate::events::{ConnectionId, GameEvent, Notifier, PlayChoice, RejectReason, ScoreEntry};
use crate::player::{Player, PlayerId};
use crate::util;

/// Observable phase of the room. Dealing and round resolution happen
/// inside a single call, so only the quiescent/waiting states are
/// representable; a game-over collapses straight back to `Idle`.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Phase {
    /// No game running; join/leave/start accepted
    Idle,
    /// Waiting for non-pickers to play
    Playing,
    /// Waiting for the picker to choose a winner
    Picking,
}

/// What the timer shell must do after an engine call. Arming implies
/// disarming every previously armed timer first; the epoch must be
/// handed back verbatim when a timer fires so stale firings are no-ops.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TimerCmd {
    None,
    DisarmAll,
    ArmPlay { epoch: u64 },
    ArmPick { epoch: u64 },
}

/// A play waiting for the picker, in post-shuffle order.
#[derive(Debug, Clone)]
pub struct PendingPlay {
    pub player: PlayerId,
    pub cards: Vec<AnswerCard>,
}

/// Which non-pickers a failure payout goes to.
#[derive(Debug, Clone, Copy)]
enum ConsolationScope {
    /// Play deadline: only those who got their cards in
    PlayersWhoPlayed,
    /// Pick failure: everyone except the picker
    AllNonPickers,
}

/// The round/turn lifecycle manager for one game room. All mutation of
/// the roster and round state goes through this struct; callers must
/// serialize access (see [`crate::room::GameRoom`]).
pub struct GameEngine {
    options: GameOptions,
    deck: CardDeck,
    notifier: Arc<dyn Notifier>,
    rng: ChaCha20Rng,
    players: Vec<Player>,
    phase: Phase,
    round: u32,
    picker_seat: usize,
    prompt: Option<PromptCard>,
    pending: Vec<PendingPlay>,
    timer_epoch: u64,
}

impl std::fmt::Debug for GameEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameEngine")
            .field("phase", &self.phase)
            .field("round", &self.round)
            .field("players", &self.players.len())
            .field("pending", &self.pending.len())
            .field("timer_epoch", &self.timer_epoch)
            .finish()
    }
}

impl GameEngine {
    /// Builds an engine for one room. Options are validated here so a
    /// misconfiguration can never surface mid-game.
    pub fn new(
        options: GameOptions,
        deck: CardDeck,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self, ConfigError> {
        options.validate()?;
        Ok(Self {
            options,
            deck,
            notifier,
            rng: ChaCha20Rng::from_os_rng(),
            players: Vec::new(),
            phase: Phase::Idle,
            round: 1,
            picker_seat: 0,
            prompt: None,
            pending: Vec::new(),
            timer_epoch: 0,
        })
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn in_progress(&self) -> bool {
        self.phase != Phase::Idle
    }

    pub fn round_number(&self) -> u32 {
        self.round
    }

    pub fn options(&self) -> &GameOptions {
        &self.options
    }

    pub fn deck_stats(&self) -> DeckStats {
        self.deck.stats()
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn roster(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id() == id)
    }

    pub fn current_picker(&self) -> Option<&Player> {
        self.players.iter().find(|p| p.is_picker)
    }

    pub fn current_prompt(&self) -> Option<&PromptCard> {
        self.prompt.as_ref()
    }

    /// Shuffled plays for the current pick phase.
    pub fn pending_plays(&self) -> &[PendingPlay] {
        &self.pending
    }

    pub fn timer_epoch(&self) -> u64 {
        self.timer_epoch
    }

    /// Adds a participant. Always permitted; during a running round the
    /// newcomer observes (empty hand, not counted in the wait list)
    /// until the next deal.
    pub fn join(&mut self, name: impl Into<String>, connection: ConnectionId) -> PlayerId {
        let mut player = Player::new(name, connection);
        if self.phase != Phase::Idle {
            player.sitting_out = true;
        }
        let id = player.id();
        tracing::info!(player = %player.name(), mid_round = player.sitting_out, "player joined");
        self.notifier.tell(
            connection,
            GameEvent::Welcome {
                deck: self.deck.stats(),
            },
        );
        self.notifier.broadcast(GameEvent::PlayerJoined {
            name: player.name().to_string(),
        });
        self.players.push(player);
        id
    }

    /// Starts a new game if the room is idle and big enough. The first
    /// seat becomes the picker; everyone is dealt a full hand.
    pub fn start(&mut self, player_id: PlayerId) -> TimerCmd {
        let Some(idx) = self.find(player_id) else {
            return TimerCmd::None;
        };
        if self.phase != Phase::Idle {
            self.reject(&self.players[idx], RejectReason::GameInProgress);
            return TimerCmd::None;
        }
        if self.players.len() < self.options.min_players {
            self.reject(&self.players[idx], RejectReason::NotEnoughPlayers);
            return TimerCmd::None;
        }

        self.round = 1;
        self.picker_seat = 0;
        self.set_picker(0);
        let hand_size = self.options.hand_size;
        for i in 0..self.players.len() {
            self.players[i].sitting_out = false;
            self.players[i].fill_hand(&mut self.deck, hand_size);
        }
        tracing::info!(players = self.players.len(), "game started");
        self.begin_round()
    }

    /// Removes a participant. A departing picker forces a pick failure
    /// first; a roster shrinking below the minimum force-ends the game.
    pub fn leave(&mut self, player_id: PlayerId) -> TimerCmd {
        let Some(idx) = self.find(player_id) else {
            return TimerCmd::None;
        };
        let name = self.players[idx].name().to_string();
        tracing::info!(player = %name, "player left");
        self.notifier.broadcast(GameEvent::PlayerLeft { name });

        if self.phase != Phase::Idle && self.players[idx].is_picker {
            let picker = self.players[idx].name().to_string();
            self.notifier
                .broadcast(GameEvent::PickTimeoutFailure { picker });
            if let Some(cmd) = self.award_consolation(ConsolationScope::AllNonPickers) {
                // game over already reset the room, leaver included
                return cmd;
            }
            let cmd = self.finalize_round();
            self.remove_from_roster(player_id);
            if self.players.len() < self.options.min_players {
                return self.force_end_short_roster();
            }
            return cmd;
        }

        let before = self.pending.len();
        self.pending.retain(|p| p.player != player_id);
        let withdrew_play = self.pending.len() != before;
        self.remove_from_roster(player_id);

        if self.phase == Phase::Idle {
            return TimerCmd::None;
        }
        if self.players.len() < self.options.min_players {
            return self.force_end_short_roster();
        }
        match self.phase {
            Phase::Playing if self.waiting_on() == 0 => self.close_play_phase(),
            Phase::Picking if withdrew_play => {
                // the picker's numbering changed; present it again
                self.announce_choices();
                TimerCmd::None
            }
            _ => TimerCmd::None,
        }
    }

    /// Validates and records a play. Failures are reported privately in
    /// a fixed order, each with its own reason; state is untouched.
    pub fn play(&mut self, player_id: PlayerId, tokens: &[&str]) -> TimerCmd {
        let Some(idx) = self.find(player_id) else {
            return TimerCmd::None;
        };
        match self.phase {
            Phase::Idle => {
                self.reject(&self.players[idx], RejectReason::GameNotStarted);
                return TimerCmd::None;
            }
            // the phase gate, not timing, keeps late plays out
            Phase::Picking => {
                self.reject(&self.players[idx], RejectReason::AlreadyPlayed);
                return TimerCmd::None;
            }
            Phase::Playing => {}
        }

        let required = self.prompt.as_ref().map(|p| p.pick).unwrap_or(1);
        let player = &self.players[idx];
        if player.is_picker {
            self.reject(player, RejectReason::PickerCannotPlay);
            return TimerCmd::None;
        }
        if tokens.len() < required {
            self.reject(player, RejectReason::TooFewCards);
            return TimerCmd::None;
        }
        if tokens.len() > required {
            self.reject(player, RejectReason::TooManyCards);
            return TimerCmd::None;
        }
        let mut choices = Vec::with_capacity(tokens.len());
        for token in tokens {
            match util::parse_choice(token) {
                Some(n) => choices.push(n),
                None => {
                    self.reject(player, RejectReason::NotANumber);
                    return TimerCmd::None;
                }
            }
        }
        if util::has_duplicates(&choices) {
            self.reject(player, RejectReason::DuplicateCard);
            return TimerCmd::None;
        }
        if choices.iter().any(|&n| n == 0 || n > player.hand().len()) {
            self.reject(player, RejectReason::InvalidChoice);
            return TimerCmd::None;
        }
        if player.has_played {
            self.reject(player, RejectReason::AlreadyPlayed);
            return TimerCmd::None;
        }

        let zero_based: Vec<usize> = choices.iter().map(|&n| n - 1).collect();
        let cards: Vec<AnswerCard> = zero_based.iter().map(|&i| player.hand()[i].clone()).collect();
        let player = &mut self.players[idx];
        player.has_played = true;
        player.remove_cards(&zero_based);
        let name = player.name().to_string();
        self.pending.push(PendingPlay {
            player: player_id,
            cards,
        });

        let waiting = self.waiting_on();
        tracing::debug!(player = %name, waiting, "play recorded");
        self.notifier.broadcast(GameEvent::PlayRecorded {
            name,
            waiting_on: waiting,
        });
        if waiting == 0 {
            self.close_play_phase()
        } else {
            TimerCmd::None
        }
    }

    /// Resolves the picker's choice of a winning play.
    pub fn pick(&mut self, player_id: PlayerId, token: &str) -> TimerCmd {
        let Some(idx) = self.find(player_id) else {
            return TimerCmd::None;
        };
        let player = &self.players[idx];
        if !player.is_picker {
            self.reject(player, RejectReason::NotPicker);
            return TimerCmd::None;
        }
        if !player.pick_ready {
            self.reject(player, RejectReason::PickNotReady);
            return TimerCmd::None;
        }
        let Some(choice) = util::parse_choice(token) else {
            self.reject(player, RejectReason::NotANumber);
            return TimerCmd::None;
        };
        if choice == 0 || choice > self.pending.len() {
            self.reject(player, RejectReason::InvalidChoice);
            return TimerCmd::None;
        }

        let picker = player.name().to_string();
        let (winner_id, cards) = {
            let entry = &self.pending[choice - 1];
            (entry.player, entry.cards.clone())
        };
        let Some(winner_idx) = self.find(winner_id) else {
            // pending plays are withdrawn on leave, so this is a bug
            tracing::error!(round = self.round, "winning play has no author in the roster");
            return TimerCmd::None;
        };
        let winner = self.players[winner_idx].name().to_string();
        tracing::info!(round = self.round, winner = %winner, "pick resolved");
        self.notifier.broadcast(GameEvent::PickResolved {
            picker,
            winner: winner.clone(),
            cards,
        });

        let won = self.players[winner_idx]
            .add_points(self.options.round_points, self.options.win_points);
        if won {
            self.game_over(winner)
        } else {
            self.finalize_round()
        }
    }

    /// Sends a player their current hand, privately.
    pub fn show_hand(&self, player_id: PlayerId) {
        let Some(idx) = self.find(player_id) else {
            return;
        };
        let player = &self.players[idx];
        if self.phase == Phase::Idle {
            self.reject(player, RejectReason::GameNotStarted);
            return;
        }
        if player.hand().is_empty() {
            // joined mid-round; dealt in at the next round
            self.reject(player, RejectReason::HandNotDealt);
            return;
        }
        self.notifier.tell(
            player.connection(),
            GameEvent::HandShown {
                cards: player.hand().to_vec(),
            },
        );
    }

    /// Halfway warning for the play phase. A stale epoch means the
    /// round already moved on; nothing is emitted.
    pub fn play_warning(&self, epoch: u64) {
        if epoch != self.timer_epoch || self.phase != Phase::Playing {
            return;
        }
        self.notifier.broadcast(GameEvent::PlayTimeoutWarning {
            seconds_left: self.options.play_seconds / 2,
        });
    }

    /// Play-phase deadline: players who played get the consolation
    /// score (roster order, first past the post ends the game), the
    /// rest get nothing, and the round resolves as a failure.
    pub fn play_deadline(&mut self, epoch: u64) -> TimerCmd {
        if epoch != self.timer_epoch || self.phase != Phase::Playing {
            return TimerCmd::None;
        }
        let names: Vec<String> = self
            .players
            .iter()
            .filter(|p| !p.is_picker && !p.has_played && !p.sitting_out)
            .map(|p| p.name().to_string())
            .collect();
        tracing::warn!(round = self.round, failed = names.len(), "play deadline hit");
        self.notifier
            .broadcast(GameEvent::PlayTimeoutFailure { names });
        if let Some(cmd) = self.award_consolation(ConsolationScope::PlayersWhoPlayed) {
            return cmd;
        }
        self.finalize_round()
    }

    pub fn pick_warning(&self, epoch: u64) {
        if epoch != self.timer_epoch || self.phase != Phase::Picking {
            return;
        }
        let picker = match self.current_picker() {
            Some(p) => p.name().to_string(),
            None => return,
        };
        self.notifier.broadcast(GameEvent::PickTimeoutWarning {
            seconds_left: self.options.pick_seconds / 2,
            picker,
        });
    }

    /// Pick-phase deadline: every non-picker gets the consolation
    /// score, then the round resolves as a failure.
    pub fn pick_deadline(&mut self, epoch: u64) -> TimerCmd {
        if epoch != self.timer_epoch || self.phase != Phase::Picking {
            return TimerCmd::None;
        }
        let picker = match self.current_picker() {
            Some(p) => p.name().to_string(),
            None => return TimerCmd::None,
        };
        tracing::warn!(round = self.round, picker = %picker, "pick deadline hit");
        self.notifier
            .broadcast(GameEvent::PickTimeoutFailure { picker });
        if let Some(cmd) = self.award_consolation(ConsolationScope::AllNonPickers) {
            return cmd;
        }
        self.finalize_round()
    }

    fn find(&self, id: PlayerId) -> Option<usize> {
        self.players.iter().position(|p| p.id() == id)
    }

    fn reject(&self, player: &Player, reason: RejectReason) {
        tracing::debug!(player = %player.name(), ?reason, "action rejected");
        self.notifier
            .tell(player.connection(), GameEvent::ActionRejected { reason });
    }

    fn bump_epoch(&mut self) -> u64 {
        self.timer_epoch += 1;
        self.timer_epoch
    }

    fn set_picker(&mut self, seat: usize) {
        for player in &mut self.players {
            player.is_picker = false;
            player.pick_ready = false;
        }
        self.players[seat].is_picker = true;
    }

    /// Non-pickers still owed a play this round.
    fn waiting_on(&self) -> usize {
        self.players
            .iter()
            .filter(|p| !p.is_picker && !p.has_played && !p.sitting_out)
            .count()
    }

    /// Draws a prompt, announces the round, and hands the play timers
    /// to the shell. The prompt is drawn fresh every round.
    fn begin_round(&mut self) -> TimerCmd {
        self.phase = Phase::Playing;
        let prompt = self.deck.draw_prompt();
        let picker = self.players[self.picker_seat].name().to_string();
        tracing::info!(round = self.round, picker = %picker, pick = prompt.pick, "round started");
        self.notifier.broadcast(GameEvent::RoundStarted {
            picker,
            prompt: prompt.clone(),
            round: self.round,
        });
        self.prompt = Some(prompt);
        let epoch = self.bump_epoch();
        TimerCmd::ArmPlay { epoch }
    }

    /// All plays are in: shuffle them so submission order says nothing
    /// about authorship, open the pick phase, swap the timers.
    fn close_play_phase(&mut self) -> TimerCmd {
        self.phase = Phase::Picking;
        self.pending.shuffle(&mut self.rng);
        self.players[self.picker_seat].pick_ready = true;
        tracing::info!(
            round = self.round,
            plays = self.pending.len(),
            "pick phase open"
        );
        self.announce_choices();
        let epoch = self.bump_epoch();
        TimerCmd::ArmPick { epoch }
    }

    fn announce_choices(&self) {
        let picker = self.players[self.picker_seat].name().to_string();
        let choices = self
            .pending
            .iter()
            .map(|p| PlayChoice {
                cards: p.cards.clone(),
            })
            .collect();
        let prompt = self
            .prompt
            .as_ref()
            .map(|p| p.text.clone())
            .unwrap_or_default();
        self.notifier.broadcast(GameEvent::ChoicesReady {
            picker,
            choices,
            prompt,
        });
    }

    fn scoreboard(&self) -> Vec<ScoreEntry> {
        let mut entries: Vec<ScoreEntry> = self
            .players
            .iter()
            .map(|p| ScoreEntry {
                name: p.name().to_string(),
                points: p.points(),
            })
            .collect();
        // stable sort keeps roster order among equals
        entries.sort_by(|a, b| b.points.cmp(&a.points));
        entries
    }

    /// Pays the half-value score in roster order. The first player to
    /// cross the threshold ends the game on the spot; later seats get
    /// nothing for this round.
    fn award_consolation(&mut self, scope: ConsolationScope) -> Option<TimerCmd> {
        let amount = self.options.consolation_points();
        let threshold = self.options.win_points;
        for i in 0..self.players.len() {
            let player = &self.players[i];
            if player.is_picker {
                continue;
            }
            let eligible = match scope {
                ConsolationScope::PlayersWhoPlayed => player.has_played,
                ConsolationScope::AllNonPickers => true,
            };
            if !eligible {
                continue;
            }
            if self.players[i].add_points(amount, threshold) {
                let winner = self.players[i].name().to_string();
                return Some(self.game_over(winner));
            }
        }
        None
    }

    /// Round resolution: scoreboard, rotate the picker, top up every
    /// hand, clear the round flags, and go straight into the next deal.
    fn finalize_round(&mut self) -> TimerCmd {
        self.notifier.broadcast(GameEvent::Scoreboard {
            entries: self.scoreboard(),
        });
        self.round += 1;
        self.pending.clear();
        self.picker_seat = (self.picker_seat + 1) % self.players.len();
        self.set_picker(self.picker_seat);
        let hand_size = self.options.hand_size;
        for i in 0..self.players.len() {
            self.players[i].sitting_out = false;
            self.players[i].has_played = false;
            self.players[i].fill_hand(&mut self.deck, hand_size);
        }
        self.begin_round()
    }

    fn remove_from_roster(&mut self, id: PlayerId) {
        if let Some(idx) = self.find(id) {
            self.players.remove(idx);
            if idx < self.picker_seat {
                self.picker_seat -= 1;
            } else if self.picker_seat >= self.players.len() && !self.players.is_empty() {
                self.picker_seat = 0;
            }
        }
    }

    /// The roster dropped below the minimum mid-game: highest score
    /// wins, ties going to the earliest seat.
    fn force_end_short_roster(&mut self) -> TimerCmd {
        self.notifier.broadcast(GameEvent::GameFailed);
        let winner = self
            .players
            .iter()
            .enumerate()
            .max_by_key(|(i, p)| (p.points(), std::cmp::Reverse(*i)))
            .map(|(_, p)| p.name().to_string());
        match winner {
            Some(name) => self.game_over(name),
            None => {
                self.reset();
                TimerCmd::DisarmAll
            }
        }
    }

    fn game_over(&mut self, winner: String) -> TimerCmd {
        tracing::info!(winner = %winner, "game over");
        self.notifier.broadcast(GameEvent::GameWon { winner });
        self.reset();
        TimerCmd::DisarmAll
    }

    /// Back to a quiescent room. The roster is emptied on purpose:
    /// everyone re-joins to opt into the next game.
    fn reset(&mut self) {
        self.players.clear();
        self.phase = Phase::Idle;
        self.round = 1;
        self.picker_seat = 0;
        self.prompt = None;
        self.pending.clear();
        self.timer_epoch += 1;
    }
}
