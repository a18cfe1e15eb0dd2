use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::config::GameOptions;
use crate::deck::CardDeck;
use crate::engine::{GameEngine, TimerCmd};
use crate::errors::ConfigError;
use crate::events::{ConnectionId, Notifier};
use crate::player::PlayerId;
use crate::timer::{PhaseTimerSet, TimerHandle};

/// One game room: the engine behind a single mutex (every mutating call
/// is serialized, so no two transitions ever interleave) plus the
/// wall-clock timers racing against player input. Methods spawn timer
/// tasks, so a tokio runtime must be running.
#[derive(Clone)]
pub struct GameRoom {
    inner: Arc<RoomInner>,
}

struct RoomInner {
    engine: Mutex<GameEngine>,
    timers: Mutex<PhaseTimerSet>,
    play_duration: Duration,
    pick_duration: Duration,
}

impl std::fmt::Debug for GameRoom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let engine = self.inner.engine.lock().expect("engine lock poisoned");
        f.debug_struct("GameRoom").field("engine", &*engine).finish()
    }
}

impl GameRoom {
    pub fn new(
        options: GameOptions,
        deck: CardDeck,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self, ConfigError> {
        let play_duration = Duration::from_secs(options.play_seconds);
        let pick_duration = Duration::from_secs(options.pick_seconds);
        let engine = GameEngine::new(options, deck, notifier)?;
        Ok(Self {
            inner: Arc::new(RoomInner {
                engine: Mutex::new(engine),
                timers: Mutex::new(PhaseTimerSet::new()),
                play_duration,
                pick_duration,
            }),
        })
    }

    pub fn join(&self, name: impl Into<String>, connection: ConnectionId) -> PlayerId {
        self.lock_engine().join(name, connection)
    }

    pub fn leave(&self, player: PlayerId) {
        self.transition(|engine| engine.leave(player));
    }

    pub fn start(&self, player: PlayerId) {
        self.transition(|engine| engine.start(player));
    }

    pub fn play(&self, player: PlayerId, tokens: &[&str]) {
        self.transition(|engine| engine.play(player, tokens));
    }

    pub fn pick(&self, player: PlayerId, token: &str) {
        self.transition(|engine| engine.pick(player, token));
    }

    pub fn show_hand(&self, player: PlayerId) {
        self.lock_engine().show_hand(player);
    }

    /// Read access to the engine, for drivers that need roster or
    /// round information.
    pub fn with_engine<R>(&self, f: impl FnOnce(&GameEngine) -> R) -> R {
        f(&self.lock_engine())
    }

    fn lock_engine(&self) -> std::sync::MutexGuard<'_, GameEngine> {
        self.inner.engine.lock().expect("engine lock poisoned")
    }

    /// Runs one engine transition and applies its timer command while
    /// still holding the timers lock. The lock spans both steps:
    /// released in between, two transitions could apply their arm
    /// commands in the opposite order of the engine calls that produced
    /// them, and the stale arm would disarm the newer phase's live
    /// timers. The timers lock is always taken before the engine lock;
    /// no caller holds them the other way around.
    fn transition(&self, f: impl FnOnce(&mut GameEngine) -> TimerCmd) {
        self.transition_boxed(Box::new(f));
    }

    fn transition_boxed(&self, f: Box<dyn FnOnce(&mut GameEngine) -> TimerCmd + '_>) {
        let mut timers = self.inner.timers.lock().expect("timer lock poisoned");
        let cmd = {
            let mut engine = self.lock_engine();
            f(&mut engine)
        };
        match cmd {
            TimerCmd::None => {}
            TimerCmd::DisarmAll => {
                timers.disarm_all();
            }
            TimerCmd::ArmPlay { epoch } => {
                let warn_room = self.clone();
                let warn = TimerHandle::arm(self.inner.play_duration / 2, async move {
                    warn_room.lock_engine().play_warning(epoch);
                });
                let deadline_room = self.clone();
                let deadline = TimerHandle::arm(self.inner.play_duration, async move {
                    deadline_room.transition(|engine| engine.play_deadline(epoch));
                });
                timers.arm_play(warn, deadline);
            }
            TimerCmd::ArmPick { epoch } => {
                let warn_room = self.clone();
                let warn = TimerHandle::arm(self.inner.pick_duration / 2, async move {
                    warn_room.lock_engine().pick_warning(epoch);
                });
                let deadline_room = self.clone();
                let deadline = TimerHandle::arm(self.inner.pick_duration, async move {
                    deadline_room.transition(|engine| engine.pick_deadline(epoch));
                });
                timers.arm_pick(warn, deadline);
            }
        }
    }
}
