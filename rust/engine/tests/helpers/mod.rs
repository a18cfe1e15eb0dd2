#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use cardroom_engine::cards::{AnswerCard, PromptCard};
use cardroom_engine::config::GameOptions;
use cardroom_engine::deck::CardDeck;
use cardroom_engine::engine::{GameEngine, TimerCmd};
use cardroom_engine::events::{ConnectionId, GameEvent, Notifier, RejectReason};
use cardroom_engine::player::PlayerId;
use uuid::Uuid;

/// One delivered notification, with its audience.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recorded {
    Broadcast(GameEvent),
    Tell(ConnectionId, GameEvent),
}

/// Notifier that records everything for assertions.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    log: Mutex<Vec<Recorded>>,
}

impl RecordingNotifier {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn all(&self) -> Vec<Recorded> {
        self.log.lock().expect("log lock").clone()
    }

    pub fn broadcasts(&self) -> Vec<GameEvent> {
        self.all()
            .into_iter()
            .filter_map(|r| match r {
                Recorded::Broadcast(event) => Some(event),
                Recorded::Tell(..) => None,
            })
            .collect()
    }

    pub fn tells_to(&self, connection: ConnectionId) -> Vec<GameEvent> {
        self.all()
            .into_iter()
            .filter_map(|r| match r {
                Recorded::Tell(conn, event) if conn == connection => Some(event),
                _ => None,
            })
            .collect()
    }

    pub fn rejections_for(&self, connection: ConnectionId) -> Vec<RejectReason> {
        self.tells_to(connection)
            .into_iter()
            .filter_map(|event| match event {
                GameEvent::ActionRejected { reason } => Some(reason),
                _ => None,
            })
            .collect()
    }

    pub fn last_rejection(&self, connection: ConnectionId) -> Option<RejectReason> {
        self.rejections_for(connection).pop()
    }

    pub fn clear(&self) {
        self.log.lock().expect("log lock").clear();
    }
}

impl Notifier for RecordingNotifier {
    fn broadcast(&self, event: GameEvent) {
        self.log.lock().expect("log lock").push(Recorded::Broadcast(event));
    }

    fn tell(&self, connection: ConnectionId, event: GameEvent) {
        self.log
            .lock()
            .expect("log lock")
            .push(Recorded::Tell(connection, event));
    }
}

/// Deck where every prompt requires `pick` cards. Answers are distinct
/// so removals can be tracked by text.
pub fn deck_with_pick(pick: usize) -> CardDeck {
    let prompts = vec![
        PromptCard {
            text: format!("prompt one ({pick} blank)"),
            pick,
        },
        PromptCard {
            text: format!("prompt two ({pick} blank)"),
            pick,
        },
    ];
    let answers = (0..60)
        .map(|i| AnswerCard(format!("answer-{i:02}")))
        .collect();
    CardDeck::with_seed(prompts, answers, 1234).expect("test deck")
}

pub fn deck() -> CardDeck {
    deck_with_pick(1)
}

/// An engine with `n` joined players named `p0`, `p1`, ... and the
/// notifier log cleared of the join chatter.
pub struct TestTable {
    pub engine: GameEngine,
    pub notifier: Arc<RecordingNotifier>,
    pub ids: Vec<PlayerId>,
    pub conns: Vec<ConnectionId>,
}

pub fn table(n: usize, options: GameOptions, deck: CardDeck) -> TestTable {
    let notifier = RecordingNotifier::new();
    let mut engine =
        GameEngine::new(options, deck, notifier.clone() as Arc<dyn Notifier>).expect("engine");
    let mut ids = Vec::new();
    let mut conns = Vec::new();
    for i in 0..n {
        let conn = Uuid::new_v4();
        ids.push(engine.join(format!("p{i}"), conn));
        conns.push(conn);
    }
    notifier.clear();
    TestTable {
        engine,
        notifier,
        ids,
        conns,
    }
}

pub fn started_table(n: usize, options: GameOptions, deck: CardDeck) -> (TestTable, u64) {
    let mut t = table(n, options, deck);
    let cmd = t.engine.start(t.ids[0]);
    let epoch = match cmd {
        TimerCmd::ArmPlay { epoch } => epoch,
        other => panic!("start should arm play timers, got {:?}", other),
    };
    (t, epoch)
}

/// Plays the first `pick` cards of the player's hand.
pub fn play_first_cards(engine: &mut GameEngine, player: PlayerId) -> TimerCmd {
    let pick = engine.current_prompt().expect("prompt").pick;
    let tokens: Vec<String> = (1..=pick).map(|n| n.to_string()).collect();
    let tokens: Vec<&str> = tokens.iter().map(String::as_str).collect();
    engine.play(player, &tokens)
}
