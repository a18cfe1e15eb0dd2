//! # cardroom-engine: a chat-room card game engine
//!
//! The round/turn lifecycle manager for a fill-in-the-blank card game
//! played by a chat room: deal, play, pick, score, next round or game
//! over. Players act asynchronously and unreliably — they play late,
//! never play, or disconnect mid-round — so the engine is a state
//! machine coordinated by wall-clock timers racing against player
//! input.
//!
//! ## Core modules
//!
//! - [`cards`] - Prompt/answer card types and the JSON deck-file shape
//! - [`deck`] - Uniform random draws (with replacement) from fixed pools
//! - [`player`] - Per-participant state: hand, points, turn flags
//! - [`config`] - Room options with defaults and construction-time validation
//! - [`events`] - Semantic announcements and the [`events::Notifier`] sink
//! - [`engine`] - The state machine itself: join/leave/start/play/pick
//!   plus timeout resolution
//! - [`timer`] - The four cancellable phase timers, disarmed as a unit
//! - [`room`] - Mutex shell serializing engine calls and driving timers
//! - [`errors`] - Construction-time error types
//!
//! ## Quick start
//!
//! ```rust
//! use std::sync::Arc;
//! use cardroom_engine::config::GameOptions;
//! use cardroom_engine::deck::CardDeck;
//! use cardroom_engine::engine::GameEngine;
//! use cardroom_engine::events::{ConnectionId, GameEvent, Notifier};
//!
//! struct Silent;
//! impl Notifier for Silent {
//!     fn broadcast(&self, _event: GameEvent) {}
//!     fn tell(&self, _connection: ConnectionId, _event: GameEvent) {}
//! }
//!
//! let deck = CardDeck::from_json(
//!     r#"{"promptCards": [{"text": "_?", "pick": 1}],
//!         "answerCards": ["A mop.", "A cat.", "A nap."]}"#,
//! )
//! .expect("deck");
//! let mut engine = GameEngine::new(GameOptions::default(), deck, Arc::new(Silent))
//!     .expect("engine");
//!
//! let ada = engine.join("ada", uuid::Uuid::new_v4());
//! assert_eq!(engine.player_count(), 1);
//! # let _ = ada;
//! ```
//!
//! ## Timers
//!
//! Every mutating engine call returns a [`engine::TimerCmd`] telling the
//! shell which phase timers to arm or disarm; [`room::GameRoom`] applies
//! them with tokio tasks. A timer fires back into the engine with the
//! epoch captured when it was armed, so a firing that lost the race
//! against a player action (or a cancellation) is a guaranteed no-op.

pub mod cards;
pub mod config;
pub mod deck;
pub mod engine;
pub mod errors;
pub mod events;
pub mod player;
pub mod room;
pub mod timer;
pub mod util;
