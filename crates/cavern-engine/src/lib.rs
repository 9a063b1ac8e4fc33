//! Rule engine for Cavern adventures.
//!
//! An [`Adventure`] bundles the static world with two ordered rule lists:
//! occurs, which run every turn, and player actions, which are scanned in
//! declaration order until the first one matches. A [`Game`] pairs an
//! adventure with one session's [`GameState`](cavern_core::GameState) and
//! drives turns from a [`CommandInterpreter`] to a [`Display`].

/// Actions and the staged action builder.
pub mod action;
/// The compiled, immutable adventure bundle.
pub mod adventure;
/// Conditions: pure predicates over a turn.
pub mod condition;
/// Session configuration.
pub mod config;
/// The per-turn context handed to conditions and effects.
pub mod context;
/// The per-turn dispatcher.
pub mod dispatch;
/// Output boundary and text rendering.
pub mod display;
/// Effects: the state changes and output an action performs.
pub mod effect;
/// Error types for the engine.
pub mod error;
/// Input boundary: turning lines of text into commands.
pub mod interpreter;
/// Injectable randomness for `random` conditions.
pub mod random;
/// Game sessions and the turn loop.
pub mod session;
/// Session identifiers and per-turn records.
pub mod transcript;

pub use action::{Action, ActionBuilder};
pub use adventure::Adventure;
pub use condition::{Comparison, Condition};
pub use config::GameConfig;
pub use context::TurnContext;
pub use dispatch::{TurnOutcome, take_turn};
pub use display::{Display, TextDisplay, render_inventory, render_room};
pub use effect::Effect;
pub use error::{EngineError, EngineResult};
pub use interpreter::{CommandInterpreter, LineInterpreter, ScriptedInterpreter};
pub use random::{RandomSource, SeededRandom};
pub use session::Game;
pub use transcript::{GameId, TurnRecord};
