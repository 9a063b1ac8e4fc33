//! Core types for Cavern: words, vocabulary, commands, and the world model.
//!
//! This crate holds the data the script compiler produces and the rule engine
//! reads. It is independent of the parser: you can build a [`World`] and a
//! [`Vocabulary`] programmatically, or restore a [`GameState`] from JSON.

/// Parsed player input as an ordered sequence of words.
pub mod command;
/// Error types used throughout the crate.
pub mod error;
/// Mutable per-session state: current room, item placement, flags, counters.
pub mod state;
/// The registry of recognized words.
pub mod vocabulary;
/// Words, synonyms, and the sentinel matching rules.
pub mod word;
/// Rooms, exits, items, and locations.
pub mod world;

/// Re-export the command type.
pub use command::Command;
/// Re-export error types.
pub use error::{CoreError, CoreResult};
/// Re-export the game state.
pub use state::GameState;
/// Re-export the vocabulary.
pub use vocabulary::Vocabulary;
/// Re-export word types.
pub use word::{NamedWord, Word};
/// Re-export world model types.
pub use world::{Exit, Item, Location, Room, World};
