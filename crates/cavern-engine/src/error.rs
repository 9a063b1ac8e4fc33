//! Error types for the rule engine.

use cavern_core::CoreError;
use thiserror::Error;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors raised while running an adventure.
///
/// Apart from input errors these are content errors in the script: a
/// well-formed adventure guards movement with exit conditions and never tries
/// to carry a fixed item.
#[derive(Debug, Error)]
pub enum EngineError {
    /// An effect moved the player through an exit the room does not have.
    #[error("there is no exit {direction} from \"{room}\"")]
    NoExit {
        /// Room the player was in.
        room: String,
        /// Direction that was requested.
        direction: String,
    },

    /// The adventure's start room is not part of its world.
    #[error("start room not found: \"{0}\"")]
    UnknownStartRoom(String),

    /// A turn was requested after the game ended.
    #[error("the game has ended")]
    GameOver,

    /// World model error (unknown item, fixed item carried, snapshot failure).
    #[error("{0}")]
    Core(#[from] CoreError),

    /// Reading player input failed.
    #[error("input error: {0}")]
    Io(#[from] std::io::Error),
}
