/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur when building or mutating the world model.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A room with the same name already exists.
    #[error("room already exists: \"{0}\"")]
    DuplicateRoom(String),

    /// An item with the same name already exists.
    #[error("item already exists: \"{0}\"")]
    DuplicateItem(String),

    /// The named room does not exist in the world.
    #[error("room not found: \"{0}\"")]
    UnknownRoom(String),

    /// The named item does not exist in the world.
    #[error("item not found: \"{0}\"")]
    UnknownItem(String),

    /// A fixed item was moved into the player's inventory.
    #[error("item \"{0}\" is not portable and cannot be carried")]
    NotPortable(String),

    /// A state snapshot could not be written or read.
    #[error("snapshot error: {0}")]
    Snapshot(#[from] serde_json::Error),
}
