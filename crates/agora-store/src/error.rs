use thiserror::Error;

pub type Result<T> = std::result::Result<T, StoreError>;

/// Every way a store operation can fail. None of these leave state partially
/// mutated and none are fatal to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("not authenticated")]
    NotAuthenticated,

    #[error("invalid username or password")]
    AuthFailed,

    #[error("user not found: {username}")]
    UserNotFound { username: String },

    #[error("no pending friend request")]
    NoPendingRequest,

    #[error("no new messages")]
    NoMessages,

    #[error("nothing to undo")]
    NothingToUndo,

    #[error("no free identifier in 1..={space} after {attempts} attempts")]
    IdSpaceExhausted { space: u32, attempts: u32 },

    #[error("credential backend failure: {0}")]
    Credential(String),

    #[error("store lock poisoned")]
    LockPoisoned,
}
