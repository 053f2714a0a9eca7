use thiserror::Error;

/// Everything a dispatch can fail with.
///
/// The messages double as the user-facing notification text, so they are
/// deliberately plain. Remote error detail never ends up in here; it is
/// logged at the call site and translated into the static per-verb message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    #[error("Sub command doesn't exist")]
    MissingSubcommand,

    #[error("Unknown command {0}")]
    UnknownCommand(String),

    #[error("Argument is not enough")]
    NotEnoughArguments,

    #[error("User id must be integer")]
    InvalidStatusId,

    #[error("Failed to tweet {0}")]
    TweetFailed(String),

    #[error("Could not find user {0}")]
    UserNotFound(String),

    #[error("Could not retweet tweet {0}")]
    RetweetFailed(String),

    #[error("Could not favorite tweet {0}")]
    FavoriteFailed(String),

    #[error("Could not delete tweet {0}")]
    DeleteFailed(String),

    #[error("Could not send DM to {0} {1}")]
    DirectMessageFailed(String, String),
}

/// The per-call result pushed to outcome sinks and returned to the caller.
pub type Outcome = Result<(), DispatchError>;
