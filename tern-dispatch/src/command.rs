//! Command tokenisation.
//!
//! A command is the first whitespace-delimited token (the verb) plus the raw
//! remainder. The remainder is split off at the first space only, so a dm
//! body keeps its internal spacing untouched.

use crate::error::DispatchError;

/// The closed set of sub-commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Tweet,
    Follow,
    Unfollow,
    Retweet,
    Favorite,
    Delete,
    Dm,
}

impl Verb {
    fn from_token(token: &str) -> Option<Self> {
        match token {
            "tweet" => Some(Self::Tweet),
            "follow" => Some(Self::Follow),
            "unfollow" => Some(Self::Unfollow),
            "retweet" => Some(Self::Retweet),
            "favorite" => Some(Self::Favorite),
            "delete" => Some(Self::Delete),
            "dm" => Some(Self::Dm),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tweet => "tweet",
            Self::Follow => "follow",
            Self::Unfollow => "unfollow",
            Self::Retweet => "retweet",
            Self::Favorite => "favorite",
            Self::Delete => "delete",
            Self::Dm => "dm",
        }
    }
}

/// One parsed invocation; borrows from the input and lives only as long as
/// the dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Command<'a> {
    pub verb: Verb,
    /// Everything after the first space, exactly as typed. `None` when the
    /// input was a bare verb.
    pub rest: Option<&'a str>,
}

/// Trim the input and split it into a verb and remainder.
///
/// Empty or all-whitespace input has no sub-command; a first token outside
/// the verb set is an unknown command naming that token.
pub fn parse(text: &str) -> Result<Command<'_>, DispatchError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(DispatchError::MissingSubcommand);
    }

    let (token, rest) = match trimmed.split_once(' ') {
        Some((token, rest)) => (token, Some(rest)),
        None => (trimmed, None),
    };

    let verb = Verb::from_token(token)
        .ok_or_else(|| DispatchError::UnknownCommand(token.to_string()))?;
    Ok(Command { verb, rest })
}
