//! Command dispatcher: maps short chat commands onto Twitter write calls and
//! reports failures back to the originating channel.
//!
//! The flow is one straight line: [`command::parse`] turns raw text into a
//! [`command::Verb`] plus remainder, [`Dispatcher`] runs the matching handler
//! (argument check, one remote call, error translation), and any failure text
//! is forwarded to the [`Notifier`] for the channel the command came from.
pub mod command;
pub mod dispatcher;
pub mod error;
pub mod notify;

pub use command::{Command, Verb};
pub use dispatcher::Dispatcher;
pub use error::{DispatchError, Outcome};
pub use notify::{Notifier, NotifyError, SlackWebhook};
