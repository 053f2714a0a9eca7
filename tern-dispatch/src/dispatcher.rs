//! The dispatcher itself: verb handlers and outcome delivery.

use crate::command::{self, Verb};
use crate::error::{DispatchError, Outcome};
use crate::notify::Notifier;
use tern_social::twitter::extract;
use tern_social::SocialApi;
use tokio::sync::mpsc::UnboundedSender;

/// Maps chat commands onto social-media write calls.
///
/// Holds no mutable state: the social client and notifier are configured
/// once and shared read-only, so concurrent `execute` calls are independent.
pub struct Dispatcher<S, N> {
    social: S,
    notifier: N,
}

impl<S, N> Dispatcher<S, N>
where
    S: SocialApi,
    N: Notifier,
{
    pub fn new(social: S, notifier: N) -> Self {
        Self { social, notifier }
    }

    /// Run one command. Any failure is returned to the caller and forwarded
    /// as plain text to the notifier for `channel`.
    pub async fn execute(&self, text: &str, channel: &str) -> Outcome {
        self.execute_with_sink(text, channel, None).await
    }

    /// Like [`execute`](Self::execute), additionally pushing the outcome
    /// onto `outcome_tx` exactly once. The channel is unbounded, so the send
    /// cannot block; a dropped receiver is silently tolerated.
    pub async fn execute_with_sink(
        &self,
        text: &str,
        channel: &str,
        outcome_tx: Option<&UnboundedSender<Outcome>>,
    ) -> Outcome {
        let result = self.run(text).await;

        if let Err(err) = &result {
            // Notification delivery is fire-and-forget: failures are logged,
            // never surfaced to the caller.
            if let Err(notify_err) = self.notifier.notify(&err.to_string(), channel).await {
                tracing::debug!(
                    error = %notify_err,
                    channel,
                    "failure notification was not delivered"
                );
            }
        }

        if let Some(tx) = outcome_tx {
            let _ = tx.send(result.clone());
        }

        result
    }

    async fn run(&self, text: &str) -> Outcome {
        let cmd = command::parse(text)?;
        match cmd.verb {
            Verb::Tweet => self.tweet(cmd.rest).await,
            Verb::Follow => self.follow(cmd.rest).await,
            Verb::Unfollow => self.unfollow(cmd.rest).await,
            Verb::Retweet => self.retweet(cmd.rest).await,
            Verb::Favorite => self.favorite(cmd.rest).await,
            Verb::Delete => self.delete(cmd.rest).await,
            Verb::Dm => self.dm(cmd.rest).await,
        }
    }

    async fn tweet(&self, rest: Option<&str>) -> Outcome {
        let text = rest.ok_or(DispatchError::NotEnoughArguments)?;
        if let Err(err) = self.social.post_status(text).await {
            tracing::warn!(error = %err, "status update failed");
            return Err(DispatchError::TweetFailed(text.to_string()));
        }
        Ok(())
    }

    async fn follow(&self, rest: Option<&str>) -> Outcome {
        let screen_name = rest.ok_or(DispatchError::NotEnoughArguments)?;
        if let Err(err) = self.social.follow(screen_name).await {
            tracing::warn!(error = %err, screen_name, "follow failed");
            return Err(DispatchError::UserNotFound(screen_name.to_string()));
        }
        Ok(())
    }

    async fn unfollow(&self, rest: Option<&str>) -> Outcome {
        let screen_name = rest.ok_or(DispatchError::NotEnoughArguments)?;
        if let Err(err) = self.social.unfollow(screen_name).await {
            tracing::warn!(error = %err, screen_name, "unfollow failed");
            return Err(DispatchError::UserNotFound(screen_name.to_string()));
        }
        Ok(())
    }

    async fn retweet(&self, rest: Option<&str>) -> Outcome {
        let raw = rest.ok_or(DispatchError::NotEnoughArguments)?;
        let id = extract::status_id(raw).map_err(|_| DispatchError::InvalidStatusId)?;
        if let Err(err) = self.social.retweet(id, true).await {
            tracing::warn!(error = %err, id, "retweet failed");
            return Err(DispatchError::RetweetFailed(raw.to_string()));
        }
        Ok(())
    }

    async fn favorite(&self, rest: Option<&str>) -> Outcome {
        let raw = rest.ok_or(DispatchError::NotEnoughArguments)?;
        let id = extract::status_id(raw).map_err(|_| DispatchError::InvalidStatusId)?;
        if let Err(err) = self.social.favorite(id).await {
            tracing::warn!(error = %err, id, "favorite failed");
            return Err(DispatchError::FavoriteFailed(raw.to_string()));
        }
        Ok(())
    }

    async fn delete(&self, rest: Option<&str>) -> Outcome {
        let raw = rest.ok_or(DispatchError::NotEnoughArguments)?;
        let id = extract::status_id(raw).map_err(|_| DispatchError::InvalidStatusId)?;
        if let Err(err) = self.social.destroy_status(id, true).await {
            tracing::warn!(error = %err, id, "status delete failed");
            return Err(DispatchError::DeleteFailed(raw.to_string()));
        }
        Ok(())
    }

    async fn dm(&self, rest: Option<&str>) -> Outcome {
        let rest = rest.ok_or(DispatchError::NotEnoughArguments)?;
        let (screen_name, text) = rest
            .split_once(' ')
            .ok_or(DispatchError::NotEnoughArguments)?;
        if let Err(err) = self.social.send_direct_message(text, screen_name).await {
            tracing::warn!(error = %err, screen_name, "direct message failed");
            return Err(DispatchError::DirectMessageFailed(
                screen_name.to_string(),
                text.to_string(),
            ));
        }
        Ok(())
    }
}
