//! Failure notification back to the originating chat channel.
//!
//! The production implementation posts to a Slack incoming webhook. Delivery
//! is fire-and-forget from the dispatcher's point of view: a failed
//! notification is logged and otherwise dropped.

use async_trait::async_trait;
use serde::Serialize;
use tern_http::{HttpClient, HttpError, RequestOpts};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),
}

/// Sink for (text, channel) failure reports.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, text: &str, channel: &str) -> Result<(), NotifyError>;
}

/// Incoming-webhook payload; Slack routes on the `channel` field.
#[derive(Debug, Serialize)]
struct IncomingMessage<'a> {
    text: &'a str,
    channel: &'a str,
}

/// Slack incoming-webhook client.
pub struct SlackWebhook {
    http: HttpClient,
}

impl SlackWebhook {
    /// `webhook_url` is the full `https://hooks.slack.com/services/...` URL.
    pub fn new(webhook_url: &str) -> Result<Self, NotifyError> {
        Ok(Self {
            http: HttpClient::new(webhook_url)?,
        })
    }
}

#[async_trait]
impl Notifier for SlackWebhook {
    async fn notify(&self, text: &str, channel: &str) -> Result<(), NotifyError> {
        let msg = IncomingMessage { text, channel };
        self.http
            .post_json_ignore_body("", &msg, RequestOpts::default())
            .await?;
        Ok(())
    }
}
