use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use tern_dispatch::{DispatchError, Dispatcher, Notifier, NotifyError};
use tern_http::HttpError;
use tern_social::twitter::types::{DirectMessage, Status, TwitterUser};
use tern_social::{SocialApi, SocialError};

#[derive(Debug, Clone, PartialEq)]
enum Call {
    PostStatus(String),
    Follow(String),
    Unfollow(String),
    Retweet(i64, bool),
    Favorite(i64),
    Destroy(i64, bool),
    DirectMessage { screen_name: String, text: String },
}

/// Records every remote call; optionally fails them all.
#[derive(Clone, Default)]
struct RecordingSocial {
    calls: Arc<Mutex<Vec<Call>>>,
    fail: bool,
}

impl RecordingSocial {
    fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) -> Result<(), SocialError> {
        self.calls.lock().unwrap().push(call);
        if self.fail {
            Err(SocialError::Http(HttpError::Network("boom".into())))
        } else {
            Ok(())
        }
    }

    fn status(id: i64) -> Status {
        Status {
            id,
            text: "stub".into(),
            id_str: None,
            created_at: None,
            user: None,
            retweeted: None,
            favorited: None,
        }
    }
}

#[async_trait]
impl SocialApi for RecordingSocial {
    async fn post_status(&self, text: &str) -> Result<Status, SocialError> {
        self.record(Call::PostStatus(text.into()))?;
        Ok(Self::status(1))
    }

    async fn follow(&self, screen_name: &str) -> Result<TwitterUser, SocialError> {
        self.record(Call::Follow(screen_name.into()))?;
        Ok(TwitterUser {
            id: 1,
            screen_name: Some(screen_name.into()),
            name: None,
            following: Some(true),
        })
    }

    async fn unfollow(&self, screen_name: &str) -> Result<TwitterUser, SocialError> {
        self.record(Call::Unfollow(screen_name.into()))?;
        Ok(TwitterUser {
            id: 1,
            screen_name: Some(screen_name.into()),
            name: None,
            following: Some(false),
        })
    }

    async fn retweet(&self, id: i64, trim_user: bool) -> Result<Status, SocialError> {
        self.record(Call::Retweet(id, trim_user))?;
        Ok(Self::status(id))
    }

    async fn favorite(&self, id: i64) -> Result<Status, SocialError> {
        self.record(Call::Favorite(id))?;
        Ok(Self::status(id))
    }

    async fn destroy_status(&self, id: i64, trim_user: bool) -> Result<Status, SocialError> {
        self.record(Call::Destroy(id, trim_user))?;
        Ok(Self::status(id))
    }

    async fn send_direct_message(
        &self,
        text: &str,
        screen_name: &str,
    ) -> Result<DirectMessage, SocialError> {
        self.record(Call::DirectMessage {
            screen_name: screen_name.into(),
            text: text.into(),
        })?;
        Ok(DirectMessage {
            id: 1,
            text: Some(text.into()),
            recipient_screen_name: Some(screen_name.into()),
            sender_screen_name: None,
        })
    }
}

/// Captures (text, channel) pairs; optionally fails delivery.
#[derive(Clone, Default)]
struct RecordingNotifier {
    sent: Arc<Mutex<Vec<(String, String)>>>,
    fail: bool,
}

impl RecordingNotifier {
    fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, text: &str, channel: &str) -> Result<(), NotifyError> {
        self.sent.lock().unwrap().push((text.into(), channel.into()));
        if self.fail {
            Err(NotifyError::Http(HttpError::Network("down".into())))
        } else {
            Ok(())
        }
    }
}

fn dispatcher() -> (
    Dispatcher<RecordingSocial, RecordingNotifier>,
    RecordingSocial,
    RecordingNotifier,
) {
    let social = RecordingSocial::default();
    let notifier = RecordingNotifier::default();
    (
        Dispatcher::new(social.clone(), notifier.clone()),
        social,
        notifier,
    )
}

#[tokio::test]
async fn unknown_verb_is_reported_to_the_channel() {
    let (d, social, notifier) = dispatcher();
    let err = d.execute("frobnicate 123", "#ops").await.unwrap_err();
    assert_eq!(err, DispatchError::UnknownCommand("frobnicate".into()));
    assert!(social.calls().is_empty());
    assert_eq!(
        notifier.sent(),
        vec![("Unknown command frobnicate".to_string(), "#ops".to_string())]
    );
}

#[tokio::test]
async fn empty_input_has_no_subcommand() {
    let (d, social, notifier) = dispatcher();
    let err = d.execute("   ", "#ops").await.unwrap_err();
    assert_eq!(err, DispatchError::MissingSubcommand);
    assert!(social.calls().is_empty());
    assert_eq!(
        notifier.sent(),
        vec![("Sub command doesn't exist".to_string(), "#ops".to_string())]
    );
}

#[tokio::test]
async fn tweet_without_text_is_rejected() {
    let (d, social, _notifier) = dispatcher();
    let err = d.execute("tweet", "#ops").await.unwrap_err();
    assert_eq!(err, DispatchError::NotEnoughArguments);
    assert!(social.calls().is_empty());
}

#[tokio::test]
async fn tweet_posts_the_remainder() {
    let (d, social, notifier) = dispatcher();
    d.execute("tweet hello world", "#ops").await.unwrap();
    assert_eq!(social.calls(), vec![Call::PostStatus("hello world".into())]);
    assert!(notifier.sent().is_empty());
}

#[tokio::test]
async fn retweet_url_extracts_trailing_id_and_trims() {
    let (d, social, notifier) = dispatcher();
    d.execute("retweet https://x.com/u/status/12345", "chan")
        .await
        .unwrap();
    assert_eq!(social.calls(), vec![Call::Retweet(12345, true)]);
    assert!(notifier.sent().is_empty());
}

#[tokio::test]
async fn retweet_with_bad_id_makes_no_remote_call() {
    let (d, social, notifier) = dispatcher();
    let err = d.execute("retweet abc", "#ops").await.unwrap_err();
    assert_eq!(err, DispatchError::InvalidStatusId);
    assert!(social.calls().is_empty());
    assert_eq!(
        notifier.sent(),
        vec![("User id must be integer".to_string(), "#ops".to_string())]
    );
}

#[tokio::test]
async fn favorite_accepts_a_bare_id() {
    let (d, social, _notifier) = dispatcher();
    d.execute("favorite 777", "#ops").await.unwrap();
    assert_eq!(social.calls(), vec![Call::Favorite(777)]);
}

#[tokio::test]
async fn delete_uses_trim_option() {
    let (d, social, _notifier) = dispatcher();
    d.execute("delete 4242", "#ops").await.unwrap();
    assert_eq!(social.calls(), vec![Call::Destroy(4242, true)]);
}

#[tokio::test]
async fn dm_without_body_is_rejected() {
    let (d, social, _notifier) = dispatcher();
    let err = d.execute("dm alice", "#ops").await.unwrap_err();
    assert_eq!(err, DispatchError::NotEnoughArguments);
    assert!(social.calls().is_empty());
}

#[tokio::test]
async fn dm_splits_name_from_body_once() {
    let (d, social, _notifier) = dispatcher();
    d.execute("dm alice hello there", "#ops").await.unwrap();
    assert_eq!(
        social.calls(),
        vec![Call::DirectMessage {
            screen_name: "alice".into(),
            text: "hello there".into()
        }]
    );
}

#[tokio::test]
async fn dm_body_keeps_internal_spacing() {
    let (d, social, _notifier) = dispatcher();
    d.execute("dm alice hello   spaced  out", "#ops").await.unwrap();
    assert_eq!(
        social.calls(),
        vec![Call::DirectMessage {
            screen_name: "alice".into(),
            text: "hello   spaced  out".into()
        }]
    );
}

#[tokio::test]
async fn surrounding_whitespace_does_not_affect_the_verb() {
    let (d, social, _notifier) = dispatcher();
    d.execute("   follow bob   ", "#ops").await.unwrap();
    assert_eq!(social.calls(), vec![Call::Follow("bob".into())]);
}

#[tokio::test]
async fn repeated_commands_issue_independent_calls() {
    let (d, social, _notifier) = dispatcher();
    d.execute("retweet 5", "#ops").await.unwrap();
    d.execute("retweet 5", "#ops").await.unwrap();
    assert_eq!(
        social.calls(),
        vec![Call::Retweet(5, true), Call::Retweet(5, true)]
    );
}

#[tokio::test]
async fn remote_failures_become_static_messages() {
    let social = RecordingSocial::failing();
    let notifier = RecordingNotifier::default();
    let d = Dispatcher::new(social.clone(), notifier.clone());

    let err = d.execute("tweet hi", "#ops").await.unwrap_err();
    assert_eq!(err, DispatchError::TweetFailed("hi".into()));

    let err = d.execute("follow bob", "#ops").await.unwrap_err();
    assert_eq!(err, DispatchError::UserNotFound("bob".into()));

    let err = d.execute("delete 123", "#ops").await.unwrap_err();
    assert_eq!(err, DispatchError::DeleteFailed("123".into()));

    let err = d.execute("dm bob hi there", "#ops").await.unwrap_err();
    assert_eq!(
        err,
        DispatchError::DirectMessageFailed("bob".into(), "hi there".into())
    );

    // Each failure was still one remote attempt, and each produced one
    // notification with the translated message.
    assert_eq!(social.calls().len(), 4);
    let texts: Vec<String> = notifier.sent().into_iter().map(|(t, _)| t).collect();
    assert_eq!(
        texts,
        vec![
            "Failed to tweet hi",
            "Could not find user bob",
            "Could not delete tweet 123",
            "Could not send DM to bob hi there",
        ]
    );
}

#[tokio::test]
async fn notifier_failure_does_not_change_the_outcome() {
    let social = RecordingSocial::failing();
    let notifier = RecordingNotifier::failing();
    let d = Dispatcher::new(social, notifier.clone());

    let err = d.execute("tweet hi", "#ops").await.unwrap_err();
    assert_eq!(err, DispatchError::TweetFailed("hi".into()));
    // Delivery was attempted exactly once even though it failed.
    assert_eq!(notifier.sent().len(), 1);
}

#[tokio::test]
async fn outcome_sink_receives_exactly_one_result_per_call() {
    let (d, _social, _notifier) = dispatcher();
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();

    d.execute_with_sink("tweet hi", "#ops", Some(&tx))
        .await
        .unwrap();
    let err = d
        .execute_with_sink("retweet abc", "#ops", Some(&tx))
        .await
        .unwrap_err();

    assert_eq!(rx.recv().await.unwrap(), Ok(()));
    assert_eq!(rx.recv().await.unwrap(), Err(err));
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn dropped_outcome_receiver_is_tolerated() {
    let (d, social, _notifier) = dispatcher();
    let (tx, rx) = tokio::sync::mpsc::unbounded_channel::<tern_dispatch::Outcome>();
    drop(rx);

    d.execute_with_sink("favorite 1", "#ops", Some(&tx))
        .await
        .unwrap();
    assert_eq!(social.calls(), vec![Call::Favorite(1)]);
}
