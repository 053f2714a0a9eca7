//! Twitter v1.1 write client with OAuth 1.0a signing.
//!
//! Every operation is a single signed form POST: build the parameter set,
//! sign it into an `Authorization: OAuth` header, delegate to the shared
//! HTTP client, decode the typed response. There is no retry or rate-limit
//! layer here; one call in, one remote attempt out.

use crate::twitter::oauth::{self, Credentials};
use crate::twitter::types::{DirectMessage, Status, TwitterUser};
use async_trait::async_trait;
use reqwest::header::{HeaderValue, AUTHORIZATION};
use serde::de::DeserializeOwned;
use tern_http::{Auth, HttpClient, HttpError, RequestOpts};
use thiserror::Error;

const TWITTER_API_BASE: &str = "https://api.twitter.com";

#[derive(Debug, Error)]
pub enum SocialError {
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    #[error("authorization header build failed: {0}")]
    Auth(String),
}

/// The write surface the dispatcher drives.
///
/// `TwitterApi` is the real implementation; tests substitute a recording
/// mock.
#[async_trait]
pub trait SocialApi: Send + Sync {
    /// Post a status update.
    async fn post_status(&self, text: &str) -> Result<Status, SocialError>;

    /// Follow a user by screen name.
    async fn follow(&self, screen_name: &str) -> Result<TwitterUser, SocialError>;

    /// Unfollow a user by screen name.
    async fn unfollow(&self, screen_name: &str) -> Result<TwitterUser, SocialError>;

    /// Retweet a status by id. `trim_user` requests the shortened response
    /// payload.
    async fn retweet(&self, id: i64, trim_user: bool) -> Result<Status, SocialError>;

    /// Favorite a status by id.
    async fn favorite(&self, id: i64) -> Result<Status, SocialError>;

    /// Delete one of the authenticated user's statuses by id.
    async fn destroy_status(&self, id: i64, trim_user: bool) -> Result<Status, SocialError>;

    /// Send a direct message to a screen name.
    async fn send_direct_message(
        &self,
        text: &str,
        screen_name: &str,
    ) -> Result<DirectMessage, SocialError>;
}

#[derive(Clone)]
pub struct TwitterApi {
    http: HttpClient,
    creds: Credentials,
}

impl TwitterApi {
    /// Client against the production API.
    pub fn new(creds: Credentials) -> Result<Self, SocialError> {
        Self::with_base(creds, TWITTER_API_BASE)
    }

    /// Client against an alternative base URL (tests point this at a mock
    /// server).
    pub fn with_base(creds: Credentials, base: &str) -> Result<Self, SocialError> {
        let http = HttpClient::new(base)?;
        Ok(Self { http, creds })
    }

    // Sign and POST one form-encoded request.
    async fn signed_post<T>(&self, path: &str, form: &[(&str, String)]) -> Result<T, SocialError>
    where
        T: DeserializeOwned,
    {
        let url = self.http.url_for(path)?;
        let params: Vec<(&str, &str)> = form.iter().map(|(k, v)| (*k, v.as_str())).collect();
        let header = oauth::authorization_header("POST", &url, &params, &self.creds);
        let value =
            HeaderValue::from_str(&header).map_err(|e| SocialError::Auth(e.to_string()))?;

        let opts = RequestOpts {
            auth: Some(Auth::Header {
                name: AUTHORIZATION,
                value,
            }),
            ..Default::default()
        };
        tracing::debug!(path, "twitter.post");
        Ok(self.http.post_form(path, form, opts).await?)
    }
}

#[async_trait]
impl SocialApi for TwitterApi {
    async fn post_status(&self, text: &str) -> Result<Status, SocialError> {
        self.signed_post(
            "1.1/statuses/update.json",
            &[("status", text.to_string())],
        )
        .await
    }

    async fn follow(&self, screen_name: &str) -> Result<TwitterUser, SocialError> {
        self.signed_post(
            "1.1/friendships/create.json",
            &[("screen_name", screen_name.to_string())],
        )
        .await
    }

    async fn unfollow(&self, screen_name: &str) -> Result<TwitterUser, SocialError> {
        self.signed_post(
            "1.1/friendships/destroy.json",
            &[("screen_name", screen_name.to_string())],
        )
        .await
    }

    async fn retweet(&self, id: i64, trim_user: bool) -> Result<Status, SocialError> {
        self.signed_post(
            &format!("1.1/statuses/retweet/{id}.json"),
            &[("trim_user", trim_user.to_string())],
        )
        .await
    }

    async fn favorite(&self, id: i64) -> Result<Status, SocialError> {
        self.signed_post("1.1/favorites/create.json", &[("id", id.to_string())])
            .await
    }

    async fn destroy_status(&self, id: i64, trim_user: bool) -> Result<Status, SocialError> {
        self.signed_post(
            &format!("1.1/statuses/destroy/{id}.json"),
            &[("trim_user", trim_user.to_string())],
        )
        .await
    }

    async fn send_direct_message(
        &self,
        text: &str,
        screen_name: &str,
    ) -> Result<DirectMessage, SocialError> {
        self.signed_post(
            "1.1/direct_messages/new.json",
            &[
                ("screen_name", screen_name.to_string()),
                ("text", text.to_string()),
            ],
        )
        .await
    }
}
