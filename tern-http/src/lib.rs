//! Minimal HTTP client with safe logging and flexible auth.
//!
//! - Base-URL anchoring plus per-request auth and query params
//! - Form-encoded and JSON POST helpers with JSON decode
//! - Redacts secret-looking query params in logs
//!
//! There is deliberately no retry, backoff, or per-request timeout layer in
//! here: every remote call in this system is a single attempt and a hung
//! call hangs its caller. Keep that in mind before reusing this crate.
//!
//! Security: logs only ever include the auth kind (header/none), never the
//! header value itself.

use reqwest::header::{HeaderName, HeaderValue};
use reqwest::{Client, Method, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::time::Duration;
use thiserror::Error;

// ==============================
// Errors
// ==============================

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("invalid URL: {0}")]
    Url(String),
    #[error("request build failed: {0}")]
    Build(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("decode error: {0}, body_snippet: {1}")]
    Decode(String, String),
    #[error("server returned error {status}: {message}")]
    Api { status: StatusCode, message: String },
}

// ==============================
// Auth & Request Options
// ==============================

/// Authentication strategies supported by the request helpers.
#[derive(Clone, Debug)]
pub enum Auth {
    /// Prebuilt header, e.g. an `Authorization: OAuth ...` value signed by
    /// the caller.
    Header { name: HeaderName, value: HeaderValue },
    None,
}

/// Per-request knobs.
#[derive(Clone, Debug, Default)]
pub struct RequestOpts<'a> {
    pub auth: Option<Auth>,
    pub query: Option<Vec<(&'a str, Cow<'a, str>)>>,
}

// ==============================
// Client
// ==============================

#[derive(Clone)]
pub struct HttpClient {
    base: Url,
    inner: Client,
}

impl HttpClient {
    /// Construct a client anchored to a base URL.
    ///
    /// ```no_run
    /// use tern_http::{HttpClient, HttpError};
    ///
    /// let client = HttpClient::new("https://api.twitter.com")?;
    /// # Ok::<(), HttpError>(())
    /// ```
    pub fn new(base: &str) -> Result<Self, HttpError> {
        let base = Url::parse(base).map_err(|e| HttpError::Url(e.to_string()))?;
        let inner = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .build()
            .map_err(|e| HttpError::Build(e.to_string()))?;
        Ok(Self { base, inner })
    }

    /// Resolve `path` against the base URL.
    ///
    /// Exposed so callers that sign requests (OAuth 1.0a) can compute the
    /// exact URL that will be hit.
    pub fn url_for(&self, path: &str) -> Result<Url, HttpError> {
        self.base.join(path).map_err(|e| HttpError::Url(e.to_string()))
    }

    /// POST a form-encoded body and decode the JSON response.
    pub async fn post_form<T>(
        &self,
        path: &str,
        form: &[(&str, String)],
        opts: RequestOpts<'_>,
    ) -> Result<T, HttpError>
    where
        T: DeserializeOwned,
    {
        let url = self.url_for(path)?;
        let rb = self.inner.request(Method::POST, url.clone()).form(form);
        let bytes = self.dispatch(rb, Method::POST, &url, opts, true).await?;
        decode_json(&bytes)
    }

    /// POST a JSON body and discard the response payload on success.
    ///
    /// Used for webhook-style endpoints that answer with plain text.
    pub async fn post_json_ignore_body<B>(
        &self,
        path: &str,
        body: &B,
        opts: RequestOpts<'_>,
    ) -> Result<(), HttpError>
    where
        B: Serialize + ?Sized,
    {
        let url = self.url_for(path)?;
        let rb = self.inner.request(Method::POST, url.clone()).json(body);
        self.dispatch(rb, Method::POST, &url, opts, true).await?;
        Ok(())
    }

    // Single attempt: apply opts, send, log, and map non-success statuses.
    async fn dispatch(
        &self,
        mut rb: reqwest::RequestBuilder,
        method: Method,
        url: &Url,
        opts: RequestOpts<'_>,
        has_body: bool,
    ) -> Result<Vec<u8>, HttpError> {
        let mut redacted_q: Vec<(String, String)> = Vec::new();
        if let Some(q) = &opts.query {
            let pairs: Vec<(&str, &str)> = q.iter().map(|(k, v)| (*k, v.as_ref())).collect();
            redacted_q = redact_pairs(&pairs);
            rb = rb.query(&pairs);
        }

        let auth_kind = match &opts.auth {
            Some(Auth::Header { .. }) => "header",
            Some(Auth::None) | None => "none",
        };
        if let Some(Auth::Header { name, value }) = opts.auth {
            rb = rb.header(name, value);
        }

        tracing::debug!(
            method=%method,
            host_path=%host_path(url),
            query=?redacted_q,
            auth_kind,
            has_body,
            "http.request.start"
        );

        let t0 = std::time::Instant::now();
        let resp = rb.send().await.map_err(|err| {
            let message = err.to_string();
            tracing::warn!(host_path=%host_path(url), message=%message, "http.network_error.send");
            HttpError::Network(message)
        })?;

        let status = resp.status();
        let bytes = resp.bytes().await.map_err(|err| {
            let message = err.to_string();
            tracing::warn!(host_path=%host_path(url), message=%message, "http.network_error.body");
            HttpError::Network(message)
        })?;
        let dur_ms = t0.elapsed().as_millis() as u64;

        let snippet = snip_body(&bytes);
        tracing::debug!(
            %status,
            duration_ms = dur_ms,
            body_len = bytes.len(),
            "http.response"
        );
        tracing::trace!(body_snippet=%snippet, "http.response.body_snippet");

        if status.is_success() {
            return Ok(bytes.to_vec());
        }

        let message = extract_error_message(&bytes);
        tracing::warn!(
            %status,
            host_path=%host_path(url),
            message=%message,
            body_snippet=%snippet,
            "http.error"
        );
        Err(HttpError::Api { status, message })
    }
}

fn decode_json<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, HttpError> {
    let snippet = snip_body(bytes);
    serde_json::from_slice::<T>(bytes).map_err(|e| {
        tracing::warn!(
            serde_err=%e.to_string(),
            body_snippet=%snippet,
            "http.response.decode_error"
        );
        HttpError::Decode(e.to_string(), snippet)
    })
}

// ==============================
// Helpers
// ==============================

fn host_path(url: &Url) -> String {
    format!("{}{}", url.domain().unwrap_or("-"), url.path())
}

/// Best-effort extraction of a human-readable message from an error body.
fn extract_error_message(body: &[u8]) -> String {
    // Twitter: {"errors":[{"code":34,"message":"..."}]} (v2 uses detail/title)
    #[derive(Deserialize)]
    struct TwErrors {
        errors: Vec<TwErr>,
    }
    #[derive(Deserialize)]
    struct TwErr {
        #[serde(default)]
        message: String,
        #[serde(default)]
        detail: String,
        #[serde(default)]
        title: String,
    }

    // Generic: {"message":"..."} or {"detail":"..."} or {"error":"..."}
    #[derive(Deserialize)]
    struct Msg {
        #[serde(default)]
        message: String,
        #[serde(default)]
        detail: String,
        #[serde(default)]
        error: String,
    }

    if let Ok(tw) = serde_json::from_slice::<TwErrors>(body) {
        if let Some(first) = tw.errors.into_iter().next() {
            if !first.message.is_empty() {
                return first.message;
            }
            if !first.detail.is_empty() {
                return first.detail;
            }
            if !first.title.is_empty() {
                return first.title;
            }
        }
    }
    if let Ok(m) = serde_json::from_slice::<Msg>(body) {
        if !m.message.is_empty() {
            return m.message;
        }
        if !m.detail.is_empty() {
            return m.detail;
        }
        if !m.error.is_empty() {
            return m.error;
        }
    }
    snip_body(body)
}

fn snip_body(body: &[u8]) -> String {
    let mut snip = String::from_utf8_lossy(body).to_string();
    if snip.len() > 500 {
        snip.truncate(500);
        snip.push_str("...");
    }
    snip
}

fn redact_pairs(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .map(|(k, v)| {
            let is_secret = matches!(
                k.to_ascii_lowercase().as_str(),
                "access_token"
                    | "authorization"
                    | "auth"
                    | "key"
                    | "api_key"
                    | "token"
                    | "secret"
                    | "client_secret"
                    | "bearer"
            );
            (
                (*k).to_string(),
                if is_secret {
                    "<redacted>".to_string()
                } else {
                    (*v).to_string()
                },
            )
        })
        .collect()
}
