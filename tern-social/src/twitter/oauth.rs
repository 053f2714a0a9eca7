//! OAuth 1.0a request signing (RFC 5849, HMAC-SHA1).
//!
//! Twitter's v1.1 REST endpoints authenticate every call with a signed
//! `Authorization: OAuth ...` header derived from the consumer key/secret and
//! access token/secret. The signature covers the HTTP method, the request URL
//! without query, and all query/form parameters plus the `oauth_*` protocol
//! parameters, percent-encoded and sorted.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use hmac::{Hmac, Mac};
use rand::distributions::Alphanumeric;
use rand::Rng;
use sha1::Sha1;
use std::borrow::Cow;
use std::time::{SystemTime, UNIX_EPOCH};
use url::Url;

type HmacSha1 = Hmac<Sha1>;

/// OAuth 1.0a credential set.
///
/// Values are taken as-is; nothing is validated locally (a malformed secret
/// surfaces as a 401 from the remote end).
#[derive(Debug, Clone)]
pub struct Credentials {
    pub consumer_key: String,
    pub consumer_secret: String,
    pub access_token: String,
    pub access_token_secret: String,
}

impl Credentials {
    pub fn new(
        consumer_key: impl Into<String>,
        consumer_secret: impl Into<String>,
        access_token: impl Into<String>,
        access_token_secret: impl Into<String>,
    ) -> Self {
        Self {
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
            access_token: access_token.into(),
            access_token_secret: access_token_secret.into(),
        }
    }
}

/// Build a signed `Authorization` header value for one request.
///
/// `params` must contain every query and form parameter the request will
/// carry; the URL itself must not carry a query string.
pub fn authorization_header(
    method: &str,
    url: &Url,
    params: &[(&str, &str)],
    creds: &Credentials,
) -> String {
    let nonce: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect();
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
        .to_string();
    header_with(method, url, params, creds, &nonce, &timestamp)
}

// Deterministic core, split out so tests can pin nonce and timestamp.
fn header_with(
    method: &str,
    url: &Url,
    params: &[(&str, &str)],
    creds: &Credentials,
    nonce: &str,
    timestamp: &str,
) -> String {
    let oauth_params = protocol_params(creds, nonce, timestamp);
    let signature = sign(method, url, params, &oauth_params, creds);

    let mut header_params: Vec<(&str, Cow<'_, str>)> = oauth_params
        .iter()
        .map(|(k, v)| (*k, Cow::Borrowed(*v)))
        .collect();
    header_params.push(("oauth_signature", Cow::Owned(signature)));
    header_params.sort_by(|a, b| a.0.cmp(b.0));

    let rendered: Vec<String> = header_params
        .iter()
        .map(|(k, v)| format!("{}=\"{}\"", enc(k), enc(v)))
        .collect();
    format!("OAuth {}", rendered.join(", "))
}

fn protocol_params<'a>(
    creds: &'a Credentials,
    nonce: &'a str,
    timestamp: &'a str,
) -> Vec<(&'a str, &'a str)> {
    vec![
        ("oauth_consumer_key", creds.consumer_key.as_str()),
        ("oauth_nonce", nonce),
        ("oauth_signature_method", "HMAC-SHA1"),
        ("oauth_timestamp", timestamp),
        ("oauth_token", creds.access_token.as_str()),
        ("oauth_version", "1.0"),
    ]
}

fn sign(
    method: &str,
    url: &Url,
    params: &[(&str, &str)],
    oauth_params: &[(&str, &str)],
    creds: &Credentials,
) -> String {
    let base = signature_base_string(method, url, params, oauth_params);
    let key = format!(
        "{}&{}",
        enc(&creds.consumer_secret),
        enc(&creds.access_token_secret)
    );

    let mut mac =
        HmacSha1::new_from_slice(key.as_bytes()).expect("HMAC accepts keys of any length");
    mac.update(base.as_bytes());
    BASE64.encode(mac.finalize().into_bytes())
}

fn signature_base_string(
    method: &str,
    url: &Url,
    params: &[(&str, &str)],
    oauth_params: &[(&str, &str)],
) -> String {
    // Encode first, then sort by encoded key (ties broken by value).
    let mut encoded: Vec<(String, String)> = params
        .iter()
        .chain(oauth_params.iter())
        .map(|(k, v)| (enc(k).into_owned(), enc(v).into_owned()))
        .collect();
    encoded.sort();

    let param_string = encoded
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");

    // The base URL excludes any query or fragment.
    let mut base_url = url.clone();
    base_url.set_query(None);
    base_url.set_fragment(None);

    format!(
        "{}&{}&{}",
        method.to_ascii_uppercase(),
        enc(base_url.as_str()),
        enc(&param_string)
    )
}

// RFC 3986 unreserved-only encoding, as OAuth requires.
fn enc(s: &str) -> Cow<'_, str> {
    urlencoding::encode(s)
}
