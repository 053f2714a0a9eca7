//! Status-id extraction from user-supplied text.

use std::num::ParseIntError;

/// Pull the trailing numeric status id out of a URL or bare id.
///
/// Splits on `/` and parses the final segment as a base-10 64-bit integer,
/// which covers both `https://x.com/alice/status/12345` and a bare `12345`.
/// Anything else (including a URL with a query string) is a parse error.
pub fn status_id(raw: &str) -> Result<i64, ParseIntError> {
    let last = raw.rsplit('/').next().unwrap_or(raw);
    last.parse::<i64>()
}
