//! Social network clients used by Tern.
//!
//! Only the Twitter/X surface is implemented: the seven write operations the
//! command bridge needs, signed with OAuth 1.0a. The [`twitter::SocialApi`]
//! trait is the seam callers mock in tests.
pub mod twitter;

pub use twitter::{Credentials, SocialApi, SocialError, TwitterApi};
