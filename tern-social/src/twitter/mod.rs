//! Twitter/X REST v1.1 integration surface.
//!
//! Submodules provide OAuth 1.0a request signing, the HTTP client wrapper,
//! the status-id extraction helper, and typed response models.
pub mod client;
pub mod extract;
pub mod oauth;
pub mod types;

pub use client::{SocialApi, SocialError, TwitterApi};
pub use oauth::Credentials;
