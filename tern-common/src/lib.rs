//! Shared helpers for the Tern workspace.
//!
//! Today this is only the [`observability`] module, which centralises
//! `tracing` initialisation so the binary and integration tests log into the
//! same rolling file sink. Domain errors live in the crates that raise them.
pub mod observability;
