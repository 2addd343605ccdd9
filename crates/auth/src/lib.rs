//! `pharmacore-auth` — pure authentication boundary (zero-trust).
//!
//! This crate is intentionally decoupled from HTTP and storage: it parses
//! bearer credentials and models verified identities. Resolving a token to an
//! identity is a store concern (`pharmacore-store`'s `SessionVerifier`).

pub mod bearer;
pub mod identity;

pub use bearer::{BearerToken, parse_bearer};
pub use identity::{UserId, UserIdentity, VerifyError};
