//! Identity-subsystem access: resolve a bearer token to a verified identity.

use std::sync::Arc;

use async_trait::async_trait;

use pharmacore_auth::{BearerToken, UserIdentity, VerifyError};

mod in_memory;
mod postgres;

pub use in_memory::InMemorySessionVerifier;
pub use postgres::PostgresSessionVerifier;

/// Resolves a caller's bearer credential to a verified identity.
///
/// Implementations run at the caller's own privilege level. The elevated
/// store handle must never be used for verification.
#[async_trait]
pub trait SessionVerifier: Send + Sync {
    async fn verify(&self, token: &BearerToken) -> Result<UserIdentity, VerifyError>;
}

#[async_trait]
impl<S> SessionVerifier for Arc<S>
where
    S: SessionVerifier + ?Sized,
{
    async fn verify(&self, token: &BearerToken) -> Result<UserIdentity, VerifyError> {
        (**self).verify(token).await
    }
}
