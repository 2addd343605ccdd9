//! Postgres-backed session verifier.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use pharmacore_auth::{BearerToken, UserId, UserIdentity, VerifyError};

use super::SessionVerifier;

/// Session verifier backed by the identity subsystem's session table.
///
/// Constructed from the application pool (caller-level credentials), never
/// from the elevated service pool.
#[derive(Debug, Clone)]
pub struct PostgresSessionVerifier {
    pool: PgPool,
}

impl PostgresSessionVerifier {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionVerifier for PostgresSessionVerifier {
    async fn verify(&self, token: &BearerToken) -> Result<UserIdentity, VerifyError> {
        let row = sqlx::query(
            r#"
            SELECT user_id, email
            FROM auth_sessions
            WHERE token = $1 AND expires_at > NOW()
            "#,
        )
        .bind(token.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| VerifyError::Lookup(e.to_string()))?;

        let Some(row) = row else {
            return Err(VerifyError::Rejected);
        };

        let user_id = row
            .try_get::<uuid::Uuid, _>("user_id")
            .map_err(|e| VerifyError::Lookup(e.to_string()))?;
        let email = row
            .try_get::<Option<String>, _>("email")
            .map_err(|e| VerifyError::Lookup(e.to_string()))?;

        Ok(UserIdentity {
            user_id: UserId::from_uuid(user_id),
            email,
        })
    }
}
