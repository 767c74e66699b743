//! Refresh-session storage port

use async_trait::async_trait;

use super::RepoResult;
use crate::value_objects::Snowflake;

/// Server-side record of issued refresh tokens, keyed by the JWT session id.
///
/// A refresh token is only honoured while its session exists, which is what
/// makes logout and rotation effective.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn store(&self, session_id: &str, user_id: Snowflake, ttl_secs: u64) -> RepoResult<()>;

    /// Owner of a live session
    async fn find_user(&self, session_id: &str) -> RepoResult<Option<Snowflake>>;

    /// Returns false if the session did not exist
    async fn revoke(&self, session_id: &str) -> RepoResult<bool>;

    /// Revoke every session of a user, returning how many were removed
    async fn revoke_all(&self, user_id: Snowflake) -> RepoResult<u64>;
}
