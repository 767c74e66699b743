//! Refresh session storage in Redis.
//!
//! `session:{id}` holds the owner of a live refresh session and expires with
//! the refresh token. `user_sessions:{user_id}` indexes the ids of one user.

use async_trait::async_trait;
use fanverse_core::{RepoResult, SessionStore, Snowflake};
use redis::AsyncCommands;
use serde::{Deserialize, Serialize};

use crate::pool::{RedisPool, RedisPoolError};

const SESSION_PREFIX: &str = "session:";
const USER_SESSIONS_PREFIX: &str = "user_sessions:";

/// Stored session data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub user_id: Snowflake,
    /// Unix epoch seconds
    pub created_at: i64,
}

impl SessionRecord {
    #[must_use]
    pub fn new(user_id: Snowflake) -> Self {
        Self {
            user_id,
            created_at: chrono::Utc::now().timestamp(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct RedisSessionStore {
    pool: RedisPool,
}

impl RedisSessionStore {
    #[must_use]
    pub fn new(pool: RedisPool) -> Self {
        Self { pool }
    }

    fn key(session_id: &str) -> String {
        format!("{SESSION_PREFIX}{session_id}")
    }

    fn user_key(user_id: Snowflake) -> String {
        format!("{USER_SESSIONS_PREFIX}{user_id}")
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn store(&self, session_id: &str, user_id: Snowflake, ttl_secs: u64) -> RepoResult<()> {
        self.pool
            .set(&Self::key(session_id), &SessionRecord::new(user_id), Some(ttl_secs))
            .await?;

        // The index lives as long as the newest session in it
        let user_key = Self::user_key(user_id);
        let ttl = i64::try_from(ttl_secs).unwrap_or(i64::MAX);
        let mut conn = self.pool.get().await?;
        conn.sadd::<_, _, ()>(&user_key, session_id)
            .await
            .map_err(RedisPoolError::from)?;
        conn.expire::<_, ()>(&user_key, ttl)
            .await
            .map_err(RedisPoolError::from)?;

        tracing::debug!(session_id = %session_id, user_id = %user_id, "Stored refresh session");
        Ok(())
    }

    async fn find_user(&self, session_id: &str) -> RepoResult<Option<Snowflake>> {
        let record: Option<SessionRecord> = self.pool.get_value(&Self::key(session_id)).await?;
        Ok(record.map(|r| r.user_id))
    }

    async fn revoke(&self, session_id: &str) -> RepoResult<bool> {
        if let Some(user_id) = self.find_user(session_id).await? {
            let mut conn = self.pool.get().await?;
            conn.srem::<_, _, ()>(Self::user_key(user_id), session_id)
                .await
                .map_err(RedisPoolError::from)?;
        }

        let deleted = self.pool.delete(&Self::key(session_id)).await?;
        if deleted {
            tracing::debug!(session_id = %session_id, "Revoked refresh session");
        }
        Ok(deleted)
    }

    async fn revoke_all(&self, user_id: Snowflake) -> RepoResult<u64> {
        let user_key = Self::user_key(user_id);
        let mut conn = self.pool.get().await?;

        let session_ids: Vec<String> = conn
            .smembers(&user_key)
            .await
            .map_err(RedisPoolError::from)?;
        let keys: Vec<String> = session_ids.iter().map(|id| Self::key(id)).collect();
        let count = self.pool.delete_many(&keys).await?;

        conn.del::<_, ()>(&user_key)
            .await
            .map_err(RedisPoolError::from)?;

        tracing::info!(user_id = %user_id, count, "Revoked all refresh sessions");
        Ok(count)
    }
}
