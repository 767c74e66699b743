//! # fanverse-cache
//!
//! Redis layer for refresh sessions.
//!
//! - **Connection Pool**: managed Redis connections with deadpool
//! - **Session Storage**: the `SessionStore` implementation backing token
//!   rotation and logout
//!
//! ## Example
//!
//! ```ignore
//! use fanverse_cache::{RedisPool, RedisPoolConfig, RedisSessionStore};
//! use fanverse_core::SessionStore;
//!
//! let pool = RedisPool::new(RedisPoolConfig::default())?;
//! let sessions = RedisSessionStore::new(pool);
//!
//! sessions.store("3f1c...", user_id, 604_800).await?;
//! assert_eq!(sessions.find_user("3f1c...").await?, Some(user_id));
//! ```

pub mod pool;
pub mod session;

pub use pool::{RedisPool, RedisPoolConfig, RedisPoolError, RedisResult};
pub use session::{RedisSessionStore, SessionRecord};
