//! Session storage module.
//!
//! Redis-backed refresh sessions, one key per JWT session id plus a set of
//! session ids per user for logout-everywhere.

mod refresh_session;

pub use refresh_session::{RedisSessionStore, SessionRecord};
