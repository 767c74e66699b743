//! Axum extractors for request handling
//!
//! Custom extractors for authentication, validated bodies, query strings and
//! path ids. Every rejection is an [`ApiError`](crate::response::ApiError).

mod auth;
mod path;
mod query;
mod validated;

pub use auth::AuthUser;
pub use path::{IdPath, LikePath};
pub use query::QueryParams;
pub use validated::{OptionalValidatedJson, ValidatedJson};
