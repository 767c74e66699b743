//! # fanverse-client
//!
//! Typed client for the Fanverse REST API. Holds the caller's token pair,
//! attaches the bearer token to every request and transparently refreshes
//! an expired access token once before giving up.

pub mod client;
pub mod error;
pub mod models;

pub use client::ApiClient;
pub use error::{ClientError, ClientResult};
pub use models::{
    AuthPayload, Envelope, Like, NewNotice, NewPost, Notice, Post, PostQuery, PostUpdate, SignIn,
    SignUp, Tokens, UserSummary,
};
