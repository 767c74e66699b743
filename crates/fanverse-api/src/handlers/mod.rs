//! Route handlers
//!
//! All HTTP request handlers organized by domain.

pub mod admin;
pub mod auth;
pub mod cart;
pub mod comments;
pub mod communities;
pub mod health;
pub mod likes;
pub mod lives;
pub mod media;
pub mod memberships;
pub mod merchandise;
pub mod notices;
pub mod posts;
pub mod products;
pub mod users;
