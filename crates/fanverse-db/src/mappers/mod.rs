//! Entity <-> Model mappers
//!
//! `From<XModel> for X` conversions from database rows to domain entities.

mod board;
mod community;
mod like;
mod membership;
mod post;
mod shop;
mod user;

pub use like::parse_item_type;
