//! Value objects - immutable types that represent domain concepts

mod access;
mod capabilities;
mod page;
mod snowflake;

pub use access::{AuthContext, CommunityAccess, CommunityRole};
pub use capabilities::Capabilities;
pub use page::{Page, PageRequest};
pub use snowflake::{Snowflake, SnowflakeGenerator, SnowflakeParseError};
