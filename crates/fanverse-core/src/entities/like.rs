//! Like entity - a user's reaction state on a post or comment

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::value_objects::Snowflake;

/// Kind of item a like points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ItemType {
    Post,
    Comment,
}

impl ItemType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Post => "POST",
            Self::Comment => "COMMENT",
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("post") {
            Ok(Self::Post)
        } else if s.eq_ignore_ascii_case("comment") {
            Ok(Self::Comment)
        } else {
            Err(format!("unknown item type: {s}"))
        }
    }
}

/// Unique per `(user_id, item_id, item_type)`. Unliking keeps the row with
/// `status = false`, so counts must filter on status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Like {
    pub id: Snowflake,
    pub user_id: Snowflake,
    pub item_id: Snowflake,
    pub item_type: ItemType,
    pub status: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Like {
    pub fn new(
        id: Snowflake,
        user_id: Snowflake,
        item_id: Snowflake,
        item_type: ItemType,
        status: bool,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            user_id,
            item_id,
            item_type,
            status,
            created_at: now,
            updated_at: now,
        }
    }

    /// Natural key of the like
    pub fn key(&self) -> (Snowflake, Snowflake, ItemType) {
        (self.user_id, self.item_id, self.item_type)
    }
}
