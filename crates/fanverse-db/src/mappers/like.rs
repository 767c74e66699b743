//! Like entity <-> model mapper

use fanverse_core::entities::{ItemType, Like};
use fanverse_core::value_objects::Snowflake;

use crate::models::LikeModel;

/// Decode the `item_type` column; the table constraint only admits the two
/// known values, anything else reads as a post
pub fn parse_item_type(value: &str) -> ItemType {
    value.parse().unwrap_or(ItemType::Post)
}

impl From<LikeModel> for Like {
    fn from(model: LikeModel) -> Self {
        Like {
            id: Snowflake::new(model.id),
            user_id: Snowflake::new(model.user_id),
            item_id: Snowflake::new(model.item_id),
            item_type: parse_item_type(&model.item_type),
            status: model.status,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
