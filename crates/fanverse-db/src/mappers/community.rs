//! Community entity <-> model mappers

use fanverse_core::entities::{Community, CommunityUser, StaffGrant, StaffKind};
use fanverse_core::value_objects::Snowflake;

use crate::models::{CommunityModel, CommunityUserModel, StaffModel};

impl From<CommunityModel> for Community {
    fn from(model: CommunityModel) -> Self {
        Community {
            id: Snowflake::new(model.id),
            name: model.name,
            membership_price: model.membership_price,
            logo_image: model.logo_image,
            cover_image: model.cover_image,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<CommunityUserModel> for CommunityUser {
    fn from(model: CommunityUserModel) -> Self {
        CommunityUser {
            id: Snowflake::new(model.id),
            user_id: Snowflake::new(model.user_id),
            community_id: Snowflake::new(model.community_id),
            nickname: model.nickname,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<StaffModel> for StaffGrant {
    fn from(model: StaffModel) -> Self {
        let kind = if model.kind == StaffKind::Manager.as_str() {
            StaffKind::Manager
        } else {
            StaffKind::Artist
        };
        StaffGrant {
            id: Snowflake::new(model.id),
            kind,
            community_user_id: Snowflake::new(model.community_user_id),
            community_id: Snowflake::new(model.community_id),
            created_at: model.created_at,
        }
    }
}
