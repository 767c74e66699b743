//! Membership entity <-> model mapper

use fanverse_core::entities::{Membership, MembershipStatus};
use fanverse_core::value_objects::Snowflake;

use crate::models::MembershipModel;

impl From<MembershipModel> for Membership {
    fn from(model: MembershipModel) -> Self {
        Membership {
            id: Snowflake::new(model.id),
            community_user_id: Snowflake::new(model.community_user_id),
            community_id: Snowflake::new(model.community_id),
            price: model.price,
            status: MembershipStatus::parse(&model.status),
            merchant_uid: model.merchant_uid,
            imp_uid: model.imp_uid,
            paid_at: model.paid_at,
            expires_at: model.expires_at,
        }
    }
}
