//! Membership service
//!
//! Confirms paid memberships from the payment gateway callback the client
//! forwards. The gateway itself is not contacted.

use chrono::Utc;
use fanverse_core::entities::Membership;
use fanverse_core::{AuthContext, DomainError, Snowflake};
use tracing::{info, instrument, warn};

use crate::dto::{Envelope, MembershipPaymentRequest, MembershipResponse};
use crate::messages;

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::role::RoleService;

pub struct MembershipService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MembershipService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Checks run in order: membership, community, amount, merchant uid
    #[instrument(
        skip(self, auth, request),
        fields(user_id = %auth.user_id, merchant_uid = %request.merchant_uid)
    )]
    pub async fn payment(
        &self,
        auth: &AuthContext,
        request: MembershipPaymentRequest,
    ) -> ServiceResult<Envelope<MembershipResponse>> {
        let roles = RoleService::new(self.ctx);
        let access = roles.resolve(auth, request.community_id).await?;
        let member = access.member()?;
        let community = roles.community(request.community_id).await?;

        if request.amount != community.membership_price {
            warn!(
                expected = community.membership_price,
                paid = request.amount,
                "Payment rejected: amount mismatch"
            );
            return Err(DomainError::PaymentAmountMismatch {
                expected: community.membership_price,
                paid: request.amount,
            }
            .into());
        }

        if self
            .ctx
            .membership_repo()
            .find_by_merchant_uid(&request.merchant_uid)
            .await?
            .is_some()
        {
            return Err(DomainError::DuplicatePayment(request.merchant_uid).into());
        }

        let membership = Membership::activate(
            self.ctx.generate_id(),
            member.id,
            community.id,
            community.membership_price,
            request.merchant_uid,
            request.imp_uid,
            self.ctx.membership_duration(),
        );
        self.ctx.membership_repo().create(&membership).await?;

        info!(
            membership_id = %membership.id,
            expires_at = %membership.expires_at,
            "Membership activated"
        );

        Ok(Envelope::created(
            messages::membership::PAYMENT,
            MembershipResponse::at(membership, Utc::now()),
        ))
    }

    /// The caller's memberships in one community, newest first
    pub async fn find_all(
        &self,
        auth: &AuthContext,
        community_id: Snowflake,
    ) -> ServiceResult<Envelope<Vec<MembershipResponse>>> {
        let access = RoleService::new(self.ctx).resolve(auth, community_id).await?;
        let member = access.member()?;

        let now = Utc::now();
        let memberships = self
            .ctx
            .membership_repo()
            .find_by_community_user(member.id)
            .await?
            .into_iter()
            .map(|m| MembershipResponse::at(m, now))
            .collect();

        Ok(Envelope::ok(messages::membership::FIND_ALL, memberships))
    }
}
