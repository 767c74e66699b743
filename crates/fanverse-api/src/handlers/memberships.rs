//! Membership handlers

use axum::extract::State;
use fanverse_service::dto::{CommunityIdQuery, MembershipPaymentRequest, MembershipResponse};
use fanverse_service::MembershipService;

use crate::extractors::{AuthUser, QueryParams, ValidatedJson};
use crate::response::{ApiReply, Reply};
use crate::state::AppState;

/// POST /membership/payment
pub async fn payment(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<MembershipPaymentRequest>,
) -> ApiReply<MembershipResponse> {
    let service = MembershipService::new(state.service_context());
    Ok(Reply(service.payment(&auth.context, request).await?))
}

/// GET /membership?communityId
pub async fn find_all(
    State(state): State<AppState>,
    auth: AuthUser,
    QueryParams(query): QueryParams<CommunityIdQuery>,
) -> ApiReply<Vec<MembershipResponse>> {
    let service = MembershipService::new(state.service_context());
    Ok(Reply(service.find_all(&auth.context, query.community_id).await?))
}
