//! Admin handlers
//!
//! Artist and manager grants. The service rejects non-admin callers.

use axum::extract::State;
use fanverse_core::{Snowflake, StaffKind};
use fanverse_service::dto::{GrantStaffRequest, StaffResponse};
use fanverse_service::StaffService;

use crate::extractors::{AuthUser, IdPath, ValidatedJson};
use crate::response::{ApiReply, Reply};
use crate::state::AppState;

async fn grant(
    state: &AppState,
    auth: &AuthUser,
    kind: StaffKind,
    request: GrantStaffRequest,
) -> ApiReply<StaffResponse> {
    let service = StaffService::new(state.service_context());
    Ok(Reply(service.grant(&auth.context, kind, request).await?))
}

async fn revoke(
    state: &AppState,
    auth: &AuthUser,
    kind: StaffKind,
    id: Snowflake,
) -> ApiReply<()> {
    let service = StaffService::new(state.service_context());
    Ok(Reply(service.revoke(&auth.context, kind, id).await?))
}

/// POST /admin/artist
pub async fn grant_artist(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<GrantStaffRequest>,
) -> ApiReply<StaffResponse> {
    grant(&state, &auth, StaffKind::Artist, request).await
}

/// DELETE /admin/artist/:id
pub async fn revoke_artist(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath,
) -> ApiReply<()> {
    revoke(&state, &auth, StaffKind::Artist, id).await
}

/// POST /admin/manager
pub async fn grant_manager(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<GrantStaffRequest>,
) -> ApiReply<StaffResponse> {
    grant(&state, &auth, StaffKind::Manager, request).await
}

/// DELETE /admin/manager/:id
pub async fn revoke_manager(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath,
) -> ApiReply<()> {
    revoke(&state, &auth, StaffKind::Manager, id).await
}

/// GET /admin/community/:id/staff
pub async fn community_staff(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(community_id): IdPath,
) -> ApiReply<Vec<StaffResponse>> {
    let service = StaffService::new(state.service_context());
    Ok(Reply(service.find_staff(&auth.context, community_id).await?))
}
