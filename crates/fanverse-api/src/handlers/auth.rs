//! Authentication handlers
//!
//! Sign-up, sign-in, token refresh and logout.

use axum::extract::State;
use fanverse_service::dto::{
    AuthResponse, LogoutRequest, RefreshTokenRequest, SignInRequest, SignUpRequest,
};
use fanverse_service::AuthService;

use crate::extractors::{AuthUser, OptionalValidatedJson, ValidatedJson};
use crate::response::{ApiReply, Reply};
use crate::state::AppState;

/// POST /auth/sign-up
pub async fn sign_up(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<SignUpRequest>,
) -> ApiReply<AuthResponse> {
    let service = AuthService::new(state.service_context());
    Ok(Reply(service.sign_up(request).await?))
}

/// POST /auth/sign-in
pub async fn sign_in(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<SignInRequest>,
) -> ApiReply<AuthResponse> {
    let service = AuthService::new(state.service_context());
    Ok(Reply(service.sign_in(request).await?))
}

/// POST /auth/refresh
pub async fn refresh(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<RefreshTokenRequest>,
) -> ApiReply<AuthResponse> {
    let service = AuthService::new(state.service_context());
    Ok(Reply(service.refresh(request).await?))
}

/// POST /auth/logout
///
/// Without a body every session of the caller is revoked.
pub async fn logout(
    State(state): State<AppState>,
    auth: AuthUser,
    OptionalValidatedJson(request): OptionalValidatedJson<LogoutRequest>,
) -> ApiReply<()> {
    let service = AuthService::new(state.service_context());
    let response = service
        .logout(&auth.context, request.unwrap_or_default())
        .await?;
    Ok(Reply(response))
}
