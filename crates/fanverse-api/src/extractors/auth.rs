//! Authentication extractor
//!
//! Validates the bearer token and loads the caller once per request.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use fanverse_core::{AuthContext, User};
use fanverse_service::AuthService;

use crate::response::ApiError;
use crate::state::AppState;

/// Authenticated caller.
///
/// Unknown and soft-deleted users are rejected with 401, so handlers never
/// see a tombstoned account.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub context: AuthContext,
    pub user: User,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::MissingAuth)?;

        let app_state = AppState::from_ref(state);
        let (context, user) = AuthService::new(app_state.service_context())
            .authenticate(bearer.token())
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "Rejected access token");
                ApiError::from(e)
            })?;

        Ok(Self { context, user })
    }
}
