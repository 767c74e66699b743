//! Authentication service
//!
//! Handles sign-up, sign-in, refresh token rotation, logout, and resolving
//! a bearer token into an [`AuthContext`].

use fanverse_common::auth::{hash_password, validate_password_strength, verify_password, TokenPair};
use fanverse_common::AppError;
use fanverse_core::entities::User;
use fanverse_core::{AuthContext, Capabilities, DomainError, EntityRules, Snowflake};
use tracing::{info, instrument, warn};

use crate::dto::{
    AuthResponse, Envelope, LogoutRequest, RefreshTokenRequest, SignInRequest, SignUpRequest,
    UserResponse,
};
use crate::messages;

use super::context::ServiceContext;
use super::error::ServiceResult;

pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a new account and open its first session
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn sign_up(&self, request: SignUpRequest) -> ServiceResult<Envelope<AuthResponse>> {
        validate_password_strength(&request.password)?;

        let mut user = User::new(
            self.ctx.generate_id(),
            request.name.trim().to_string(),
            request.email,
        );
        user.profile_image = request.profile_image;
        user.check()?;

        // Tombstoned accounts keep their email
        if self.ctx.user_repo().find_by_email(&user.email).await?.is_some() {
            return Err(DomainError::EmailAlreadyExists.into());
        }

        let password_hash = hash_password(&request.password)?;
        self.ctx.user_repo().create(&user, &password_hash).await?;

        info!(user_id = %user.id, "User signed up");

        let tokens = self.start_session(user.id).await?;
        Ok(Envelope::created(
            messages::auth::SIGN_UP,
            auth_response(tokens, &user),
        ))
    }

    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn sign_in(&self, request: SignInRequest) -> ServiceResult<Envelope<AuthResponse>> {
        let email = request.email.trim().to_lowercase();

        let user = match self.ctx.user_repo().find_by_email(&email).await? {
            Some(user) if !user.is_deleted() => user,
            Some(user) => {
                warn!(user_id = %user.id, "Sign-in rejected: account deleted");
                return Err(AppError::InvalidCredentials.into());
            }
            None => {
                warn!("Sign-in rejected: unknown email");
                return Err(AppError::InvalidCredentials.into());
            }
        };

        let password_hash = self
            .ctx
            .user_repo()
            .get_password_hash(user.id)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        if !verify_password(&request.password, &password_hash)? {
            warn!(user_id = %user.id, "Sign-in rejected: wrong password");
            return Err(AppError::InvalidCredentials.into());
        }

        info!(user_id = %user.id, "User signed in");

        let tokens = self.start_session(user.id).await?;
        Ok(Envelope::ok(messages::auth::SIGN_IN, auth_response(tokens, &user)))
    }

    /// Exchange a refresh token for a new pair; the old session is revoked
    #[instrument(skip(self, request))]
    pub async fn refresh(
        &self,
        request: RefreshTokenRequest,
    ) -> ServiceResult<Envelope<AuthResponse>> {
        let claims = self
            .ctx
            .jwt_service()
            .validate_refresh_token(&request.refresh_token)?;
        let user_id = claims.user_id()?;
        let session_id = claims.session()?;

        let owner = self.ctx.session_store().find_user(session_id).await?;
        if owner != Some(user_id) {
            warn!(user_id = %user_id, "Refresh rejected: session revoked");
            return Err(AppError::SessionRevoked.into());
        }

        // A concurrent refresh of the same token loses here
        if !self.ctx.session_store().revoke(session_id).await? {
            return Err(AppError::SessionRevoked.into());
        }

        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .filter(|user| !user.is_deleted())
            .ok_or(AppError::InvalidToken)?;

        let tokens = self.start_session(user.id).await?;
        info!(user_id = %user.id, "Tokens refreshed");

        Ok(Envelope::ok(messages::auth::REFRESH, auth_response(tokens, &user)))
    }

    /// Revoke one session, or all of the caller's sessions without a token
    #[instrument(skip(self, auth, request), fields(user_id = %auth.user_id))]
    pub async fn logout(
        &self,
        auth: &AuthContext,
        request: LogoutRequest,
    ) -> ServiceResult<Envelope<()>> {
        match request.refresh_token {
            Some(token) => {
                let claims = self.ctx.jwt_service().validate_refresh_token(&token)?;
                if claims.user_id()? != auth.user_id {
                    return Err(AppError::InvalidToken.into());
                }
                self.ctx.session_store().revoke(claims.session()?).await?;
                info!("Session revoked");
            }
            None => {
                let revoked = self.ctx.session_store().revoke_all(auth.user_id).await?;
                info!(revoked, "All sessions revoked");
            }
        }

        Ok(Envelope::ok(messages::auth::LOGOUT, ()))
    }

    /// Validate an access token and load its user.
    ///
    /// Unknown and soft-deleted users are rejected as an invalid token.
    pub async fn authenticate(&self, token: &str) -> ServiceResult<(AuthContext, User)> {
        let claims = self.ctx.jwt_service().validate_access_token(token)?;
        let user_id = claims.user_id()?;

        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .filter(|user| !user.is_deleted())
            .ok_or(AppError::InvalidToken)?;

        let capabilities = if user.is_admin() {
            Capabilities::ADMINISTRATOR
        } else {
            Capabilities::empty()
        };

        Ok((AuthContext::new(user.id, capabilities), user))
    }

    async fn start_session(&self, user_id: Snowflake) -> ServiceResult<TokenPair> {
        let jwt = self.ctx.jwt_service();
        let issued = jwt.issue(user_id)?;
        let ttl = u64::try_from(jwt.refresh_token_expiry()).unwrap_or_default();

        self.ctx
            .session_store()
            .store(&issued.session_id, user_id, ttl)
            .await?;

        Ok(issued.tokens)
    }
}

fn auth_response(tokens: TokenPair, user: &User) -> AuthResponse {
    AuthResponse {
        access_token: tokens.access_token,
        refresh_token: tokens.refresh_token,
        token_type: tokens.token_type,
        expires_in: tokens.expires_in,
        user: UserResponse::from(user),
    }
}
