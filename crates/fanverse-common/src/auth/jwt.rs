//! JWT issuing and validation
//!
//! Every token pair shares a session id. The refresh half is only honoured
//! while that session is present in the session store, so logout and
//! rotation revoke it server-side.

use chrono::{Duration, Utc};
use fanverse_core::Snowflake;
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenType {
    Access,
    Refresh,
}

/// JWT claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
    pub token_type: TokenType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

impl Claims {
    pub fn user_id(&self) -> Result<Snowflake, AppError> {
        Snowflake::parse(&self.sub).map_err(|_| AppError::InvalidToken)
    }

    /// Session id, required on refresh tokens
    pub fn session(&self) -> Result<&str, AppError> {
        self.session_id.as_deref().ok_or(AppError::InvalidToken)
    }
}

/// Tokens handed to the client
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    /// Access token lifetime in seconds
    pub expires_in: i64,
}

/// A freshly issued pair together with its session id
#[derive(Debug, Clone)]
pub struct IssuedTokens {
    pub session_id: String,
    pub tokens: TokenPair,
}

#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_token_expiry: i64,
    refresh_token_expiry: i64,
}

impl JwtService {
    #[must_use]
    pub fn new(secret: &str, access_token_expiry: i64, refresh_token_expiry: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            access_token_expiry,
            refresh_token_expiry,
        }
    }

    /// Refresh token lifetime in seconds, used as the session TTL
    pub fn refresh_token_expiry(&self) -> i64 {
        self.refresh_token_expiry
    }

    /// Issue a pair under a new random session id
    pub fn issue(&self, user_id: Snowflake) -> Result<IssuedTokens, AppError> {
        let session_id = uuid::Uuid::new_v4().to_string();
        let tokens = TokenPair {
            access_token: self.encode_token(user_id, TokenType::Access, &session_id)?,
            refresh_token: self.encode_token(user_id, TokenType::Refresh, &session_id)?,
            token_type: "Bearer".to_string(),
            expires_in: self.access_token_expiry,
        };
        Ok(IssuedTokens { session_id, tokens })
    }

    fn encode_token(
        &self,
        user_id: Snowflake,
        token_type: TokenType,
        session_id: &str,
    ) -> Result<String, AppError> {
        let now = Utc::now();
        let lifetime = match token_type {
            TokenType::Access => self.access_token_expiry,
            TokenType::Refresh => self.refresh_token_expiry,
        };
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(lifetime)).timestamp(),
            token_type,
            session_id: Some(session_id.to_string()),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(anyhow::anyhow!("failed to encode JWT: {e}")))
    }

    /// Decode and verify signature and expiry
    pub fn decode_token(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AppError::TokenExpired,
                _ => AppError::InvalidToken,
            })
    }

    pub fn validate_access_token(&self, token: &str) -> Result<Claims, AppError> {
        self.decode_expecting(token, TokenType::Access)
    }

    pub fn validate_refresh_token(&self, token: &str) -> Result<Claims, AppError> {
        self.decode_expecting(token, TokenType::Refresh)
    }

    fn decode_expecting(&self, token: &str, expected: TokenType) -> Result<Claims, AppError> {
        let claims = self.decode_token(token)?;
        if claims.token_type == expected {
            Ok(claims)
        } else {
            Err(AppError::InvalidToken)
        }
    }
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("access_token_expiry", &self.access_token_expiry)
            .field("refresh_token_expiry", &self.refresh_token_expiry)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> JwtService {
        JwtService::new("test-secret-key-that-is-long-enough", 900, 604_800)
    }

    #[test]
    fn test_issue_shares_session_id() {
        let issued = service().issue(Snowflake::new(7)).unwrap();
        let jwt = service();

        let access = jwt.validate_access_token(&issued.tokens.access_token).unwrap();
        let refresh = jwt.validate_refresh_token(&issued.tokens.refresh_token).unwrap();

        assert_eq!(access.user_id().unwrap(), Snowflake::new(7));
        assert_eq!(access.session().unwrap(), issued.session_id);
        assert_eq!(refresh.session().unwrap(), issued.session_id);
        assert_eq!(issued.tokens.expires_in, 900);
    }

    #[test]
    fn test_token_types_not_interchangeable() {
        let jwt = service();
        let issued = jwt.issue(Snowflake::new(7)).unwrap();
        assert!(matches!(
            jwt.validate_access_token(&issued.tokens.refresh_token),
            Err(AppError::InvalidToken)
        ));
        assert!(jwt.validate_refresh_token(&issued.tokens.access_token).is_err());
    }

    #[test]
    fn test_each_issue_gets_new_session() {
        let jwt = service();
        let a = jwt.issue(Snowflake::new(7)).unwrap();
        let b = jwt.issue(Snowflake::new(7)).unwrap();
        assert_ne!(a.session_id, b.session_id);
    }

    #[test]
    fn test_expired_token() {
        let jwt = JwtService::new("test-secret-key-that-is-long-enough", -120, -120);
        let issued = jwt.issue(Snowflake::new(7)).unwrap();
        assert!(matches!(
            jwt.validate_access_token(&issued.tokens.access_token),
            Err(AppError::TokenExpired)
        ));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let issued = service().issue(Snowflake::new(7)).unwrap();
        let other = JwtService::new("another-secret-key-entirely-different", 900, 900);
        assert!(matches!(
            other.decode_token(&issued.tokens.access_token),
            Err(AppError::InvalidToken)
        ));
    }

    #[test]
    fn test_token_pair_is_camel_case() {
        let issued = service().issue(Snowflake::new(7)).unwrap();
        let json = serde_json::to_value(&issued.tokens).unwrap();
        assert!(json.get("accessToken").is_some());
        assert_eq!(json["tokenType"], "Bearer");
    }
}
