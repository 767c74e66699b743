//! Path parameter extractors
//!
//! Snowflake ids arrive as decimal strings; item types are matched
//! case-insensitively.

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use fanverse_core::{ItemType, Snowflake};
use serde::Deserialize;

use crate::response::ApiError;

/// Single `:id` path segment
#[derive(Debug, Clone, Copy)]
pub struct IdPath(pub Snowflake);

#[async_trait]
impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_path(e.body_text()))?;
        let id = raw
            .parse()
            .map_err(|_| ApiError::invalid_path(format!("Invalid id: {raw}")))?;
        Ok(Self(id))
    }
}

#[derive(Debug, Deserialize)]
struct RawLikePath {
    item_type: String,
    item_id: String,
}

/// `/like/:item_type/:item_id`
#[derive(Debug, Clone, Copy)]
pub struct LikePath {
    pub item_type: ItemType,
    pub item_id: Snowflake,
}

impl TryFrom<RawLikePath> for LikePath {
    type Error = ApiError;

    fn try_from(raw: RawLikePath) -> Result<Self, Self::Error> {
        let item_type = raw.item_type.parse().map_err(ApiError::invalid_path)?;
        let item_id = raw
            .item_id
            .parse()
            .map_err(|_| ApiError::invalid_path(format!("Invalid item id: {}", raw.item_id)))?;
        Ok(Self { item_type, item_id })
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for LikePath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<RawLikePath>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_path(e.body_text()))?;
        Self::try_from(raw)
    }
}
