//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::entities::ItemType;
use crate::validation::FieldErrors;
use crate::value_objects::Snowflake;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found: {0}")]
    UserNotFound(Snowflake),

    #[error("Community not found: {0}")]
    CommunityNotFound(Snowflake),

    #[error("Community user not found: {0}")]
    CommunityUserNotFound(Snowflake),

    #[error("Post not found: {0}")]
    PostNotFound(Snowflake),

    #[error("Comment not found: {0}")]
    CommentNotFound(Snowflake),

    #[error("{item_type} not found: {item_id}")]
    LikeTargetNotFound {
        item_type: ItemType,
        item_id: Snowflake,
    },

    #[error("Notice not found: {0}")]
    NoticeNotFound(Snowflake),

    #[error("Media not found: {0}")]
    MediaNotFound(Snowflake),

    #[error("Live not found: {0}")]
    LiveNotFound(Snowflake),

    #[error("Artist not found: {0}")]
    ArtistNotFound(Snowflake),

    #[error("Manager not found: {0}")]
    ManagerNotFound(Snowflake),

    #[error("Product category not found: {0}")]
    CategoryNotFound(Snowflake),

    #[error("Product not found: {0}")]
    ProductNotFound(Snowflake),

    #[error("Merchandise not found: {0}")]
    MerchandiseNotFound(Snowflake),

    #[error("Merchandise option not found: {0}")]
    MerchandiseOptionNotFound(Snowflake),

    #[error("Cart item not found: {0}")]
    CartItemNotFound(Snowflake),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid fields: {0}")]
    InvalidFields(FieldErrors),

    #[error("Content must not be empty")]
    EmptyContent,

    #[error("Password too weak: {0}")]
    WeakPassword(String),

    #[error("Insufficient stock for option {option_id}: {available} available")]
    InsufficientStock { option_id: Snowflake, available: i32 },

    #[error("Payment amount {paid} does not match membership price {expected}")]
    PaymentAmountMismatch { expected: i64, paid: i64 },

    #[error("Cart is empty")]
    EmptyCart,

    #[error("Price total exceeds the supported range")]
    PriceOverflow,

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Not a member of community {0}")]
    NotCommunityMember(Snowflake),

    #[error("Missing capability: {0}")]
    MissingCapability(String),

    #[error("Not the author of this item")]
    NotAuthor,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Email already in use")]
    EmailAlreadyExists,

    #[error("Already a member of this community")]
    AlreadyMember,

    #[error("Already an artist of this community")]
    AlreadyArtist,

    #[error("Already a manager of this community")]
    AlreadyManager,

    #[error("Payment already processed: {0}")]
    DuplicatePayment(String),

    #[error("Product category already exists: {0}")]
    CategoryExists(String),

    #[error("Live has already ended")]
    LiveAlreadyEnded,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Cache error: {0}")]
    CacheError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::CommunityNotFound(_) => "UNKNOWN_COMMUNITY",
            Self::CommunityUserNotFound(_) => "UNKNOWN_COMMUNITY_USER",
            Self::PostNotFound(_) => "UNKNOWN_POST",
            Self::CommentNotFound(_) => "UNKNOWN_COMMENT",
            Self::LikeTargetNotFound { .. } => "UNKNOWN_LIKE_TARGET",
            Self::NoticeNotFound(_) => "UNKNOWN_NOTICE",
            Self::MediaNotFound(_) => "UNKNOWN_MEDIA",
            Self::LiveNotFound(_) => "UNKNOWN_LIVE",
            Self::ArtistNotFound(_) => "UNKNOWN_ARTIST",
            Self::ManagerNotFound(_) => "UNKNOWN_MANAGER",
            Self::CategoryNotFound(_) => "UNKNOWN_CATEGORY",
            Self::ProductNotFound(_) => "UNKNOWN_PRODUCT",
            Self::MerchandiseNotFound(_) => "UNKNOWN_MERCHANDISE",
            Self::MerchandiseOptionNotFound(_) => "UNKNOWN_MERCHANDISE_OPTION",
            Self::CartItemNotFound(_) => "UNKNOWN_CART_ITEM",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidFields(_) => "INVALID_FIELDS",
            Self::EmptyContent => "EMPTY_CONTENT",
            Self::WeakPassword(_) => "WEAK_PASSWORD",
            Self::InsufficientStock { .. } => "INSUFFICIENT_STOCK",
            Self::PaymentAmountMismatch { .. } => "PAYMENT_AMOUNT_MISMATCH",
            Self::EmptyCart => "EMPTY_CART",
            Self::PriceOverflow => "PRICE_OVERFLOW",

            // Authorization
            Self::NotCommunityMember(_) => "NOT_COMMUNITY_MEMBER",
            Self::MissingCapability(_) => "MISSING_CAPABILITY",
            Self::NotAuthor => "NOT_AUTHOR",

            // Conflict
            Self::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",
            Self::AlreadyMember => "ALREADY_MEMBER",
            Self::AlreadyArtist => "ALREADY_ARTIST",
            Self::AlreadyManager => "ALREADY_MANAGER",
            Self::DuplicatePayment(_) => "DUPLICATE_PAYMENT",
            Self::CategoryExists(_) => "CATEGORY_EXISTS",
            Self::LiveAlreadyEnded => "LIVE_ALREADY_ENDED",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::CacheError(_) => "CACHE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_)
                | Self::CommunityNotFound(_)
                | Self::CommunityUserNotFound(_)
                | Self::PostNotFound(_)
                | Self::CommentNotFound(_)
                | Self::LikeTargetNotFound { .. }
                | Self::NoticeNotFound(_)
                | Self::MediaNotFound(_)
                | Self::LiveNotFound(_)
                | Self::ArtistNotFound(_)
                | Self::ManagerNotFound(_)
                | Self::CategoryNotFound(_)
                | Self::ProductNotFound(_)
                | Self::MerchandiseNotFound(_)
                | Self::MerchandiseOptionNotFound(_)
                | Self::CartItemNotFound(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_)
                | Self::InvalidFields(_)
                | Self::EmptyContent
                | Self::WeakPassword(_)
                | Self::InsufficientStock { .. }
                | Self::PaymentAmountMismatch { .. }
                | Self::EmptyCart
                | Self::PriceOverflow
        )
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(
            self,
            Self::NotCommunityMember(_) | Self::MissingCapability(_) | Self::NotAuthor
        )
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::EmailAlreadyExists
                | Self::AlreadyMember
                | Self::AlreadyArtist
                | Self::AlreadyManager
                | Self::DuplicatePayment(_)
                | Self::CategoryExists(_)
                | Self::LiveAlreadyEnded
        )
    }

    /// Structured field errors, when the failure carries them
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::InvalidFields(errors) => Some(errors),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(DomainError::PostNotFound(Snowflake::new(1)).code(), "UNKNOWN_POST");
        assert_eq!(
            DomainError::MissingCapability("MANAGE_CONTENT".into()).code(),
            "MISSING_CAPABILITY"
        );
    }

    #[test]
    fn test_classifiers() {
        assert!(DomainError::LikeTargetNotFound {
            item_type: ItemType::Comment,
            item_id: Snowflake::new(4),
        }
        .is_not_found());
        assert!(DomainError::NotCommunityMember(Snowflake::new(3)).is_authorization());
        assert!(DomainError::DuplicatePayment("order-1".into()).is_conflict());
        assert!(DomainError::EmptyCart.is_validation());
        assert!(!DomainError::DatabaseError("x".into()).is_validation());
    }

    #[test]
    fn test_error_display() {
        let err = DomainError::LikeTargetNotFound {
            item_type: ItemType::Post,
            item_id: Snowflake::new(9),
        };
        assert_eq!(err.to_string(), "POST not found: 9");

        let err = DomainError::PaymentAmountMismatch {
            expected: 5000,
            paid: 100,
        };
        assert_eq!(
            err.to_string(),
            "Payment amount 100 does not match membership price 5000"
        );
    }
}
