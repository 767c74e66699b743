//! # fanverse-core
//!
//! Domain layer containing entities, value objects, field rules and repository traits.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod validation;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    image_list_errors, Cart, CartItem, CartLine, Comment, Community, CommunityUser, ItemType,
    Like, Live, Media, MerchandiseImage, MerchandiseOption, MerchandisePost, Membership,
    MembershipStatus, Notice, Post, PostImage, Product, ProductCategory, StaffGrant, StaffKind,
    User, UserRole,
};
pub use error::DomainError;
pub use traits::{
    CartRepository, CommentRepository, CommunityRepository, CommunityUserRepository,
    LikeRepository, LiveRepository, MediaRepository, MembershipRepository, MerchandiseRepository,
    NoticeRepository, PostQuery, PostRepository, ProductRepository, RepoResult, SessionStore,
    StaffRepository, UserRepository,
};
pub use validation::{EntityRules, FieldError, FieldErrors};
pub use value_objects::{
    AuthContext, Capabilities, CommunityAccess, CommunityRole, Page, PageRequest, Snowflake,
    SnowflakeGenerator, SnowflakeParseError,
};
