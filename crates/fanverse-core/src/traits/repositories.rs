//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer states what it needs; `fanverse-db` provides the
//! PostgreSQL implementation. Every multi-row write named here (a post with
//! its images, a listing with its options, a checkout, a cascade delete) is
//! expected to commit atomically.

use async_trait::async_trait;

use crate::entities::{
    Cart, CartItem, CartLine, Comment, Community, CommunityUser, ItemType, Like, Live, Media,
    MerchandiseImage, MerchandiseOption, MerchandisePost, Membership, Notice, Post, PostImage,
    Product, ProductCategory, StaffGrant, StaffKind, User,
};
use crate::error::DomainError;
use crate::value_objects::{Page, PageRequest, Snowflake};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID, including tombstoned accounts
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>>;

    /// Find user by (normalized) email
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;

    /// Create a new user; a taken email fails with `EmailAlreadyExists`
    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()>;

    async fn update(&self, user: &User) -> RepoResult<()>;

    /// Tombstone the account
    async fn soft_delete(&self, id: Snowflake) -> RepoResult<()>;

    /// Get password hash for authentication
    async fn get_password_hash(&self, id: Snowflake) -> RepoResult<Option<String>>;
}

// ============================================================================
// Community Repositories
// ============================================================================

#[async_trait]
pub trait CommunityRepository: Send + Sync {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Community>>;

    /// All communities ordered by name
    async fn find_all(&self) -> RepoResult<Vec<Community>>;

    async fn find_by_ids(&self, ids: &[Snowflake]) -> RepoResult<Vec<Community>>;

    async fn create(&self, community: &Community) -> RepoResult<()>;

    async fn update(&self, community: &Community) -> RepoResult<()>;

    /// Delete the community and every row that depends on it
    async fn delete(&self, id: Snowflake) -> RepoResult<()>;
}

#[async_trait]
pub trait CommunityUserRepository: Send + Sync {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<CommunityUser>>;

    async fn find_by_user_and_community(
        &self,
        user_id: Snowflake,
        community_id: Snowflake,
    ) -> RepoResult<Option<CommunityUser>>;

    /// Every community membership of a user
    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Vec<CommunityUser>>;

    /// Join a community; joining twice fails with `AlreadyMember`
    async fn create(&self, community_user: &CommunityUser) -> RepoResult<()>;

    /// Remove a membership row and everything authored through it
    async fn delete(&self, id: Snowflake) -> RepoResult<()>;
}

#[async_trait]
pub trait StaffRepository: Send + Sync {
    async fn find_by_id(&self, kind: StaffKind, id: Snowflake) -> RepoResult<Option<StaffGrant>>;

    /// Artist and manager grants held by one community user
    async fn find_for_member(
        &self,
        community_user_id: Snowflake,
        community_id: Snowflake,
    ) -> RepoResult<Vec<StaffGrant>>;

    async fn find_by_community(&self, community_id: Snowflake) -> RepoResult<Vec<StaffGrant>>;

    /// Grant a role; duplicates fail with `AlreadyArtist` / `AlreadyManager`
    async fn create(&self, grant: &StaffGrant) -> RepoResult<()>;

    async fn delete(&self, kind: StaffKind, id: Snowflake) -> RepoResult<()>;
}

// ============================================================================
// Post, Comment and Like Repositories
// ============================================================================

/// Filter for post listings
#[derive(Debug, Clone, Copy)]
pub struct PostQuery {
    pub community_id: Snowflake,
    pub artist_id: Option<Snowflake>,
    pub page: PageRequest,
}

#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Post>>;

    /// Newest first, with the unpaged total
    async fn find_page(&self, query: PostQuery) -> RepoResult<Page<Post>>;

    /// Images of one post, in display order
    async fn find_images(&self, post_id: Snowflake) -> RepoResult<Vec<PostImage>>;

    /// Images of many posts, in display order
    async fn find_images_for(&self, post_ids: &[Snowflake]) -> RepoResult<Vec<PostImage>>;

    /// Insert the post and its images in one transaction
    async fn create(&self, post: &Post, images: &[PostImage]) -> RepoResult<()>;

    /// Update the post; `Some(images)` replaces every image row in the same
    /// transaction, `None` leaves them untouched
    async fn update(&self, post: &Post, images: Option<&[PostImage]>) -> RepoResult<()>;

    /// Delete the post with its images, comments and likes
    async fn delete(&self, id: Snowflake) -> RepoResult<()>;
}

#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Comment>>;

    async fn find_by_post(&self, post_id: Snowflake, page: PageRequest)
        -> RepoResult<Page<Comment>>;

    async fn create(&self, comment: &Comment) -> RepoResult<()>;

    async fn update(&self, comment: &Comment) -> RepoResult<()>;

    /// Delete the comment with its likes
    async fn delete(&self, id: Snowflake) -> RepoResult<()>;
}

#[async_trait]
pub trait LikeRepository: Send + Sync {
    /// Create the like or overwrite the status of the existing row for the
    /// same `(user, item, type)`; returns the stored row
    async fn upsert(&self, like: &Like) -> RepoResult<Like>;

    async fn find(
        &self,
        user_id: Snowflake,
        item_id: Snowflake,
        item_type: ItemType,
    ) -> RepoResult<Option<Like>>;

    /// Number of rows with `status = true`
    async fn count_active(&self, item_id: Snowflake, item_type: ItemType) -> RepoResult<i64>;

    /// Active like counts for many items; items without likes are omitted
    async fn count_active_for(
        &self,
        item_ids: &[Snowflake],
        item_type: ItemType,
    ) -> RepoResult<Vec<(Snowflake, i64)>>;
}

// ============================================================================
// Notice, Media and Live Repositories
// ============================================================================

#[async_trait]
pub trait NoticeRepository: Send + Sync {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Notice>>;

    async fn find_by_community(
        &self,
        community_id: Snowflake,
        page: PageRequest,
    ) -> RepoResult<Page<Notice>>;

    async fn create(&self, notice: &Notice) -> RepoResult<()>;

    /// Update fields and replace the image list
    async fn update(&self, notice: &Notice) -> RepoResult<()>;

    async fn delete(&self, id: Snowflake) -> RepoResult<()>;
}

#[async_trait]
pub trait MediaRepository: Send + Sync {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Media>>;

    async fn find_by_community(
        &self,
        community_id: Snowflake,
        page: PageRequest,
    ) -> RepoResult<Page<Media>>;

    async fn create(&self, media: &Media) -> RepoResult<()>;

    /// Update fields and replace the file list
    async fn update(&self, media: &Media) -> RepoResult<()>;

    async fn delete(&self, id: Snowflake) -> RepoResult<()>;
}

#[async_trait]
pub trait LiveRepository: Send + Sync {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Live>>;

    /// Currently-live first, then newest
    async fn find_by_community(
        &self,
        community_id: Snowflake,
        page: PageRequest,
    ) -> RepoResult<Page<Live>>;

    async fn create(&self, live: &Live) -> RepoResult<()>;

    /// Mark the live as ended; fails with `LiveAlreadyEnded` if it was
    async fn end(&self, id: Snowflake, ended_at: chrono::DateTime<chrono::Utc>)
        -> RepoResult<()>;
}

// ============================================================================
// Membership Repository
// ============================================================================

#[async_trait]
pub trait MembershipRepository: Send + Sync {
    /// Store a confirmed payment; a reused merchant uid fails with
    /// `DuplicatePayment`
    async fn create(&self, membership: &Membership) -> RepoResult<()>;

    async fn find_by_merchant_uid(&self, merchant_uid: &str) -> RepoResult<Option<Membership>>;

    /// Newest first
    async fn find_by_community_user(
        &self,
        community_user_id: Snowflake,
    ) -> RepoResult<Vec<Membership>>;
}

// ============================================================================
// Storefront Repositories
// ============================================================================

#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Unique name; duplicates fail with `CategoryExists`
    async fn create_category(&self, category: &ProductCategory) -> RepoResult<()>;

    async fn find_category(&self, id: Snowflake) -> RepoResult<Option<ProductCategory>>;

    async fn find_categories(&self) -> RepoResult<Vec<ProductCategory>>;

    async fn create(&self, product: &Product) -> RepoResult<()>;

    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Product>>;

    async fn find_by_community(&self, community_id: Snowflake) -> RepoResult<Vec<Product>>;
}

#[async_trait]
pub trait MerchandiseRepository: Send + Sync {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<MerchandisePost>>;

    async fn find_page(
        &self,
        community_id: Snowflake,
        page: PageRequest,
    ) -> RepoResult<Page<MerchandisePost>>;

    async fn find_options(&self, merchandise_post_id: Snowflake)
        -> RepoResult<Vec<MerchandiseOption>>;

    async fn find_images(&self, merchandise_post_id: Snowflake)
        -> RepoResult<Vec<MerchandiseImage>>;

    async fn find_option(&self, option_id: Snowflake) -> RepoResult<Option<MerchandiseOption>>;

    /// Insert the listing with its options and images in one transaction
    async fn create(
        &self,
        post: &MerchandisePost,
        options: &[MerchandiseOption],
        images: &[MerchandiseImage],
    ) -> RepoResult<()>;

    async fn update(&self, post: &MerchandisePost) -> RepoResult<()>;

    /// Delete the listing with its options, images and referencing cart items
    async fn delete(&self, id: Snowflake) -> RepoResult<()>;
}

#[async_trait]
pub trait CartRepository: Send + Sync {
    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Option<Cart>>;

    /// Create the user's cart, or return the existing one
    async fn get_or_create(&self, cart: &Cart) -> RepoResult<Cart>;

    async fn find_item(&self, id: Snowflake) -> RepoResult<Option<CartItem>>;

    async fn find_item_by_option(
        &self,
        cart_id: Snowflake,
        merchandise_option_id: Snowflake,
    ) -> RepoResult<Option<CartItem>>;

    async fn add_item(&self, item: &CartItem) -> RepoResult<()>;

    async fn set_quantity(&self, item_id: Snowflake, quantity: i32) -> RepoResult<()>;

    async fn remove_item(&self, item_id: Snowflake) -> RepoResult<()>;

    /// Items joined with listing title, option name, price and stock
    async fn find_lines(&self, cart_id: Snowflake) -> RepoResult<Vec<CartLine>>;

    /// In one transaction: lock every option in the cart, fail with
    /// `InsufficientStock` if any is short, decrement stock and empty the
    /// cart. Returns the purchased lines.
    async fn checkout(&self, cart_id: Snowflake) -> RepoResult<Vec<CartLine>>;
}
