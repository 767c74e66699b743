//! Service context - dependency container for services
//!
//! Holds every repository, the refresh-session store, the JWT service and
//! the id generator. Services borrow it for the duration of one call.

use std::sync::Arc;

use chrono::Duration;
use fanverse_cache::{RedisPool, RedisSessionStore};
use fanverse_common::auth::JwtService;
use fanverse_core::traits::{
    CartRepository, CommentRepository, CommunityRepository, CommunityUserRepository,
    LikeRepository, LiveRepository, MediaRepository, MembershipRepository, MerchandiseRepository,
    NoticeRepository, PostRepository, ProductRepository, SessionStore, StaffRepository,
    UserRepository,
};
use fanverse_core::{Snowflake, SnowflakeGenerator};
use fanverse_db::{
    PgCartRepository, PgCommentRepository, PgCommunityRepository, PgCommunityUserRepository,
    PgLikeRepository, PgLiveRepository, PgMediaRepository, PgMembershipRepository,
    PgMerchandiseRepository, PgNoticeRepository, PgPool, PgPostRepository, PgProductRepository,
    PgStaffRepository, PgUserRepository,
};

use super::error::{ServiceError, ServiceResult};

/// Length of a paid membership period unless configured otherwise
pub const DEFAULT_MEMBERSHIP_DAYS: i64 = 365;

#[derive(Clone)]
pub struct ServiceContext {
    user_repo: Arc<dyn UserRepository>,
    community_repo: Arc<dyn CommunityRepository>,
    community_user_repo: Arc<dyn CommunityUserRepository>,
    staff_repo: Arc<dyn StaffRepository>,
    post_repo: Arc<dyn PostRepository>,
    comment_repo: Arc<dyn CommentRepository>,
    like_repo: Arc<dyn LikeRepository>,
    notice_repo: Arc<dyn NoticeRepository>,
    media_repo: Arc<dyn MediaRepository>,
    live_repo: Arc<dyn LiveRepository>,
    membership_repo: Arc<dyn MembershipRepository>,
    product_repo: Arc<dyn ProductRepository>,
    merchandise_repo: Arc<dyn MerchandiseRepository>,
    cart_repo: Arc<dyn CartRepository>,

    session_store: Arc<dyn SessionStore>,

    jwt_service: Arc<JwtService>,
    snowflake_generator: Arc<SnowflakeGenerator>,
    membership_duration: Duration,
}

impl ServiceContext {
    /// Wire every port to its PostgreSQL or Redis implementation
    pub fn postgres(
        pool: PgPool,
        redis_pool: RedisPool,
        jwt_service: Arc<JwtService>,
        snowflake_generator: Arc<SnowflakeGenerator>,
        membership_days: i64,
    ) -> Self {
        Self {
            user_repo: Arc::new(PgUserRepository::new(pool.clone())),
            community_repo: Arc::new(PgCommunityRepository::new(pool.clone())),
            community_user_repo: Arc::new(PgCommunityUserRepository::new(pool.clone())),
            staff_repo: Arc::new(PgStaffRepository::new(pool.clone())),
            post_repo: Arc::new(PgPostRepository::new(pool.clone())),
            comment_repo: Arc::new(PgCommentRepository::new(pool.clone())),
            like_repo: Arc::new(PgLikeRepository::new(pool.clone())),
            notice_repo: Arc::new(PgNoticeRepository::new(pool.clone())),
            media_repo: Arc::new(PgMediaRepository::new(pool.clone())),
            live_repo: Arc::new(PgLiveRepository::new(pool.clone())),
            membership_repo: Arc::new(PgMembershipRepository::new(pool.clone())),
            product_repo: Arc::new(PgProductRepository::new(pool.clone())),
            merchandise_repo: Arc::new(PgMerchandiseRepository::new(pool.clone())),
            cart_repo: Arc::new(PgCartRepository::new(pool)),
            session_store: Arc::new(RedisSessionStore::new(redis_pool)),
            jwt_service,
            snowflake_generator,
            membership_duration: Duration::days(membership_days),
        }
    }

    // === Repositories ===

    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    pub fn community_repo(&self) -> &dyn CommunityRepository {
        self.community_repo.as_ref()
    }

    pub fn community_user_repo(&self) -> &dyn CommunityUserRepository {
        self.community_user_repo.as_ref()
    }

    /// Artist and manager grants
    pub fn staff_repo(&self) -> &dyn StaffRepository {
        self.staff_repo.as_ref()
    }

    pub fn post_repo(&self) -> &dyn PostRepository {
        self.post_repo.as_ref()
    }

    pub fn comment_repo(&self) -> &dyn CommentRepository {
        self.comment_repo.as_ref()
    }

    pub fn like_repo(&self) -> &dyn LikeRepository {
        self.like_repo.as_ref()
    }

    pub fn notice_repo(&self) -> &dyn NoticeRepository {
        self.notice_repo.as_ref()
    }

    pub fn media_repo(&self) -> &dyn MediaRepository {
        self.media_repo.as_ref()
    }

    pub fn live_repo(&self) -> &dyn LiveRepository {
        self.live_repo.as_ref()
    }

    pub fn membership_repo(&self) -> &dyn MembershipRepository {
        self.membership_repo.as_ref()
    }

    pub fn product_repo(&self) -> &dyn ProductRepository {
        self.product_repo.as_ref()
    }

    pub fn merchandise_repo(&self) -> &dyn MerchandiseRepository {
        self.merchandise_repo.as_ref()
    }

    pub fn cart_repo(&self) -> &dyn CartRepository {
        self.cart_repo.as_ref()
    }

    // === Sessions and auth ===

    pub fn session_store(&self) -> &dyn SessionStore {
        self.session_store.as_ref()
    }

    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }

    // === Ids and settings ===

    pub fn generate_id(&self) -> Snowflake {
        self.snowflake_generator.generate()
    }

    pub fn membership_duration(&self) -> Duration {
        self.membership_duration
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("jwt_service", &self.jwt_service)
            .field("membership_duration", &self.membership_duration)
            .finish_non_exhaustive()
    }
}

/// Builder for a context with hand-picked implementations
#[derive(Default)]
pub struct ServiceContextBuilder {
    user_repo: Option<Arc<dyn UserRepository>>,
    community_repo: Option<Arc<dyn CommunityRepository>>,
    community_user_repo: Option<Arc<dyn CommunityUserRepository>>,
    staff_repo: Option<Arc<dyn StaffRepository>>,
    post_repo: Option<Arc<dyn PostRepository>>,
    comment_repo: Option<Arc<dyn CommentRepository>>,
    like_repo: Option<Arc<dyn LikeRepository>>,
    notice_repo: Option<Arc<dyn NoticeRepository>>,
    media_repo: Option<Arc<dyn MediaRepository>>,
    live_repo: Option<Arc<dyn LiveRepository>>,
    membership_repo: Option<Arc<dyn MembershipRepository>>,
    product_repo: Option<Arc<dyn ProductRepository>>,
    merchandise_repo: Option<Arc<dyn MerchandiseRepository>>,
    cart_repo: Option<Arc<dyn CartRepository>>,
    session_store: Option<Arc<dyn SessionStore>>,
    jwt_service: Option<Arc<JwtService>>,
    snowflake_generator: Option<Arc<SnowflakeGenerator>>,
    membership_duration: Option<Duration>,
}

macro_rules! setter {
    ($name:ident, $ty:ty) => {
        pub fn $name(mut self, value: $ty) -> Self {
            self.$name = Some(value);
            self
        }
    };
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    setter!(user_repo, Arc<dyn UserRepository>);
    setter!(community_repo, Arc<dyn CommunityRepository>);
    setter!(community_user_repo, Arc<dyn CommunityUserRepository>);
    setter!(staff_repo, Arc<dyn StaffRepository>);
    setter!(post_repo, Arc<dyn PostRepository>);
    setter!(comment_repo, Arc<dyn CommentRepository>);
    setter!(like_repo, Arc<dyn LikeRepository>);
    setter!(notice_repo, Arc<dyn NoticeRepository>);
    setter!(media_repo, Arc<dyn MediaRepository>);
    setter!(live_repo, Arc<dyn LiveRepository>);
    setter!(membership_repo, Arc<dyn MembershipRepository>);
    setter!(product_repo, Arc<dyn ProductRepository>);
    setter!(merchandise_repo, Arc<dyn MerchandiseRepository>);
    setter!(cart_repo, Arc<dyn CartRepository>);
    setter!(session_store, Arc<dyn SessionStore>);
    setter!(jwt_service, Arc<JwtService>);
    setter!(snowflake_generator, Arc<SnowflakeGenerator>);
    setter!(membership_duration, Duration);

    /// Fails with `ServiceError::Internal` naming the first missing dependency
    pub fn build(self) -> ServiceResult<ServiceContext> {
        fn required<T>(value: Option<T>, name: &str) -> ServiceResult<T> {
            value.ok_or_else(|| ServiceError::internal(format!("{name} is required")))
        }

        Ok(ServiceContext {
            user_repo: required(self.user_repo, "user_repo")?,
            community_repo: required(self.community_repo, "community_repo")?,
            community_user_repo: required(self.community_user_repo, "community_user_repo")?,
            staff_repo: required(self.staff_repo, "staff_repo")?,
            post_repo: required(self.post_repo, "post_repo")?,
            comment_repo: required(self.comment_repo, "comment_repo")?,
            like_repo: required(self.like_repo, "like_repo")?,
            notice_repo: required(self.notice_repo, "notice_repo")?,
            media_repo: required(self.media_repo, "media_repo")?,
            live_repo: required(self.live_repo, "live_repo")?,
            membership_repo: required(self.membership_repo, "membership_repo")?,
            product_repo: required(self.product_repo, "product_repo")?,
            merchandise_repo: required(self.merchandise_repo, "merchandise_repo")?,
            cart_repo: required(self.cart_repo, "cart_repo")?,
            session_store: required(self.session_store, "session_store")?,
            jwt_service: required(self.jwt_service, "jwt_service")?,
            snowflake_generator: required(self.snowflake_generator, "snowflake_generator")?,
            membership_duration: self
                .membership_duration
                .unwrap_or_else(|| Duration::days(DEFAULT_MEMBERSHIP_DAYS)),
        })
    }
}
