//! Ports implemented by the infrastructure crates

mod repositories;
mod sessions;

pub use repositories::{
    CartRepository, CommentRepository, CommunityRepository, CommunityUserRepository,
    LikeRepository, LiveRepository, MediaRepository, MembershipRepository, MerchandiseRepository,
    NoticeRepository, PostQuery, PostRepository, ProductRepository, RepoResult, StaffRepository,
    UserRepository,
};
pub use sessions::SessionStore;
