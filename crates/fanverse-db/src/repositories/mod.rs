//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in
//! fanverse-core. Each repository handles database operations for one
//! domain area; deletes that fan out to dependent rows go through
//! the cleanup routines inside a transaction.

mod cart;
mod cleanup;
mod comment;
mod community;
mod error;
mod like;
mod live;
mod media;
mod membership;
mod merchandise;
mod notice;
mod post;
mod product;
mod staff;
mod user;

pub use cart::PgCartRepository;
pub use comment::PgCommentRepository;
pub use community::{PgCommunityRepository, PgCommunityUserRepository};
pub use like::PgLikeRepository;
pub use live::PgLiveRepository;
pub use media::PgMediaRepository;
pub use membership::PgMembershipRepository;
pub use merchandise::PgMerchandiseRepository;
pub use notice::PgNoticeRepository;
pub use post::PgPostRepository;
pub use product::PgProductRepository;
pub use staff::PgStaffRepository;
pub use user::PgUserRepository;
