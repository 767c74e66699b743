//! Business logic services
//!
//! One service per resource. Each borrows the [`ServiceContext`], takes the
//! caller's [`AuthContext`](fanverse_core::AuthContext) where a caller
//! matters, and returns an [`Envelope`](crate::dto::Envelope).

pub mod auth;
pub mod cart;
pub mod comment;
pub mod community;
pub mod context;
pub mod error;
pub mod like;
pub mod live;
pub mod media;
pub mod membership;
pub mod merchandise;
pub mod notice;
pub mod post;
pub mod product;
pub mod role;
pub mod staff;
pub mod user;

#[cfg(test)]
mod mocks;

pub use auth::AuthService;
pub use cart::CartService;
pub use comment::CommentService;
pub use community::CommunityService;
pub use context::{ServiceContext, ServiceContextBuilder, DEFAULT_MEMBERSHIP_DAYS};
pub use error::{ServiceError, ServiceResult};
pub use like::LikeService;
pub use live::LiveService;
pub use media::MediaService;
pub use membership::MembershipService;
pub use merchandise::MerchandiseService;
pub use notice::NoticeService;
pub use post::PostService;
pub use product::ProductService;
pub use role::RoleService;
pub use staff::StaffService;
pub use user::UserService;
