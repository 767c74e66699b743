//! # fanverse-service
//!
//! Application layer: one service per resource, community role resolution,
//! request/response DTOs and the response envelope.
//!
//! Every service receives the caller's [`AuthContext`](fanverse_core::AuthContext)
//! explicitly and returns an [`Envelope`](dto::Envelope) on success.

pub mod dto;
pub mod messages;
pub mod services;

pub use dto::Envelope;
pub use services::{
    AuthService, CartService, CommentService, CommunityService, LikeService, LiveService,
    MediaService, MembershipService, MerchandiseService, NoticeService, PostService,
    ProductService, RoleService, ServiceContext, ServiceContextBuilder, ServiceError,
    ServiceResult, StaffService, UserService, DEFAULT_MEMBERSHIP_DAYS,
};
