//! Database models - SQLx-compatible structs for PostgreSQL tables

mod board;
mod community;
mod like;
mod membership;
mod post;
mod shop;
mod user;

pub use board::{LiveModel, MediaModel, NoticeModel};
pub use community::{CommunityModel, CommunityUserModel, StaffModel};
pub use like::{LikeCountModel, LikeModel};
pub use membership::MembershipModel;
pub use post::{CommentModel, PostImageModel, PostModel};
pub use shop::{
    CartItemModel, CartLineModel, CartModel, MerchandiseImageModel, MerchandiseOptionModel,
    MerchandisePostModel, ProductCategoryModel, ProductModel,
};
pub use user::UserModel;
