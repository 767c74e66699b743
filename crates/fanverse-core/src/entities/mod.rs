//! Domain entities - core business objects

mod board;
mod community;
mod like;
mod membership;
mod post;
mod shop;
mod user;

pub use board::{Live, Media, Notice};
pub use community::{Community, CommunityUser, StaffGrant, StaffKind};
pub use like::{ItemType, Like};
pub use membership::{Membership, MembershipStatus};
pub use post::{image_list_errors, Comment, Post, PostImage};
pub use shop::{
    cart_total, Cart, CartItem, CartLine, MerchandiseImage, MerchandiseOption, MerchandisePost, Product,
    ProductCategory,
};
pub use user::{User, UserRole};
