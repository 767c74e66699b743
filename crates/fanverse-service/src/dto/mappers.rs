//! Entity → response DTO conversions

use fanverse_core::entities::{
    CartLine, Comment, Community, CommunityUser, Like, Live, Media, MerchandiseImage,
    MerchandiseOption, MerchandisePost, Membership, Notice, Post, Product, ProductCategory,
    StaffGrant, User,
};
use fanverse_core::{DomainError, MembershipStatus};

use super::responses::{
    CartLineResponse, CategoryResponse, CommentResponse, CommunityResponse,
    CommunityUserResponse, LikeResponse, LiveResponse, MediaResponse, MembershipResponse,
    MerchandiseOptionResponse, MerchandiseResponse, NoticeResponse, PostResponse,
    ProductResponse, StaffResponse, UserResponse,
};

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            profile_image: user.profile_image.clone(),
            role: user.role.as_str(),
            created_at: user.created_at,
        }
    }
}

impl From<&Community> for CommunityResponse {
    fn from(community: &Community) -> Self {
        Self {
            id: community.id,
            community_name: community.name.clone(),
            membership_price: community.membership_price,
            community_logo_image: community.logo_image.clone(),
            community_cover_image: community.cover_image.clone(),
            created_at: community.created_at,
        }
    }
}

impl From<&CommunityUser> for CommunityUserResponse {
    fn from(cu: &CommunityUser) -> Self {
        Self {
            id: cu.id,
            user_id: cu.user_id,
            community_id: cu.community_id,
            nick_name: cu.nickname.clone(),
            created_at: cu.created_at,
        }
    }
}

impl From<&StaffGrant> for StaffResponse {
    fn from(grant: &StaffGrant) -> Self {
        Self {
            id: grant.id,
            kind: grant.kind.as_str(),
            community_user_id: grant.community_user_id,
            community_id: grant.community_id,
            created_at: grant.created_at,
        }
    }
}

/// Post with the data stored beside it
pub struct PostWithDetails {
    pub post: Post,
    pub images: Vec<String>,
    pub like_count: i64,
}

impl From<PostWithDetails> for PostResponse {
    fn from(details: PostWithDetails) -> Self {
        let post = details.post;
        Self {
            id: post.id,
            community_id: post.community_id,
            community_user_id: post.community_user_id,
            artist_id: post.artist_id,
            content: post.content,
            images: details.images,
            like_count: details.like_count,
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

impl CommentResponse {
    pub fn new(comment: Comment, like_count: i64) -> Self {
        Self {
            id: comment.id,
            post_id: comment.post_id,
            community_id: comment.community_id,
            community_user_id: comment.community_user_id,
            content: comment.content,
            like_count,
            created_at: comment.created_at,
            updated_at: comment.updated_at,
        }
    }
}

impl From<Like> for LikeResponse {
    fn from(like: Like) -> Self {
        Self {
            id: like.id,
            user_id: like.user_id,
            item_id: like.item_id,
            item_type: like.item_type,
            status: like.status,
            updated_at: like.updated_at,
        }
    }
}

impl From<Notice> for NoticeResponse {
    fn from(notice: Notice) -> Self {
        Self {
            id: notice.id,
            community_id: notice.community_id,
            author_id: notice.author_id,
            title: notice.title,
            content: notice.content,
            notice_images: notice.images,
            created_at: notice.created_at,
            updated_at: notice.updated_at,
        }
    }
}

impl From<Media> for MediaResponse {
    fn from(media: Media) -> Self {
        Self {
            id: media.id,
            community_id: media.community_id,
            author_id: media.author_id,
            title: media.title,
            content: media.content,
            thumbnail_image: media.thumbnail_image,
            media_files: media.files,
            created_at: media.created_at,
            updated_at: media.updated_at,
        }
    }
}

impl From<Live> for LiveResponse {
    fn from(live: Live) -> Self {
        Self {
            is_live: live.is_live(),
            id: live.id,
            community_id: live.community_id,
            artist_id: live.artist_id,
            title: live.title,
            thumbnail_image: live.thumbnail_image,
            stream_url: live.stream_url,
            started_at: live.started_at,
            ended_at: live.ended_at,
        }
    }
}

impl MembershipResponse {
    /// Status is evaluated at `now`, so lapsed rows read as expired
    pub fn at(membership: Membership, now: chrono::DateTime<chrono::Utc>) -> Self {
        let status: MembershipStatus = membership.status_at(now);
        Self {
            id: membership.id,
            community_user_id: membership.community_user_id,
            community_id: membership.community_id,
            price: membership.price,
            status,
            merchant_uid: membership.merchant_uid,
            imp_uid: membership.imp_uid,
            paid_at: membership.paid_at,
            expires_at: membership.expires_at,
        }
    }
}

impl From<ProductCategory> for CategoryResponse {
    fn from(category: ProductCategory) -> Self {
        Self {
            id: category.id,
            name: category.name,
            created_at: category.created_at,
        }
    }
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            community_id: product.community_id,
            category_id: product.category_id,
            name: product.name,
            created_at: product.created_at,
        }
    }
}

impl From<MerchandiseOption> for MerchandiseOptionResponse {
    fn from(option: MerchandiseOption) -> Self {
        Self {
            id: option.id,
            name: option.name,
            price: option.price,
            stock: option.stock,
        }
    }
}

impl MerchandiseResponse {
    pub fn new(
        post: MerchandisePost,
        options: Vec<MerchandiseOption>,
        images: Vec<MerchandiseImage>,
    ) -> Self {
        Self {
            id: post.id,
            product_id: post.product_id,
            community_id: post.community_id,
            title: post.title,
            content: post.content,
            price: post.price,
            delivery_price: post.delivery_price,
            options: options.into_iter().map(Into::into).collect(),
            images: images.into_iter().map(|i| i.url).collect(),
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

impl From<MerchandisePost> for MerchandiseResponse {
    fn from(post: MerchandisePost) -> Self {
        Self::new(post, Vec::new(), Vec::new())
    }
}

impl TryFrom<&CartLine> for CartLineResponse {
    type Error = DomainError;

    fn try_from(line: &CartLine) -> Result<Self, Self::Error> {
        Ok(Self {
            id: line.item.id,
            merchandise_post_id: line.item.merchandise_post_id,
            merchandise_option_id: line.item.merchandise_option_id,
            merchandise_title: line.merchandise_title.clone(),
            option_name: line.option_name.clone(),
            unit_price: line.unit_price,
            quantity: line.item.quantity,
            line_total: line.line_total()?,
        })
    }
}
