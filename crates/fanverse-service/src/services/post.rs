//! Post service
//!
//! Posts belong to a community and are written through the author's
//! community user. Artist posts carry the artist id.

use std::collections::HashMap;

use fanverse_core::entities::{image_list_errors, ItemType, Post, PostImage};
use fanverse_core::{
    AuthContext, Capabilities, DomainError, EntityRules, Page, PostQuery, Snowflake,
};
use tracing::{info, instrument, warn};

use crate::dto::{
    CreatePostRequest, Envelope, PostListQuery, PostResponse, PostWithDetails, UpdatePostRequest,
};
use crate::messages;

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::role::RoleService;

pub struct PostService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PostService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a post with its images in one write.
    ///
    /// Only members may post; an admin must join first.
    #[instrument(
        skip(self, auth, request),
        fields(user_id = %auth.user_id, community_id = %request.community_id)
    )]
    pub async fn create(
        &self,
        auth: &AuthContext,
        request: CreatePostRequest,
    ) -> ServiceResult<Envelope<PostResponse>> {
        let access = RoleService::new(self.ctx)
            .resolve(auth, request.community_id)
            .await?;
        let member = access.member()?;

        image_list_errors(&request.images).into_result()?;

        let post = Post::new(
            self.ctx.generate_id(),
            request.community_id,
            member.id,
            access.artist_id,
            request.content,
        );
        post.check()?;

        let images = self.build_images(post.id, &request.images);
        self.ctx.post_repo().create(&post, &images).await?;

        info!(post_id = %post.id, images = images.len(), "Post created");

        Ok(Envelope::created(
            messages::post::CREATE,
            PostWithDetails {
                post,
                images: request.images,
                like_count: 0,
            }
            .into(),
        ))
    }

    /// Newest first, optionally limited to one artist
    #[instrument(skip(self))]
    pub async fn find_posts(
        &self,
        query: PostListQuery,
    ) -> ServiceResult<Envelope<Page<PostResponse>>> {
        let page = self
            .ctx
            .post_repo()
            .find_page(PostQuery {
                community_id: query.community_id,
                artist_id: query.artist_id,
                page: query.page_request(),
            })
            .await?;

        let ids: Vec<_> = page.items.iter().map(|p| p.id).collect();

        let mut images: HashMap<Snowflake, Vec<String>> = HashMap::new();
        for image in self.ctx.post_repo().find_images_for(&ids).await? {
            images.entry(image.post_id).or_default().push(image.url);
        }
        let likes: HashMap<_, _> = self
            .ctx
            .like_repo()
            .count_active_for(&ids, ItemType::Post)
            .await?
            .into_iter()
            .collect();

        let message = if query.artist_id.is_some() {
            messages::post::FIND_ARTIST_POSTS
        } else {
            messages::post::FIND_POSTS
        };

        Ok(Envelope::ok(
            message,
            page.map(|post| {
                PostWithDetails {
                    images: images.remove(&post.id).unwrap_or_default(),
                    like_count: likes.get(&post.id).copied().unwrap_or(0),
                    post,
                }
                .into()
            }),
        ))
    }

    pub async fn find_one(&self, id: Snowflake) -> ServiceResult<Envelope<PostResponse>> {
        let post = self.load(id).await?;
        let response = self.details(post, None).await?;
        Ok(Envelope::ok(messages::post::FIND_ONE, response))
    }

    /// Author only. A missing or empty image list keeps the stored images;
    /// a non-empty one replaces them all.
    #[instrument(skip(self, auth, request), fields(user_id = %auth.user_id))]
    pub async fn update(
        &self,
        auth: &AuthContext,
        id: Snowflake,
        request: UpdatePostRequest,
    ) -> ServiceResult<Envelope<PostResponse>> {
        let mut post = self.load(id).await?;

        let access = RoleService::new(self.ctx)
            .resolve(auth, post.community_id)
            .await?;
        let member = access.member()?;
        if member.id != post.community_user_id {
            warn!(post_id = %id, "Post update rejected: not the author");
            return Err(DomainError::NotAuthor.into());
        }

        if request.content.trim().is_empty() {
            return Err(DomainError::EmptyContent.into());
        }
        post.edit(request.content);
        post.check()?;

        let new_urls = request.images.filter(|urls| !urls.is_empty());
        let new_images = match &new_urls {
            Some(urls) => {
                image_list_errors(urls).into_result()?;
                Some(self.build_images(post.id, urls))
            }
            None => None,
        };

        self.ctx
            .post_repo()
            .update(&post, new_images.as_deref())
            .await?;

        info!(post_id = %id, images_replaced = new_images.is_some(), "Post updated");

        let response = self.details(post, new_urls).await?;
        Ok(Envelope::ok(messages::post::UPDATE, response))
    }

    /// Allowed for the author, a manager of the community, or an admin
    #[instrument(skip(self, auth), fields(user_id = %auth.user_id))]
    pub async fn remove(&self, auth: &AuthContext, id: Snowflake) -> ServiceResult<Envelope<()>> {
        let post = self.load(id).await?;

        let access = RoleService::new(self.ctx)
            .resolve(auth, post.community_id)
            .await?;
        if !access.is_self(post.community_user_id) {
            access.require(Capabilities::MANAGE_CONTENT)?;
        }

        self.ctx.post_repo().delete(id).await?;
        info!(post_id = %id, "Post deleted");

        Ok(Envelope::ok(messages::post::REMOVE, ()))
    }

    async fn load(&self, id: Snowflake) -> ServiceResult<Post> {
        let post = self
            .ctx
            .post_repo()
            .find_by_id(id)
            .await?
            .ok_or(DomainError::PostNotFound(id))?;
        Ok(post)
    }

    async fn details(
        &self,
        post: Post,
        images: Option<Vec<String>>,
    ) -> ServiceResult<PostResponse> {
        let images = match images {
            Some(urls) => urls,
            None => self
                .ctx
                .post_repo()
                .find_images(post.id)
                .await?
                .into_iter()
                .map(|image| image.url)
                .collect(),
        };
        let like_count = self
            .ctx
            .like_repo()
            .count_active(post.id, ItemType::Post)
            .await?;

        Ok(PostWithDetails {
            post,
            images,
            like_count,
        }
        .into())
    }

    fn build_images(&self, post_id: Snowflake, urls: &[String]) -> Vec<PostImage> {
        urls.iter()
            .zip(0..)
            .map(|(url, position)| {
                PostImage::new(self.ctx.generate_id(), post_id, url.clone(), position)
            })
            .collect()
    }
}
