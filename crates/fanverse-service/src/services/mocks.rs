//! In-memory implementations of every repository port and the session
//! store, for service tests.
//!
//! All ports share one [`MockStore`] so cascades and joins across tables
//! behave like the PostgreSQL implementation.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use fanverse_common::auth::JwtService;
use fanverse_core::entities::{
    Cart, CartItem, CartLine, Comment, Community, CommunityUser, ItemType, Like, Live, Media,
    MerchandiseImage, MerchandiseOption, MerchandisePost, Membership, Notice, Post, PostImage,
    Product, ProductCategory, StaffGrant, StaffKind, User,
};
use fanverse_core::traits::*;
use fanverse_core::{DomainError, Page, PageRequest, Snowflake, SnowflakeGenerator};

use super::context::{ServiceContext, ServiceContextBuilder};

#[derive(Default)]
pub struct Tables {
    pub users: HashMap<Snowflake, (User, String)>,
    pub communities: HashMap<Snowflake, Community>,
    pub community_users: HashMap<Snowflake, CommunityUser>,
    pub staff: Vec<StaffGrant>,
    pub posts: HashMap<Snowflake, Post>,
    pub post_images: Vec<PostImage>,
    pub comments: HashMap<Snowflake, Comment>,
    pub likes: Vec<Like>,
    pub notices: HashMap<Snowflake, Notice>,
    pub media: HashMap<Snowflake, Media>,
    pub lives: HashMap<Snowflake, Live>,
    pub memberships: Vec<Membership>,
    pub categories: Vec<ProductCategory>,
    pub products: HashMap<Snowflake, Product>,
    pub merchandise: HashMap<Snowflake, MerchandisePost>,
    pub options: HashMap<Snowflake, MerchandiseOption>,
    pub merchandise_images: Vec<MerchandiseImage>,
    pub carts: HashMap<Snowflake, Cart>,
    pub cart_items: HashMap<Snowflake, CartItem>,
    pub sessions: HashMap<String, Snowflake>,
}

impl Tables {
    fn drop_post(&mut self, id: Snowflake) {
        let comment_ids: Vec<_> = self
            .comments
            .values()
            .filter(|c| c.post_id == id)
            .map(|c| c.id)
            .collect();
        self.likes.retain(|l| {
            !(l.item_type == ItemType::Post && l.item_id == id
                || l.item_type == ItemType::Comment && comment_ids.contains(&l.item_id))
        });
        self.comments.retain(|_, c| c.post_id != id);
        self.post_images.retain(|i| i.post_id != id);
        self.posts.remove(&id);
    }

    fn drop_comment(&mut self, id: Snowflake) {
        self.likes
            .retain(|l| !(l.item_type == ItemType::Comment && l.item_id == id));
        self.comments.remove(&id);
    }

    fn drop_merchandise(&mut self, id: Snowflake) {
        self.cart_items.retain(|_, i| i.merchandise_post_id != id);
        self.merchandise_images.retain(|i| i.merchandise_post_id != id);
        self.options.retain(|_, o| o.merchandise_post_id != id);
        self.merchandise.remove(&id);
    }

    fn lines(&self, cart_id: Snowflake) -> Vec<CartLine> {
        let mut lines: Vec<_> = self
            .cart_items
            .values()
            .filter(|i| i.cart_id == cart_id)
            .filter_map(|item| {
                let post = self.merchandise.get(&item.merchandise_post_id)?;
                let option = self.options.get(&item.merchandise_option_id)?;
                Some(CartLine {
                    item: item.clone(),
                    merchandise_title: post.title.clone(),
                    option_name: option.name.clone(),
                    unit_price: option.price,
                    stock: option.stock,
                })
            })
            .collect();
        lines.sort_by_key(|l| l.item.id);
        lines
    }
}

fn paginate<T>(items: Vec<T>, page: PageRequest) -> Page<T> {
    let total = items.len() as i64;
    let items = items
        .into_iter()
        .skip(page.offset() as usize)
        .take(page.limit as usize)
        .collect();
    Page::new(items, total, page)
}

#[derive(Clone, Default)]
pub struct MockStore {
    tables: Arc<Mutex<Tables>>,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap()
    }

    /// Context wired to this store with a fixed JWT secret
    pub fn context(&self) -> ServiceContext {
        self.builder().build().unwrap()
    }

    pub fn builder(&self) -> ServiceContextBuilder {
        ServiceContextBuilder::new()
            .user_repo(Arc::new(self.clone()))
            .community_repo(Arc::new(self.clone()))
            .community_user_repo(Arc::new(self.clone()))
            .staff_repo(Arc::new(self.clone()))
            .post_repo(Arc::new(self.clone()))
            .comment_repo(Arc::new(self.clone()))
            .like_repo(Arc::new(self.clone()))
            .notice_repo(Arc::new(self.clone()))
            .media_repo(Arc::new(self.clone()))
            .live_repo(Arc::new(self.clone()))
            .membership_repo(Arc::new(self.clone()))
            .product_repo(Arc::new(self.clone()))
            .merchandise_repo(Arc::new(self.clone()))
            .cart_repo(Arc::new(self.clone()))
            .session_store(Arc::new(self.clone()))
            .jwt_service(Arc::new(JwtService::new("test-secret", 900, 3600)))
            .snowflake_generator(Arc::new(SnowflakeGenerator::new(1)))
    }
}

// ============================================================================
// Users and communities
// ============================================================================

#[async_trait]
impl UserRepository for MockStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>> {
        Ok(self.tables().users.get(&id).map(|(u, _)| u.clone()))
    }

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let email = email.to_lowercase();
        Ok(self
            .tables()
            .users
            .values()
            .find(|(u, _)| u.email == email)
            .map(|(u, _)| u.clone()))
    }

    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()> {
        let mut t = self.tables();
        if t.users.values().any(|(u, _)| u.email == user.email) {
            return Err(DomainError::EmailAlreadyExists);
        }
        t.users
            .insert(user.id, (user.clone(), password_hash.to_string()));
        Ok(())
    }

    async fn update(&self, user: &User) -> RepoResult<()> {
        let mut t = self.tables();
        let entry = t.users.get_mut(&user.id).ok_or(DomainError::UserNotFound(user.id))?;
        entry.0 = user.clone();
        Ok(())
    }

    async fn soft_delete(&self, id: Snowflake) -> RepoResult<()> {
        let mut t = self.tables();
        match t.users.get_mut(&id) {
            Some((user, _)) if !user.is_deleted() => {
                user.deleted_at = Some(Utc::now());
                Ok(())
            }
            _ => Err(DomainError::UserNotFound(id)),
        }
    }

    async fn get_password_hash(&self, id: Snowflake) -> RepoResult<Option<String>> {
        Ok(self
            .tables()
            .users
            .get(&id)
            .filter(|(u, _)| !u.is_deleted())
            .map(|(_, hash)| hash.clone()))
    }
}

#[async_trait]
impl CommunityRepository for MockStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Community>> {
        Ok(self.tables().communities.get(&id).cloned())
    }

    async fn find_all(&self) -> RepoResult<Vec<Community>> {
        let mut all: Vec<_> = self.tables().communities.values().cloned().collect();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(all)
    }

    async fn find_by_ids(&self, ids: &[Snowflake]) -> RepoResult<Vec<Community>> {
        let t = self.tables();
        Ok(ids.iter().filter_map(|id| t.communities.get(id).cloned()).collect())
    }

    async fn create(&self, community: &Community) -> RepoResult<()> {
        self.tables().communities.insert(community.id, community.clone());
        Ok(())
    }

    async fn update(&self, community: &Community) -> RepoResult<()> {
        self.tables().communities.insert(community.id, community.clone());
        Ok(())
    }

    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let mut t = self.tables();
        let posts: Vec<_> = t.posts.values().filter(|p| p.community_id == id).map(|p| p.id).collect();
        for post in posts {
            t.drop_post(post);
        }
        let merchandise: Vec<_> = t
            .merchandise
            .values()
            .filter(|m| m.community_id == id)
            .map(|m| m.id)
            .collect();
        for post in merchandise {
            t.drop_merchandise(post);
        }
        t.notices.retain(|_, n| n.community_id != id);
        t.media.retain(|_, m| m.community_id != id);
        t.lives.retain(|_, l| l.community_id != id);
        t.memberships.retain(|m| m.community_id != id);
        t.staff.retain(|s| s.community_id != id);
        t.products.retain(|_, p| p.community_id != id);
        t.community_users.retain(|_, cu| cu.community_id != id);
        t.communities.remove(&id);
        Ok(())
    }
}

#[async_trait]
impl CommunityUserRepository for MockStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<CommunityUser>> {
        Ok(self.tables().community_users.get(&id).cloned())
    }

    async fn find_by_user_and_community(
        &self,
        user_id: Snowflake,
        community_id: Snowflake,
    ) -> RepoResult<Option<CommunityUser>> {
        Ok(self
            .tables()
            .community_users
            .values()
            .find(|cu| cu.user_id == user_id && cu.community_id == community_id)
            .cloned())
    }

    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Vec<CommunityUser>> {
        let mut rows: Vec<_> = self
            .tables()
            .community_users
            .values()
            .filter(|cu| cu.user_id == user_id)
            .cloned()
            .collect();
        rows.sort_by_key(|cu| cu.id);
        Ok(rows)
    }

    async fn create(&self, community_user: &CommunityUser) -> RepoResult<()> {
        let mut t = self.tables();
        if t.community_users.values().any(|cu| {
            cu.user_id == community_user.user_id && cu.community_id == community_user.community_id
        }) {
            return Err(DomainError::AlreadyMember);
        }
        t.community_users
            .insert(community_user.id, community_user.clone());
        Ok(())
    }

    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let mut t = self.tables();
        let posts: Vec<_> = t
            .posts
            .values()
            .filter(|p| p.community_user_id == id)
            .map(|p| p.id)
            .collect();
        for post in posts {
            t.drop_post(post);
        }
        let comments: Vec<_> = t
            .comments
            .values()
            .filter(|c| c.community_user_id == id)
            .map(|c| c.id)
            .collect();
        for comment in comments {
            t.drop_comment(comment);
        }
        let artists: Vec<_> = t
            .staff
            .iter()
            .filter(|s| s.community_user_id == id && s.kind == StaffKind::Artist)
            .map(|s| s.id)
            .collect();
        t.lives.retain(|_, l| !artists.contains(&l.artist_id));
        t.memberships.retain(|m| m.community_user_id != id);
        t.staff.retain(|s| s.community_user_id != id);
        t.community_users.remove(&id);
        Ok(())
    }
}

#[async_trait]
impl StaffRepository for MockStore {
    async fn find_by_id(&self, kind: StaffKind, id: Snowflake) -> RepoResult<Option<StaffGrant>> {
        Ok(self
            .tables()
            .staff
            .iter()
            .find(|s| s.kind == kind && s.id == id)
            .cloned())
    }

    async fn find_for_member(
        &self,
        community_user_id: Snowflake,
        community_id: Snowflake,
    ) -> RepoResult<Vec<StaffGrant>> {
        Ok(self
            .tables()
            .staff
            .iter()
            .filter(|s| s.community_user_id == community_user_id && s.community_id == community_id)
            .cloned()
            .collect())
    }

    async fn find_by_community(&self, community_id: Snowflake) -> RepoResult<Vec<StaffGrant>> {
        Ok(self
            .tables()
            .staff
            .iter()
            .filter(|s| s.community_id == community_id)
            .cloned()
            .collect())
    }

    async fn create(&self, grant: &StaffGrant) -> RepoResult<()> {
        let mut t = self.tables();
        if t.staff.iter().any(|s| {
            s.kind == grant.kind
                && s.community_user_id == grant.community_user_id
                && s.community_id == grant.community_id
        }) {
            return Err(match grant.kind {
                StaffKind::Artist => DomainError::AlreadyArtist,
                StaffKind::Manager => DomainError::AlreadyManager,
            });
        }
        t.staff.push(grant.clone());
        Ok(())
    }

    async fn delete(&self, kind: StaffKind, id: Snowflake) -> RepoResult<()> {
        let mut t = self.tables();
        if kind == StaffKind::Artist {
            t.lives.retain(|_, l| l.artist_id != id);
            for post in t.posts.values_mut() {
                if post.artist_id == Some(id) {
                    post.artist_id = None;
                }
            }
        }
        t.staff.retain(|s| !(s.kind == kind && s.id == id));
        Ok(())
    }
}

// ============================================================================
// Posts, comments and likes
// ============================================================================

#[async_trait]
impl PostRepository for MockStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Post>> {
        Ok(self.tables().posts.get(&id).cloned())
    }

    async fn find_page(&self, query: PostQuery) -> RepoResult<Page<Post>> {
        let mut posts: Vec<_> = self
            .tables()
            .posts
            .values()
            .filter(|p| p.community_id == query.community_id)
            .filter(|p| query.artist_id.is_none() || p.artist_id == query.artist_id)
            .cloned()
            .collect();
        posts.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(paginate(posts, query.page))
    }

    async fn find_images(&self, post_id: Snowflake) -> RepoResult<Vec<PostImage>> {
        self.find_images_for(&[post_id]).await
    }

    async fn find_images_for(&self, post_ids: &[Snowflake]) -> RepoResult<Vec<PostImage>> {
        let mut images: Vec<_> = self
            .tables()
            .post_images
            .iter()
            .filter(|i| post_ids.contains(&i.post_id))
            .cloned()
            .collect();
        images.sort_by_key(|i| (i.post_id, i.position));
        Ok(images)
    }

    async fn create(&self, post: &Post, images: &[PostImage]) -> RepoResult<()> {
        let mut t = self.tables();
        t.posts.insert(post.id, post.clone());
        t.post_images.extend_from_slice(images);
        Ok(())
    }

    async fn update(&self, post: &Post, images: Option<&[PostImage]>) -> RepoResult<()> {
        let mut t = self.tables();
        t.posts.insert(post.id, post.clone());
        if let Some(images) = images {
            t.post_images.retain(|i| i.post_id != post.id);
            t.post_images.extend_from_slice(images);
        }
        Ok(())
    }

    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        self.tables().drop_post(id);
        Ok(())
    }
}

#[async_trait]
impl CommentRepository for MockStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Comment>> {
        Ok(self.tables().comments.get(&id).cloned())
    }

    async fn find_by_post(
        &self,
        post_id: Snowflake,
        page: PageRequest,
    ) -> RepoResult<Page<Comment>> {
        let mut comments: Vec<_> = self
            .tables()
            .comments
            .values()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect();
        comments.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(paginate(comments, page))
    }

    async fn create(&self, comment: &Comment) -> RepoResult<()> {
        self.tables().comments.insert(comment.id, comment.clone());
        Ok(())
    }

    async fn update(&self, comment: &Comment) -> RepoResult<()> {
        self.tables().comments.insert(comment.id, comment.clone());
        Ok(())
    }

    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        self.tables().drop_comment(id);
        Ok(())
    }
}

#[async_trait]
impl LikeRepository for MockStore {
    async fn upsert(&self, like: &Like) -> RepoResult<Like> {
        let mut t = self.tables();
        if let Some(existing) = t.likes.iter_mut().find(|l| l.key() == like.key()) {
            existing.status = like.status;
            existing.updated_at = like.updated_at;
            return Ok(existing.clone());
        }
        t.likes.push(like.clone());
        Ok(like.clone())
    }

    async fn find(
        &self,
        user_id: Snowflake,
        item_id: Snowflake,
        item_type: ItemType,
    ) -> RepoResult<Option<Like>> {
        Ok(self
            .tables()
            .likes
            .iter()
            .find(|l| l.key() == (user_id, item_id, item_type))
            .cloned())
    }

    async fn count_active(&self, item_id: Snowflake, item_type: ItemType) -> RepoResult<i64> {
        Ok(self
            .tables()
            .likes
            .iter()
            .filter(|l| l.item_id == item_id && l.item_type == item_type && l.status)
            .count() as i64)
    }

    async fn count_active_for(
        &self,
        item_ids: &[Snowflake],
        item_type: ItemType,
    ) -> RepoResult<Vec<(Snowflake, i64)>> {
        let mut counts: HashMap<Snowflake, i64> = HashMap::new();
        for like in self.tables().likes.iter() {
            if like.status && like.item_type == item_type && item_ids.contains(&like.item_id) {
                *counts.entry(like.item_id).or_default() += 1;
            }
        }
        Ok(counts.into_iter().collect())
    }
}

// ============================================================================
// Notices, media and lives
// ============================================================================

#[async_trait]
impl NoticeRepository for MockStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Notice>> {
        Ok(self.tables().notices.get(&id).cloned())
    }

    async fn find_by_community(
        &self,
        community_id: Snowflake,
        page: PageRequest,
    ) -> RepoResult<Page<Notice>> {
        let mut rows: Vec<_> = self
            .tables()
            .notices
            .values()
            .filter(|n| n.community_id == community_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(paginate(rows, page))
    }

    async fn create(&self, notice: &Notice) -> RepoResult<()> {
        self.tables().notices.insert(notice.id, notice.clone());
        Ok(())
    }

    async fn update(&self, notice: &Notice) -> RepoResult<()> {
        self.tables().notices.insert(notice.id, notice.clone());
        Ok(())
    }

    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        self.tables().notices.remove(&id);
        Ok(())
    }
}

#[async_trait]
impl MediaRepository for MockStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Media>> {
        Ok(self.tables().media.get(&id).cloned())
    }

    async fn find_by_community(
        &self,
        community_id: Snowflake,
        page: PageRequest,
    ) -> RepoResult<Page<Media>> {
        let mut rows: Vec<_> = self
            .tables()
            .media
            .values()
            .filter(|m| m.community_id == community_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(paginate(rows, page))
    }

    async fn create(&self, media: &Media) -> RepoResult<()> {
        self.tables().media.insert(media.id, media.clone());
        Ok(())
    }

    async fn update(&self, media: &Media) -> RepoResult<()> {
        self.tables().media.insert(media.id, media.clone());
        Ok(())
    }

    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        self.tables().media.remove(&id);
        Ok(())
    }
}

#[async_trait]
impl LiveRepository for MockStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Live>> {
        Ok(self.tables().lives.get(&id).cloned())
    }

    async fn find_by_community(
        &self,
        community_id: Snowflake,
        page: PageRequest,
    ) -> RepoResult<Page<Live>> {
        let mut rows: Vec<_> = self
            .tables()
            .lives
            .values()
            .filter(|l| l.community_id == community_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| (b.is_live(), b.id).cmp(&(a.is_live(), a.id)));
        Ok(paginate(rows, page))
    }

    async fn create(&self, live: &Live) -> RepoResult<()> {
        self.tables().lives.insert(live.id, live.clone());
        Ok(())
    }

    async fn end(&self, id: Snowflake, ended_at: DateTime<Utc>) -> RepoResult<()> {
        let mut t = self.tables();
        let live = t.lives.get_mut(&id).ok_or(DomainError::LiveNotFound(id))?;
        if live.ended_at.is_some() {
            return Err(DomainError::LiveAlreadyEnded);
        }
        live.ended_at = Some(ended_at);
        Ok(())
    }
}

// ============================================================================
// Memberships
// ============================================================================

#[async_trait]
impl MembershipRepository for MockStore {
    async fn create(&self, membership: &Membership) -> RepoResult<()> {
        let mut t = self.tables();
        if t.memberships
            .iter()
            .any(|m| m.merchant_uid == membership.merchant_uid)
        {
            return Err(DomainError::DuplicatePayment(membership.merchant_uid.clone()));
        }
        t.memberships.push(membership.clone());
        Ok(())
    }

    async fn find_by_merchant_uid(&self, merchant_uid: &str) -> RepoResult<Option<Membership>> {
        Ok(self
            .tables()
            .memberships
            .iter()
            .find(|m| m.merchant_uid == merchant_uid)
            .cloned())
    }

    async fn find_by_community_user(
        &self,
        community_user_id: Snowflake,
    ) -> RepoResult<Vec<Membership>> {
        let mut rows: Vec<_> = self
            .tables()
            .memberships
            .iter()
            .filter(|m| m.community_user_id == community_user_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.paid_at.cmp(&a.paid_at));
        Ok(rows)
    }
}

// ============================================================================
// Storefront
// ============================================================================

#[async_trait]
impl ProductRepository for MockStore {
    async fn create_category(&self, category: &ProductCategory) -> RepoResult<()> {
        let mut t = self.tables();
        if t.categories.iter().any(|c| c.name == category.name) {
            return Err(DomainError::CategoryExists(category.name.clone()));
        }
        t.categories.push(category.clone());
        Ok(())
    }

    async fn find_category(&self, id: Snowflake) -> RepoResult<Option<ProductCategory>> {
        Ok(self.tables().categories.iter().find(|c| c.id == id).cloned())
    }

    async fn find_categories(&self) -> RepoResult<Vec<ProductCategory>> {
        Ok(self.tables().categories.clone())
    }

    async fn create(&self, product: &Product) -> RepoResult<()> {
        self.tables().products.insert(product.id, product.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Product>> {
        Ok(self.tables().products.get(&id).cloned())
    }

    async fn find_by_community(&self, community_id: Snowflake) -> RepoResult<Vec<Product>> {
        Ok(self
            .tables()
            .products
            .values()
            .filter(|p| p.community_id == community_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl MerchandiseRepository for MockStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<MerchandisePost>> {
        Ok(self.tables().merchandise.get(&id).cloned())
    }

    async fn find_page(
        &self,
        community_id: Snowflake,
        page: PageRequest,
    ) -> RepoResult<Page<MerchandisePost>> {
        let mut rows: Vec<_> = self
            .tables()
            .merchandise
            .values()
            .filter(|m| m.community_id == community_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(paginate(rows, page))
    }

    async fn find_options(
        &self,
        merchandise_post_id: Snowflake,
    ) -> RepoResult<Vec<MerchandiseOption>> {
        let mut rows: Vec<_> = self
            .tables()
            .options
            .values()
            .filter(|o| o.merchandise_post_id == merchandise_post_id)
            .cloned()
            .collect();
        rows.sort_by_key(|o| o.id);
        Ok(rows)
    }

    async fn find_images(
        &self,
        merchandise_post_id: Snowflake,
    ) -> RepoResult<Vec<MerchandiseImage>> {
        Ok(self
            .tables()
            .merchandise_images
            .iter()
            .filter(|i| i.merchandise_post_id == merchandise_post_id)
            .cloned()
            .collect())
    }

    async fn find_option(&self, option_id: Snowflake) -> RepoResult<Option<MerchandiseOption>> {
        Ok(self.tables().options.get(&option_id).cloned())
    }

    async fn create(
        &self,
        post: &MerchandisePost,
        options: &[MerchandiseOption],
        images: &[MerchandiseImage],
    ) -> RepoResult<()> {
        let mut t = self.tables();
        t.merchandise.insert(post.id, post.clone());
        for option in options {
            t.options.insert(option.id, option.clone());
        }
        t.merchandise_images.extend_from_slice(images);
        Ok(())
    }

    async fn update(&self, post: &MerchandisePost) -> RepoResult<()> {
        self.tables().merchandise.insert(post.id, post.clone());
        Ok(())
    }

    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        self.tables().drop_merchandise(id);
        Ok(())
    }
}

#[async_trait]
impl CartRepository for MockStore {
    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Option<Cart>> {
        Ok(self.tables().carts.get(&user_id).cloned())
    }

    async fn get_or_create(&self, cart: &Cart) -> RepoResult<Cart> {
        Ok(self
            .tables()
            .carts
            .entry(cart.user_id)
            .or_insert_with(|| cart.clone())
            .clone())
    }

    async fn find_item(&self, id: Snowflake) -> RepoResult<Option<CartItem>> {
        Ok(self.tables().cart_items.get(&id).cloned())
    }

    async fn find_item_by_option(
        &self,
        cart_id: Snowflake,
        merchandise_option_id: Snowflake,
    ) -> RepoResult<Option<CartItem>> {
        Ok(self
            .tables()
            .cart_items
            .values()
            .find(|i| i.cart_id == cart_id && i.merchandise_option_id == merchandise_option_id)
            .cloned())
    }

    async fn add_item(&self, item: &CartItem) -> RepoResult<()> {
        self.tables().cart_items.insert(item.id, item.clone());
        Ok(())
    }

    async fn set_quantity(&self, item_id: Snowflake, quantity: i32) -> RepoResult<()> {
        let mut t = self.tables();
        let item = t
            .cart_items
            .get_mut(&item_id)
            .ok_or(DomainError::CartItemNotFound(item_id))?;
        item.quantity = quantity;
        Ok(())
    }

    async fn remove_item(&self, item_id: Snowflake) -> RepoResult<()> {
        self.tables().cart_items.remove(&item_id);
        Ok(())
    }

    async fn find_lines(&self, cart_id: Snowflake) -> RepoResult<Vec<CartLine>> {
        Ok(self.tables().lines(cart_id))
    }

    async fn checkout(&self, cart_id: Snowflake) -> RepoResult<Vec<CartLine>> {
        let mut t = self.tables();
        let lines = t.lines(cart_id);
        if lines.is_empty() {
            return Err(DomainError::EmptyCart);
        }
        if let Some(short) = lines.iter().find(|l| l.item.quantity > l.stock) {
            return Err(DomainError::InsufficientStock {
                option_id: short.item.merchandise_option_id,
                available: short.stock,
            });
        }
        for line in &lines {
            if let Some(option) = t.options.get_mut(&line.item.merchandise_option_id) {
                option.stock -= line.item.quantity;
            }
        }
        t.cart_items.retain(|_, i| i.cart_id != cart_id);
        Ok(lines)
    }
}

// ============================================================================
// Sessions
// ============================================================================

#[async_trait]
impl SessionStore for MockStore {
    async fn store(&self, session_id: &str, user_id: Snowflake, _ttl_secs: u64) -> RepoResult<()> {
        self.tables().sessions.insert(session_id.to_string(), user_id);
        Ok(())
    }

    async fn find_user(&self, session_id: &str) -> RepoResult<Option<Snowflake>> {
        Ok(self.tables().sessions.get(session_id).copied())
    }

    async fn revoke(&self, session_id: &str) -> RepoResult<bool> {
        Ok(self.tables().sessions.remove(session_id).is_some())
    }

    async fn revoke_all(&self, user_id: Snowflake) -> RepoResult<u64> {
        let mut t = self.tables();
        let before = t.sessions.len();
        t.sessions.retain(|_, owner| *owner != user_id);
        Ok((before - t.sessions.len()) as u64)
    }
}
