//! Post entities - member posts, their images, and comments

use chrono::{DateTime, Utc};

use crate::validation::{EntityRules, FieldErrors};
use crate::value_objects::Snowflake;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: Snowflake,
    pub community_id: Snowflake,
    /// Author's membership row
    pub community_user_id: Snowflake,
    /// Set when the author held an artist grant at creation time
    pub artist_id: Option<Snowflake>,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    pub const CONTENT_MAX: usize = 5000;
    pub const IMAGES_MAX: usize = 10;

    pub fn new(
        id: Snowflake,
        community_id: Snowflake,
        community_user_id: Snowflake,
        artist_id: Option<Snowflake>,
        content: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            community_id,
            community_user_id,
            artist_id,
            content,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn edit(&mut self, content: String) {
        self.content = content;
        self.updated_at = Utc::now();
    }

    #[inline]
    pub fn is_by_artist(&self) -> bool {
        self.artist_id.is_some()
    }
}

impl EntityRules for Post {
    fn field_errors(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        errors.text("content", &self.content, Self::CONTENT_MAX);
        errors
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostImage {
    pub id: Snowflake,
    pub post_id: Snowflake,
    pub url: String,
    /// Display order inside the post
    pub position: i32,
}

impl PostImage {
    pub fn new(id: Snowflake, post_id: Snowflake, url: String, position: i32) -> Self {
        Self {
            id,
            post_id,
            url,
            position,
        }
    }
}

/// Field rules for an image list attached to a post
pub fn image_list_errors(urls: &[String]) -> FieldErrors {
    let mut errors = FieldErrors::new();
    errors.count("images", urls.len(), 0, Post::IMAGES_MAX);
    errors.urls("images", urls);
    errors
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: Snowflake,
    pub post_id: Snowflake,
    pub community_id: Snowflake,
    pub community_user_id: Snowflake,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Comment {
    pub const CONTENT_MAX: usize = 1000;

    pub fn new(
        id: Snowflake,
        post_id: Snowflake,
        community_id: Snowflake,
        community_user_id: Snowflake,
        content: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            post_id,
            community_id,
            community_user_id,
            content,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn edit(&mut self, content: String) {
        self.content = content;
        self.updated_at = Utc::now();
    }
}

impl EntityRules for Comment {
    fn field_errors(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        errors.text("content", &self.content, Self::CONTENT_MAX);
        errors
    }
}
