//! Staff-published community content: notices, media galleries and live listings

use chrono::{DateTime, Utc};

use crate::validation::{EntityRules, FieldErrors};
use crate::value_objects::Snowflake;

/// Community announcement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub id: Snowflake,
    pub community_id: Snowflake,
    /// Account that published the notice (staff or administrator)
    pub author_id: Snowflake,
    pub title: String,
    pub content: String,
    pub images: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Notice {
    pub const TITLE_MAX: usize = 100;
    pub const CONTENT_MAX: usize = 5000;
    pub const IMAGES_MAX: usize = 3;

    pub fn new(
        id: Snowflake,
        community_id: Snowflake,
        author_id: Snowflake,
        title: String,
        content: String,
        images: Vec<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            community_id,
            author_id,
            title,
            content,
            images,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl EntityRules for Notice {
    fn field_errors(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        errors.text("title", &self.title, Self::TITLE_MAX);
        errors.text("content", &self.content, Self::CONTENT_MAX);
        errors.count("noticeImages", self.images.len(), 0, Self::IMAGES_MAX);
        errors.urls("noticeImages", &self.images);
        errors
    }
}

/// Media gallery entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Media {
    pub id: Snowflake,
    pub community_id: Snowflake,
    pub author_id: Snowflake,
    pub title: String,
    pub content: String,
    pub thumbnail_image: Option<String>,
    pub files: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Media {
    pub const TITLE_MAX: usize = 100;
    pub const CONTENT_MAX: usize = 5000;
    pub const FILES_MAX: usize = 10;

    pub fn new(
        id: Snowflake,
        community_id: Snowflake,
        author_id: Snowflake,
        title: String,
        content: String,
        files: Vec<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            community_id,
            author_id,
            title,
            content,
            thumbnail_image: None,
            files,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl EntityRules for Media {
    fn field_errors(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        errors.text("title", &self.title, Self::TITLE_MAX);
        errors.text("content", &self.content, Self::CONTENT_MAX);
        errors.count("mediaFiles", self.files.len(), 1, Self::FILES_MAX);
        errors.urls("mediaFiles", &self.files);
        errors
    }
}

/// Live-stream listing hosted by an artist
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Live {
    pub id: Snowflake,
    pub community_id: Snowflake,
    /// Artist grant of the host
    pub artist_id: Snowflake,
    pub title: String,
    pub thumbnail_image: Option<String>,
    pub stream_url: String,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
}

impl Live {
    pub const TITLE_MAX: usize = 100;

    pub fn new(
        id: Snowflake,
        community_id: Snowflake,
        artist_id: Snowflake,
        title: String,
        stream_url: String,
    ) -> Self {
        Self {
            id,
            community_id,
            artist_id,
            title,
            thumbnail_image: None,
            stream_url,
            started_at: Utc::now(),
            ended_at: None,
        }
    }

    #[inline]
    pub fn is_live(&self) -> bool {
        self.ended_at.is_none()
    }
}

impl EntityRules for Live {
    fn field_errors(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        errors.text("title", &self.title, Self::TITLE_MAX);
        errors.text("streamUrl", &self.stream_url, 2048);
        errors
    }
}
