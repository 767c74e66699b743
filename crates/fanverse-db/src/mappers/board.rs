//! Notice, media and live mappers

use fanverse_core::entities::{Live, Media, Notice};
use fanverse_core::value_objects::Snowflake;

use crate::models::{LiveModel, MediaModel, NoticeModel};

impl From<NoticeModel> for Notice {
    fn from(model: NoticeModel) -> Self {
        Notice {
            id: Snowflake::new(model.id),
            community_id: Snowflake::new(model.community_id),
            author_id: Snowflake::new(model.author_id),
            title: model.title,
            content: model.content,
            images: model.images,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<MediaModel> for Media {
    fn from(model: MediaModel) -> Self {
        Media {
            id: Snowflake::new(model.id),
            community_id: Snowflake::new(model.community_id),
            author_id: Snowflake::new(model.author_id),
            title: model.title,
            content: model.content,
            thumbnail_image: model.thumbnail_image,
            files: model.files,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<LiveModel> for Live {
    fn from(model: LiveModel) -> Self {
        Live {
            id: Snowflake::new(model.id),
            community_id: Snowflake::new(model.community_id),
            artist_id: Snowflake::new(model.artist_id),
            title: model.title,
            thumbnail_image: model.thumbnail_image,
            stream_url: model.stream_url,
            started_at: model.started_at,
            ended_at: model.ended_at,
        }
    }
}
