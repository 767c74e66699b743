//! Post, post image and comment mappers

use fanverse_core::entities::{Comment, Post, PostImage};
use fanverse_core::value_objects::Snowflake;

use crate::models::{CommentModel, PostImageModel, PostModel};

impl From<PostModel> for Post {
    fn from(model: PostModel) -> Self {
        Post {
            id: Snowflake::new(model.id),
            community_id: Snowflake::new(model.community_id),
            community_user_id: Snowflake::new(model.community_user_id),
            artist_id: model.artist_id.map(Snowflake::new),
            content: model.content,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<PostImageModel> for PostImage {
    fn from(model: PostImageModel) -> Self {
        PostImage {
            id: Snowflake::new(model.id),
            post_id: Snowflake::new(model.post_id),
            url: model.url,
            position: model.position,
        }
    }
}

impl From<CommentModel> for Comment {
    fn from(model: CommentModel) -> Self {
        Comment {
            id: Snowflake::new(model.id),
            post_id: Snowflake::new(model.post_id),
            community_id: Snowflake::new(model.community_id),
            community_user_id: Snowflake::new(model.community_user_id),
            content: model.content,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
