//! Explicit cascade routines
//!
//! The schema has no `ON DELETE CASCADE`; every delete of a parent row goes
//! through one of these functions on the connection of an open transaction.
//! Each step removes one kind of dependent row, children before parents, so
//! a foreign key error can only mean a step is missing here. The caller
//! commits, or drops the transaction to roll everything back.

use sqlx::PgConnection;
use tracing::debug;

/// Remove a community and everything that belongs to it.
///
/// Returns the number of community rows deleted (0 when it did not exist).
pub(crate) async fn delete_community(
    conn: &mut PgConnection,
    community_id: i64,
) -> Result<u64, sqlx::Error> {
    // Likes on the community's posts and comments
    sqlx::query(
        r"
        DELETE FROM likes l
        WHERE (l.item_type = 'POST'
               AND l.item_id IN (SELECT id FROM posts WHERE community_id = $1))
           OR (l.item_type = 'COMMENT'
               AND l.item_id IN (SELECT id FROM comments WHERE community_id = $1))
        ",
    )
    .bind(community_id)
    .execute(&mut *conn)
    .await?;

    sqlx::query(
        r"
        DELETE FROM post_images
        WHERE post_id IN (SELECT id FROM posts WHERE community_id = $1)
        ",
    )
    .bind(community_id)
    .execute(&mut *conn)
    .await?;

    // Comments are matched through their post as well, in case a row was
    // written with a stale community id
    sqlx::query(
        r"
        DELETE FROM comments
        WHERE community_id = $1
           OR post_id IN (SELECT id FROM posts WHERE community_id = $1)
        ",
    )
    .bind(community_id)
    .execute(&mut *conn)
    .await?;

    let posts = sqlx::query("DELETE FROM posts WHERE community_id = $1")
        .bind(community_id)
        .execute(&mut *conn)
        .await?
        .rows_affected();

    sqlx::query(
        r"
        DELETE FROM notice_images
        WHERE notice_id IN (SELECT id FROM notices WHERE community_id = $1)
        ",
    )
    .bind(community_id)
    .execute(&mut *conn)
    .await?;

    sqlx::query("DELETE FROM notices WHERE community_id = $1")
        .bind(community_id)
        .execute(&mut *conn)
        .await?;

    sqlx::query(
        r"
        DELETE FROM media_files
        WHERE media_id IN (SELECT id FROM media WHERE community_id = $1)
        ",
    )
    .bind(community_id)
    .execute(&mut *conn)
    .await?;

    sqlx::query("DELETE FROM media WHERE community_id = $1")
        .bind(community_id)
        .execute(&mut *conn)
        .await?;

    sqlx::query("DELETE FROM lives WHERE community_id = $1")
        .bind(community_id)
        .execute(&mut *conn)
        .await?;

    let memberships = sqlx::query("DELETE FROM memberships WHERE community_id = $1")
        .bind(community_id)
        .execute(&mut *conn)
        .await?
        .rows_affected();

    sqlx::query("DELETE FROM artists WHERE community_id = $1")
        .bind(community_id)
        .execute(&mut *conn)
        .await?;

    sqlx::query("DELETE FROM managers WHERE community_id = $1")
        .bind(community_id)
        .execute(&mut *conn)
        .await?;

    sqlx::query(
        r"
        DELETE FROM cart_items
        WHERE merchandise_post_id IN (SELECT id FROM merchandise_posts WHERE community_id = $1)
        ",
    )
    .bind(community_id)
    .execute(&mut *conn)
    .await?;

    sqlx::query(
        r"
        DELETE FROM merchandise_images
        WHERE merchandise_post_id IN (SELECT id FROM merchandise_posts WHERE community_id = $1)
        ",
    )
    .bind(community_id)
    .execute(&mut *conn)
    .await?;

    sqlx::query(
        r"
        DELETE FROM merchandise_options
        WHERE merchandise_post_id IN (SELECT id FROM merchandise_posts WHERE community_id = $1)
        ",
    )
    .bind(community_id)
    .execute(&mut *conn)
    .await?;

    sqlx::query("DELETE FROM merchandise_posts WHERE community_id = $1")
        .bind(community_id)
        .execute(&mut *conn)
        .await?;

    sqlx::query("DELETE FROM products WHERE community_id = $1")
        .bind(community_id)
        .execute(&mut *conn)
        .await?;

    let members = sqlx::query("DELETE FROM community_users WHERE community_id = $1")
        .bind(community_id)
        .execute(&mut *conn)
        .await?
        .rows_affected();

    let deleted = sqlx::query("DELETE FROM communities WHERE id = $1")
        .bind(community_id)
        .execute(&mut *conn)
        .await?
        .rows_affected();

    debug!(community_id, posts, memberships, members, "Community cascade complete");
    Ok(deleted)
}

/// Remove one community user with everything authored through it.
///
/// Returns the number of community user rows deleted.
pub(crate) async fn delete_community_user(
    conn: &mut PgConnection,
    community_user_id: i64,
) -> Result<u64, sqlx::Error> {
    // Likes on their posts, on comments under their posts, and on their
    // own comments elsewhere
    sqlx::query(
        r"
        DELETE FROM likes l
        WHERE (l.item_type = 'POST'
               AND l.item_id IN (SELECT id FROM posts WHERE community_user_id = $1))
           OR (l.item_type = 'COMMENT'
               AND l.item_id IN (
                   SELECT c.id FROM comments c
                   WHERE c.community_user_id = $1
                      OR c.post_id IN (SELECT id FROM posts WHERE community_user_id = $1)
               ))
        ",
    )
    .bind(community_user_id)
    .execute(&mut *conn)
    .await?;

    sqlx::query(
        r"
        DELETE FROM post_images
        WHERE post_id IN (SELECT id FROM posts WHERE community_user_id = $1)
        ",
    )
    .bind(community_user_id)
    .execute(&mut *conn)
    .await?;

    sqlx::query(
        r"
        DELETE FROM comments
        WHERE community_user_id = $1
           OR post_id IN (SELECT id FROM posts WHERE community_user_id = $1)
        ",
    )
    .bind(community_user_id)
    .execute(&mut *conn)
    .await?;

    sqlx::query("DELETE FROM posts WHERE community_user_id = $1")
        .bind(community_user_id)
        .execute(&mut *conn)
        .await?;

    sqlx::query("DELETE FROM memberships WHERE community_user_id = $1")
        .bind(community_user_id)
        .execute(&mut *conn)
        .await?;

    // Lives reference the artist row, so they go first
    sqlx::query(
        r"
        DELETE FROM lives
        WHERE artist_id IN (SELECT id FROM artists WHERE community_user_id = $1)
        ",
    )
    .bind(community_user_id)
    .execute(&mut *conn)
    .await?;

    sqlx::query("DELETE FROM artists WHERE community_user_id = $1")
        .bind(community_user_id)
        .execute(&mut *conn)
        .await?;

    sqlx::query("DELETE FROM managers WHERE community_user_id = $1")
        .bind(community_user_id)
        .execute(&mut *conn)
        .await?;

    let deleted = sqlx::query("DELETE FROM community_users WHERE id = $1")
        .bind(community_user_id)
        .execute(&mut *conn)
        .await?
        .rows_affected();

    Ok(deleted)
}

/// Remove one artist grant. Lives hosted under it go with it; posts keep
/// their content but lose the artist attribution.
pub(crate) async fn delete_artist(
    conn: &mut PgConnection,
    artist_id: i64,
) -> Result<u64, sqlx::Error> {
    sqlx::query("DELETE FROM lives WHERE artist_id = $1")
        .bind(artist_id)
        .execute(&mut *conn)
        .await?;

    sqlx::query("UPDATE posts SET artist_id = NULL WHERE artist_id = $1")
        .bind(artist_id)
        .execute(&mut *conn)
        .await?;

    let deleted = sqlx::query("DELETE FROM artists WHERE id = $1")
        .bind(artist_id)
        .execute(&mut *conn)
        .await?
        .rows_affected();

    Ok(deleted)
}

/// Remove a post with its images, the comments under it and every like on
/// either. Returns the number of post rows deleted.
pub(crate) async fn delete_post(conn: &mut PgConnection, post_id: i64) -> Result<u64, sqlx::Error> {
    sqlx::query(
        r"
        DELETE FROM likes
        WHERE (item_type = 'POST' AND item_id = $1)
           OR (item_type = 'COMMENT' AND item_id IN (SELECT id FROM comments WHERE post_id = $1))
        ",
    )
    .bind(post_id)
    .execute(&mut *conn)
    .await?;

    sqlx::query("DELETE FROM post_images WHERE post_id = $1")
        .bind(post_id)
        .execute(&mut *conn)
        .await?;

    sqlx::query("DELETE FROM comments WHERE post_id = $1")
        .bind(post_id)
        .execute(&mut *conn)
        .await?;

    let deleted = sqlx::query("DELETE FROM posts WHERE id = $1")
        .bind(post_id)
        .execute(&mut *conn)
        .await?
        .rows_affected();

    Ok(deleted)
}

/// Remove a comment with its likes
pub(crate) async fn delete_comment(
    conn: &mut PgConnection,
    comment_id: i64,
) -> Result<u64, sqlx::Error> {
    sqlx::query("DELETE FROM likes WHERE item_type = 'COMMENT' AND item_id = $1")
        .bind(comment_id)
        .execute(&mut *conn)
        .await?;

    let deleted = sqlx::query("DELETE FROM comments WHERE id = $1")
        .bind(comment_id)
        .execute(&mut *conn)
        .await?
        .rows_affected();

    Ok(deleted)
}

/// Remove a merchandise listing with its options, images and the cart
/// items pointing at it
pub(crate) async fn delete_merchandise(
    conn: &mut PgConnection,
    merchandise_post_id: i64,
) -> Result<u64, sqlx::Error> {
    sqlx::query("DELETE FROM cart_items WHERE merchandise_post_id = $1")
        .bind(merchandise_post_id)
        .execute(&mut *conn)
        .await?;

    sqlx::query("DELETE FROM merchandise_images WHERE merchandise_post_id = $1")
        .bind(merchandise_post_id)
        .execute(&mut *conn)
        .await?;

    sqlx::query("DELETE FROM merchandise_options WHERE merchandise_post_id = $1")
        .bind(merchandise_post_id)
        .execute(&mut *conn)
        .await?;

    let deleted = sqlx::query("DELETE FROM merchandise_posts WHERE id = $1")
        .bind(merchandise_post_id)
        .execute(&mut *conn)
        .await?
        .rows_affected();

    Ok(deleted)
}
