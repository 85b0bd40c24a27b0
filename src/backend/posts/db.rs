//! Database operations for posts, likes, comments and bookmarks

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::backend::users::db::get_user_by_id;
use crate::shared::social::{CommentView, PostView, UserSummary};

/// A row of the `posts` table
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PostRecord {
    pub id: Uuid,
    pub author_id: Uuid,
    pub caption: String,
    pub image: String,
    pub created_at: DateTime<Utc>,
}

/// A comment joined with its author's summary fields
#[derive(Debug, Clone, sqlx::FromRow)]
struct CommentRow {
    id: Uuid,
    post_id: Uuid,
    text: String,
    created_at: DateTime<Utc>,
    author_id: Uuid,
    author_username: String,
    author_profile_picture: String,
}

impl From<CommentRow> for CommentView {
    fn from(row: CommentRow) -> Self {
        CommentView {
            id: row.id,
            text: row.text,
            author: UserSummary {
                id: row.author_id,
                username: row.author_username,
                profile_picture: row.author_profile_picture,
            },
            post: row.post_id,
            created_at: row.created_at,
        }
    }
}

const COMMENT_SELECT: &str = r#"
    SELECT c.id, c.post_id, c.text, c.created_at,
           u.id AS author_id, u.username AS author_username,
           u.profile_picture AS author_profile_picture
    FROM comments c
    JOIN users u ON u.id = c.author_id
"#;

pub async fn create_post(
    pool: &SqlitePool,
    author_id: Uuid,
    caption: &str,
    image: &str,
) -> Result<PostRecord, sqlx::Error> {
    let post = sqlx::query_as::<_, PostRecord>(
        r#"
        INSERT INTO posts (id, author_id, caption, image, created_at)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, author_id, caption, image, created_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(author_id)
    .bind(caption)
    .bind(image)
    .bind(Utc::now())
    .fetch_one(pool)
    .await?;

    tracing::debug!("Created post {} by {}", post.id, author_id);
    Ok(post)
}

pub async fn get_post(pool: &SqlitePool, post_id: Uuid) -> Result<Option<PostRecord>, sqlx::Error> {
    sqlx::query_as::<_, PostRecord>(
        "SELECT id, author_id, caption, image, created_at FROM posts WHERE id = $1",
    )
    .bind(post_id)
    .fetch_optional(pool)
    .await
}

/// Every post, newest first
pub async fn list_posts(pool: &SqlitePool) -> Result<Vec<PostRecord>, sqlx::Error> {
    sqlx::query_as::<_, PostRecord>(
        r#"
        SELECT id, author_id, caption, image, created_at
        FROM posts
        ORDER BY created_at DESC, rowid DESC
        "#,
    )
    .fetch_all(pool)
    .await
}

/// Posts of one author, newest first
pub async fn list_posts_by_author(
    pool: &SqlitePool,
    author_id: Uuid,
) -> Result<Vec<PostRecord>, sqlx::Error> {
    sqlx::query_as::<_, PostRecord>(
        r#"
        SELECT id, author_id, caption, image, created_at
        FROM posts
        WHERE author_id = $1
        ORDER BY created_at DESC, rowid DESC
        "#,
    )
    .bind(author_id)
    .fetch_all(pool)
    .await
}

pub async fn post_ids_by_author(pool: &SqlitePool, author_id: Uuid) -> Result<Vec<Uuid>, sqlx::Error> {
    sqlx::query_scalar(
        "SELECT id FROM posts WHERE author_id = $1 ORDER BY created_at DESC, rowid DESC",
    )
    .bind(author_id)
    .fetch_all(pool)
    .await
}

/// Add a like; returns false if the user already liked the post
pub async fn add_like(pool: &SqlitePool, post_id: Uuid, user_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "INSERT OR IGNORE INTO post_likes (post_id, user_id, created_at) VALUES ($1, $2, $3)",
    )
    .bind(post_id)
    .bind(user_id)
    .bind(Utc::now())
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Remove a like; returns false if there was none
pub async fn remove_like(pool: &SqlitePool, post_id: Uuid, user_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM post_likes WHERE post_id = $1 AND user_id = $2")
        .bind(post_id)
        .bind(user_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Ids of the users who liked a post, in the order they liked it
pub async fn like_user_ids(pool: &SqlitePool, post_id: Uuid) -> Result<Vec<Uuid>, sqlx::Error> {
    sqlx::query_scalar("SELECT user_id FROM post_likes WHERE post_id = $1 ORDER BY created_at, rowid")
        .bind(post_id)
        .fetch_all(pool)
        .await
}

pub async fn create_comment(
    pool: &SqlitePool,
    post_id: Uuid,
    author_id: Uuid,
    text: &str,
) -> Result<CommentView, sqlx::Error> {
    let id = Uuid::new_v4();

    sqlx::query(
        r#"
        INSERT INTO comments (id, post_id, author_id, text, created_at)
        VALUES ($1, $2, $3, $4, $5)
        "#,
    )
    .bind(id)
    .bind(post_id)
    .bind(author_id)
    .bind(text)
    .bind(Utc::now())
    .execute(pool)
    .await?;

    let query = format!("{COMMENT_SELECT} WHERE c.id = $1");
    let row = sqlx::query_as::<_, CommentRow>(&query)
        .bind(id)
        .fetch_one(pool)
        .await?;

    Ok(row.into())
}

/// Comments of a post with author summaries
pub async fn comments_for_post(
    pool: &SqlitePool,
    post_id: Uuid,
    newest_first: bool,
) -> Result<Vec<CommentView>, sqlx::Error> {
    let order = if newest_first {
        "c.created_at DESC, c.rowid DESC"
    } else {
        "c.created_at ASC, c.rowid ASC"
    };
    let query = format!("{COMMENT_SELECT} WHERE c.post_id = $1 ORDER BY {order}");

    let rows = sqlx::query_as::<_, CommentRow>(&query)
        .bind(post_id)
        .fetch_all(pool)
        .await?;

    Ok(rows.into_iter().map(CommentView::from).collect())
}

/// Delete a post with everything hanging off it
///
/// Notifications, comments, likes and bookmarks that reference the post are
/// removed in the same transaction. Returns false if the post did not exist.
pub async fn delete_post_cascade(pool: &SqlitePool, post_id: Uuid) -> Result<bool, sqlx::Error> {
    let mut tx = pool.begin().await?;

    for statement in [
        "DELETE FROM notifications WHERE post_id = $1",
        "DELETE FROM comments WHERE post_id = $1",
        "DELETE FROM post_likes WHERE post_id = $1",
        "DELETE FROM bookmarks WHERE post_id = $1",
    ] {
        sqlx::query(statement).bind(post_id).execute(&mut *tx).await?;
    }

    let deleted = sqlx::query("DELETE FROM posts WHERE id = $1")
        .bind(post_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    tx.commit().await?;

    Ok(deleted > 0)
}

pub async fn is_bookmarked(pool: &SqlitePool, user_id: Uuid, post_id: Uuid) -> Result<bool, sqlx::Error> {
    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM bookmarks WHERE user_id = $1 AND post_id = $2")
            .bind(user_id)
            .bind(post_id)
            .fetch_one(pool)
            .await?;
    Ok(count > 0)
}

pub async fn add_bookmark(pool: &SqlitePool, user_id: Uuid, post_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "INSERT OR IGNORE INTO bookmarks (user_id, post_id, created_at) VALUES ($1, $2, $3)",
    )
    .bind(user_id)
    .bind(post_id)
    .bind(Utc::now())
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn remove_bookmark(pool: &SqlitePool, user_id: Uuid, post_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM bookmarks WHERE user_id = $1 AND post_id = $2")
        .bind(user_id)
        .bind(post_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Ids of the posts a user bookmarked, most recent bookmark first
pub async fn bookmarked_post_ids(pool: &SqlitePool, user_id: Uuid) -> Result<Vec<Uuid>, sqlx::Error> {
    sqlx::query_scalar(
        "SELECT post_id FROM bookmarks WHERE user_id = $1 ORDER BY created_at DESC, rowid DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

/// Posts a user bookmarked, most recent bookmark first
pub async fn bookmarked_posts(pool: &SqlitePool, user_id: Uuid) -> Result<Vec<PostRecord>, sqlx::Error> {
    sqlx::query_as::<_, PostRecord>(
        r#"
        SELECT p.id, p.author_id, p.caption, p.image, p.created_at
        FROM bookmarks b
        JOIN posts p ON p.id = b.post_id
        WHERE b.user_id = $1
        ORDER BY b.created_at DESC, b.rowid DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

/// Populate a post with its author, likes and comments (newest first)
pub async fn load_post_view(pool: &SqlitePool, post: PostRecord) -> Result<Option<PostView>, sqlx::Error> {
    let Some(author) = get_user_by_id(pool, post.author_id).await? else {
        tracing::warn!("Post {} references missing author {}", post.id, post.author_id);
        return Ok(None);
    };

    let likes = like_user_ids(pool, post.id).await?;
    let comments = comments_for_post(pool, post.id, true).await?;

    Ok(Some(PostView {
        id: post.id,
        caption: post.caption,
        image: post.image,
        author: author.summary(),
        likes,
        comments,
        created_at: post.created_at,
    }))
}

pub async fn load_post_views(
    pool: &SqlitePool,
    posts: Vec<PostRecord>,
) -> Result<Vec<PostView>, sqlx::Error> {
    let mut views = Vec::with_capacity(posts.len());
    for post in posts {
        if let Some(view) = load_post_view(pool, post).await? {
            views.push(view);
        }
    }
    Ok(views)
}
