//! Database operations for users and follow edges
//!
//! The `follows` table is the only record of who follows whom; both the
//! "followers" and "following" lists of a profile are read from it.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::backend::posts::db::{bookmarked_post_ids, post_ids_by_author};
use crate::shared::social::{Gender, UserProfile, UserSummary};

const USER_COLUMNS: &str =
    "id, username, email, profile_picture, bio, gender, created_at, updated_at";

/// A row of the `users` table
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRecord {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub profile_picture: String,
    pub bio: String,
    pub gender: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserRecord {
    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: self.id,
            username: self.username.clone(),
            profile_picture: self.profile_picture.clone(),
        }
    }

    pub fn gender(&self) -> Option<Gender> {
        self.gender.as_deref().and_then(|g| g.parse().ok())
    }
}

/// Insert a user
///
/// Accounts are normally provisioned by the account service; this is how
/// operators and tests seed them.
pub async fn create_user(
    pool: &SqlitePool,
    username: &str,
    email: &str,
) -> Result<UserRecord, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    let query = format!(
        "INSERT INTO users (id, username, email, created_at, updated_at) \
         VALUES ($1, $2, $3, $4, $4) RETURNING {USER_COLUMNS}"
    );

    let user = sqlx::query_as::<_, UserRecord>(&query)
        .bind(id)
        .bind(username)
        .bind(email)
        .bind(now)
        .fetch_one(pool)
        .await?;

    tracing::info!("Created user {} ({})", user.username, user.id);
    Ok(user)
}

pub async fn user_exists(pool: &SqlitePool, user_id: Uuid) -> Result<bool, sqlx::Error> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_one(pool)
        .await?;
    Ok(count > 0)
}

pub async fn get_user_by_id(
    pool: &SqlitePool,
    user_id: Uuid,
) -> Result<Option<UserRecord>, sqlx::Error> {
    let query = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
    sqlx::query_as::<_, UserRecord>(&query)
        .bind(user_id)
        .fetch_optional(pool)
        .await
}

/// Look up a user by exact username
pub async fn get_user_by_username(
    pool: &SqlitePool,
    username: &str,
) -> Result<Option<UserRecord>, sqlx::Error> {
    let query = format!("SELECT {USER_COLUMNS} FROM users WHERE username = $1");
    sqlx::query_as::<_, UserRecord>(&query)
        .bind(username)
        .fetch_optional(pool)
        .await
}

/// Every user except one, newest accounts first
pub async fn list_users_except(
    pool: &SqlitePool,
    user_id: Uuid,
) -> Result<Vec<UserRecord>, sqlx::Error> {
    let query = format!(
        "SELECT {USER_COLUMNS} FROM users WHERE id <> $1 ORDER BY created_at DESC, rowid DESC"
    );
    sqlx::query_as::<_, UserRecord>(&query)
        .bind(user_id)
        .fetch_all(pool)
        .await
}

/// Update the editable profile fields; `None` leaves a field unchanged
///
/// Returns `None` when the user does not exist.
pub async fn update_profile(
    pool: &SqlitePool,
    user_id: Uuid,
    bio: Option<&str>,
    gender: Option<Gender>,
    profile_picture: Option<&str>,
) -> Result<Option<UserRecord>, sqlx::Error> {
    let query = format!(
        "UPDATE users SET \
            bio = COALESCE($2, bio), \
            gender = COALESCE($3, gender), \
            profile_picture = COALESCE($4, profile_picture), \
            updated_at = $5 \
         WHERE id = $1 RETURNING {USER_COLUMNS}"
    );

    sqlx::query_as::<_, UserRecord>(&query)
        .bind(user_id)
        .bind(bio)
        .bind(gender.map(|g| g.as_str()))
        .bind(profile_picture)
        .bind(Utc::now())
        .fetch_optional(pool)
        .await
}

/// Ids of the users following `user_id`, oldest edge first
pub async fn follower_ids(pool: &SqlitePool, user_id: Uuid) -> Result<Vec<Uuid>, sqlx::Error> {
    sqlx::query_scalar(
        "SELECT follower_id FROM follows WHERE following_id = $1 ORDER BY created_at, rowid",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

/// Ids of the users `user_id` follows, oldest edge first
pub async fn following_ids(pool: &SqlitePool, user_id: Uuid) -> Result<Vec<Uuid>, sqlx::Error> {
    sqlx::query_scalar(
        "SELECT following_id FROM follows WHERE follower_id = $1 ORDER BY created_at, rowid",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

pub async fn is_following(
    pool: &SqlitePool,
    follower_id: Uuid,
    following_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM follows WHERE follower_id = $1 AND following_id = $2",
    )
    .bind(follower_id)
    .bind(following_id)
    .fetch_one(pool)
    .await?;
    Ok(count > 0)
}

/// Add a follow edge; returns false when it already existed
pub async fn follow(
    pool: &SqlitePool,
    follower_id: Uuid,
    following_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "INSERT OR IGNORE INTO follows (follower_id, following_id, created_at) VALUES ($1, $2, $3)",
    )
    .bind(follower_id)
    .bind(following_id)
    .bind(Utc::now())
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Remove a follow edge; returns false when there was none
pub async fn unfollow(
    pool: &SqlitePool,
    follower_id: Uuid,
    following_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM follows WHERE follower_id = $1 AND following_id = $2")
        .bind(follower_id)
        .bind(following_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Assemble the id-only profile of a user
pub async fn load_profile(
    pool: &SqlitePool,
    user: UserRecord,
) -> Result<UserProfile, sqlx::Error> {
    let followers = follower_ids(pool, user.id).await?;
    let following = following_ids(pool, user.id).await?;
    let posts = post_ids_by_author(pool, user.id).await?;
    let bookmarks = bookmarked_post_ids(pool, user.id).await?;

    Ok(profile_from_parts(user, followers, following, posts, bookmarks))
}

pub fn profile_from_parts<P>(
    user: UserRecord,
    followers: Vec<Uuid>,
    following: Vec<Uuid>,
    posts: Vec<P>,
    bookmarks: Vec<P>,
) -> UserProfile<P> {
    let gender = user.gender();
    UserProfile {
        id: user.id,
        username: user.username,
        email: user.email,
        profile_picture: user.profile_picture,
        bio: user.bio,
        gender,
        followers,
        following,
        posts,
        bookmarks,
        created_at: user.created_at,
    }
}
