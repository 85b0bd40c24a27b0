//! Database operations for notifications
//!
//! Reads always come back populated: the sender's summary and, when the
//! notification is about a post, the post's id and image.

use chrono::{DateTime, Utc};
use sqlx::{Sqlite, SqlitePool};
use uuid::Uuid;

use crate::shared::social::{NotificationKind, NotificationView, PostThumb, UserSummary};

/// A notification about to be stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNotification {
    pub from: Uuid,
    pub to: Uuid,
    pub kind: NotificationKind,
    pub message: String,
    pub post_id: Option<Uuid>,
}

#[derive(Debug, sqlx::FromRow)]
struct NotificationRow {
    id: Uuid,
    kind: String,
    message: String,
    is_read: bool,
    created_at: DateTime<Utc>,
    from_id: Uuid,
    from_username: String,
    from_profile_picture: String,
    post_id: Option<Uuid>,
    post_image: Option<String>,
}

impl TryFrom<NotificationRow> for NotificationView {
    type Error = sqlx::Error;

    fn try_from(row: NotificationRow) -> Result<Self, Self::Error> {
        let kind = row
            .kind
            .parse::<NotificationKind>()
            .map_err(|e| sqlx::Error::Decode(Box::new(e)))?;

        let post = match (row.post_id, row.post_image) {
            (Some(id), Some(image)) => Some(PostThumb { id, image }),
            _ => None,
        };

        Ok(NotificationView {
            id: row.id,
            kind,
            from: UserSummary {
                id: row.from_id,
                username: row.from_username,
                profile_picture: row.from_profile_picture,
            },
            post,
            message: row.message,
            is_read: row.is_read,
            created_at: row.created_at,
        })
    }
}

const NOTIFICATION_SELECT: &str = r#"
    SELECT n.id, n.kind, n.message, n.is_read, n.created_at,
           u.id AS from_id, u.username AS from_username,
           u.profile_picture AS from_profile_picture,
           p.id AS post_id, p.image AS post_image
    FROM notifications n
    JOIN users u ON u.id = n.from_user_id
    LEFT JOIN posts p ON p.id = n.post_id
"#;

/// Insert a notification and return its id
pub async fn insert_notification<'e, E>(
    executor: E,
    notification: &NewNotification,
) -> Result<Uuid, sqlx::Error>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    let id = Uuid::new_v4();

    sqlx::query(
        r#"
        INSERT INTO notifications (id, from_user_id, to_user_id, kind, message, post_id, is_read, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, 0, $7)
        "#,
    )
    .bind(id)
    .bind(notification.from)
    .bind(notification.to)
    .bind(notification.kind.as_str())
    .bind(&notification.message)
    .bind(notification.post_id)
    .bind(Utc::now())
    .execute(executor)
    .await?;

    Ok(id)
}

/// Whether the same (from, to, kind, post) notification was stored at or
/// after `since`
pub async fn recent_duplicate_exists<'e, E>(
    executor: E,
    notification: &NewNotification,
    since: DateTime<Utc>,
) -> Result<bool, sqlx::Error>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    let count: i64 = sqlx::query_scalar(
        r#"
        SELECT COUNT(*) FROM notifications
        WHERE from_user_id = $1 AND to_user_id = $2 AND kind = $3
          AND post_id IS $4 AND created_at >= $5
        "#,
    )
    .bind(notification.from)
    .bind(notification.to)
    .bind(notification.kind.as_str())
    .bind(notification.post_id)
    .bind(since)
    .fetch_one(executor)
    .await?;

    Ok(count > 0)
}

/// Keep only the newest `retention` notifications of a recipient
///
/// Returns how many were deleted.
pub async fn trim_notifications<'e, E>(
    executor: E,
    to_user_id: Uuid,
    retention: i64,
) -> Result<u64, sqlx::Error>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query(
        r#"
        DELETE FROM notifications
        WHERE id IN (
            SELECT id FROM notifications
            WHERE to_user_id = $1
            ORDER BY created_at DESC, rowid DESC
            LIMIT -1 OFFSET $2
        )
        "#,
    )
    .bind(to_user_id)
    .bind(retention)
    .execute(executor)
    .await?;

    Ok(result.rows_affected())
}

pub async fn get_notification(
    pool: &SqlitePool,
    notification_id: Uuid,
) -> Result<Option<NotificationView>, sqlx::Error> {
    let query = format!("{NOTIFICATION_SELECT} WHERE n.id = $1");
    let row = sqlx::query_as::<_, NotificationRow>(&query)
        .bind(notification_id)
        .fetch_optional(pool)
        .await?;

    row.map(NotificationView::try_from).transpose()
}

/// One page of a recipient's notifications, newest first
pub async fn list_notifications(
    pool: &SqlitePool,
    to_user_id: Uuid,
    limit: i64,
    offset: i64,
) -> Result<Vec<NotificationView>, sqlx::Error> {
    let query = format!(
        "{NOTIFICATION_SELECT} WHERE n.to_user_id = $1 \
         ORDER BY n.created_at DESC, n.rowid DESC LIMIT $2 OFFSET $3"
    );
    let rows = sqlx::query_as::<_, NotificationRow>(&query)
        .bind(to_user_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;

    rows.into_iter().map(NotificationView::try_from).collect()
}

pub async fn unread_count(pool: &SqlitePool, to_user_id: Uuid) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM notifications WHERE to_user_id = $1 AND is_read = 0")
        .bind(to_user_id)
        .fetch_one(pool)
        .await
}

/// Total stored for a recipient, read or not
pub async fn notification_count(pool: &SqlitePool, to_user_id: Uuid) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM notifications WHERE to_user_id = $1")
        .bind(to_user_id)
        .fetch_one(pool)
        .await
}

/// Mark one of the recipient's notifications read
///
/// Returns false when no such notification belongs to the recipient.
pub async fn mark_read(
    pool: &SqlitePool,
    notification_id: Uuid,
    to_user_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("UPDATE notifications SET is_read = 1 WHERE id = $1 AND to_user_id = $2")
        .bind(notification_id)
        .bind(to_user_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn mark_all_read(pool: &SqlitePool, to_user_id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("UPDATE notifications SET is_read = 1 WHERE to_user_id = $1 AND is_read = 0")
        .bind(to_user_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

/// Delete one of the recipient's notifications
///
/// Returns false when no such notification belongs to the recipient.
pub async fn delete_notification(
    pool: &SqlitePool,
    notification_id: Uuid,
    to_user_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM notifications WHERE id = $1 AND to_user_id = $2")
        .bind(notification_id)
        .bind(to_user_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn delete_all_notifications(pool: &SqlitePool, to_user_id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM notifications WHERE to_user_id = $1")
        .bind(to_user_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}
