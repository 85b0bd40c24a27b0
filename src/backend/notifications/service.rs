/**
 * Notification Creation
 *
 * Every like, comment, follow and mention goes through
 * [`create_notification`], which applies the storage rules in order:
 *
 * 1. Nothing is stored when sender and recipient are the same user.
 * 2. Nothing is stored when an identical (sender, recipient, kind, post)
 *    notification was stored inside the dedup window.
 * 3. The notification is inserted, then the recipient's oldest
 *    notifications beyond the retention limit are deleted.
 *
 * Steps 2 and 3 run in one transaction.
 * 4. The populated notification is pushed to the recipient's live
 *    connections, if any.
 *
 * Handlers call [`dispatch`], which logs failures instead of returning them:
 * a notification problem never fails the action that triggered it.
 */

use sqlx::SqlitePool;

use crate::backend::error::BackendError;
use crate::backend::notifications::db::{
    get_notification, insert_notification, recent_duplicate_exists, trim_notifications,
    NewNotification,
};
use crate::backend::realtime::NotificationHub;
use crate::backend::server::config::NotificationPolicy;
use crate::shared::social::NotificationView;
use crate::shared::RealtimeEvent;

/// Store a notification and push it to the recipient
///
/// Returns `None` when the notification was suppressed.
pub async fn create_notification(
    pool: &SqlitePool,
    hub: &NotificationHub,
    policy: &NotificationPolicy,
    notification: NewNotification,
) -> Result<Option<NotificationView>, BackendError> {
    if notification.from == notification.to {
        return Ok(None);
    }

    let window = chrono::Duration::from_std(policy.dedup_window).unwrap_or(chrono::Duration::zero());
    let since = chrono::Utc::now() - window;

    // Duplicate check, insert and trim share one transaction so two
    // concurrent actions cannot both pass the check.
    let mut tx = pool.begin().await?;

    if recent_duplicate_exists(&mut *tx, &notification, since).await? {
        tracing::debug!(
            "Suppressed duplicate {} notification {} -> {}",
            notification.kind.as_str(),
            notification.from,
            notification.to
        );
        tx.rollback().await?;
        return Ok(None);
    }

    let id = insert_notification(&mut *tx, &notification).await?;
    let trimmed = trim_notifications(&mut *tx, notification.to, policy.retention).await?;

    tx.commit().await?;

    if trimmed > 0 {
        tracing::debug!("Trimmed {} old notifications of {}", trimmed, notification.to);
    }

    let Some(view) = get_notification(pool, id).await? else {
        return Ok(None);
    };

    let delivered = hub
        .send_to(notification.to, RealtimeEvent::notification(&view)?)
        .await;
    tracing::debug!(
        "Notification {} ({}) stored for {}, pushed to {} connections",
        view.id,
        view.kind.as_str(),
        notification.to,
        delivered
    );

    Ok(Some(view))
}

/// Create a notification, logging instead of failing
pub async fn dispatch(
    pool: &SqlitePool,
    hub: &NotificationHub,
    policy: &NotificationPolicy,
    notification: NewNotification,
) -> Option<NotificationView> {
    let kind = notification.kind;
    let to = notification.to;

    match create_notification(pool, hub, policy, notification).await {
        Ok(view) => view,
        Err(e) => {
            tracing::error!("Error creating {} notification for {}: {}", kind.as_str(), to, e);
            None
        }
    }
}
