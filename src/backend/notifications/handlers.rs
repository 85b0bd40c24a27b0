//! Notification HTTP Handlers
//!
//! All handlers act on the caller's own notifications only. A read or delete
//! that changes the caller's unread count pushes the new count to their live
//! connections.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use axum_extra::extract::WithRejection;
use uuid::Uuid;

use crate::backend::error::{ApiResult, BackendError};
use crate::backend::middleware::AuthUser;
use crate::backend::server::state::AppState;
use crate::shared::social::{
    MessageResponse, NotificationListResponse, NotificationQuery, UnreadCountResponse,
};
use crate::shared::RealtimeEvent;

use super::db;

/// Push the caller's current unread count to their connections
async fn push_unread_count(state: &AppState, user_id: Uuid) -> ApiResult<i64> {
    let count = db::unread_count(&state.db_pool, user_id).await?;
    state
        .hub
        .send_to(user_id, RealtimeEvent::unread_count(count))
        .await;
    Ok(count)
}

/// List notifications (GET /api/v1/notification?page=&limit=)
pub async fn get_notifications(
    State(state): State<AppState>,
    user: AuthUser,
    WithRejection(Query(query), _): WithRejection<Query<NotificationQuery>, BackendError>,
) -> ApiResult<Json<NotificationListResponse>> {
    let page = query.page();
    let limit = query.limit(state.config.notifications.page_size);
    let offset = (page - 1).saturating_mul(limit);

    let notifications = db::list_notifications(&state.db_pool, user.id(), limit, offset).await?;
    let unread_count = db::unread_count(&state.db_pool, user.id()).await?;
    let has_more = notifications.len() as i64 == limit;

    Ok(Json(NotificationListResponse {
        success: true,
        notifications,
        unread_count,
        current_page: page,
        has_more,
    }))
}

/// Unread count (GET /api/v1/notification/unread-count)
pub async fn get_unread_count(
    State(state): State<AppState>,
    user: AuthUser,
) -> ApiResult<Json<UnreadCountResponse>> {
    let unread_count = db::unread_count(&state.db_pool, user.id()).await?;
    Ok(Json(UnreadCountResponse {
        success: true,
        unread_count,
    }))
}

/// Mark one notification read (PUT /api/v1/notification/{id}/read)
pub async fn mark_as_read(
    State(state): State<AppState>,
    user: AuthUser,
    WithRejection(Path(notification_id), _): WithRejection<Path<Uuid>, BackendError>,
) -> ApiResult<Json<MessageResponse>> {
    if !db::mark_read(&state.db_pool, notification_id, user.id()).await? {
        return Err(BackendError::not_found("Notification not found"));
    }

    push_unread_count(&state, user.id()).await?;
    Ok(Json(MessageResponse::ok("Notification marked as read")))
}

/// Mark all notifications read (PUT /api/v1/notification/read-all)
pub async fn mark_all_as_read(
    State(state): State<AppState>,
    user: AuthUser,
) -> ApiResult<Json<MessageResponse>> {
    let updated = db::mark_all_read(&state.db_pool, user.id()).await?;
    tracing::debug!("Marked {} notifications read for {}", updated, user.id());

    push_unread_count(&state, user.id()).await?;
    Ok(Json(MessageResponse::ok("All notifications marked as read")))
}

/// Delete one notification (DELETE /api/v1/notification/{id})
pub async fn delete_notification(
    State(state): State<AppState>,
    user: AuthUser,
    WithRejection(Path(notification_id), _): WithRejection<Path<Uuid>, BackendError>,
) -> ApiResult<Json<MessageResponse>> {
    if !db::delete_notification(&state.db_pool, notification_id, user.id()).await? {
        return Err(BackendError::not_found("Notification not found"));
    }

    push_unread_count(&state, user.id()).await?;
    Ok(Json(MessageResponse::ok("Notification deleted successfully")))
}

/// Delete all notifications (DELETE /api/v1/notification/delete-all)
pub async fn delete_all_notifications(
    State(state): State<AppState>,
    user: AuthUser,
) -> ApiResult<Json<MessageResponse>> {
    let deleted = db::delete_all_notifications(&state.db_pool, user.id()).await?;
    tracing::debug!("Deleted {} notifications of {}", deleted, user.id());

    push_unread_count(&state, user.id()).await?;
    Ok(Json(MessageResponse::ok("All notifications deleted successfully")))
}
