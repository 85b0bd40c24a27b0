/**
 * Notification Stream Handler
 *
 * `GET /api/v1/notification/stream` opens a Server-Sent Events stream for
 * the authenticated user. The first event is the user's current unread
 * count; after that the stream carries every event pushed to the user
 * through the [`NotificationHub`].
 *
 * ```http
 * event: unread_count
 * data: {"unreadCount":3}
 *
 * event: notification
 * data: {"_id":"...","type":"like","from":{...},"message":"alice liked your post",...}
 * ```
 *
 * Keep-alive comments hold idle connections open. A receiver that falls
 * behind skips the events it missed and carries on.
 */

use std::convert::Infallible;

use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
};
use futures_util::{stream, Stream, StreamExt};
use sqlx::SqlitePool;
use tokio::sync::broadcast::error::RecvError;

use crate::backend::error::ApiResult;
use crate::backend::middleware::AuthUser;
use crate::backend::notifications::db::unread_count;
use crate::backend::realtime::broadcast::NotificationHub;
use crate::shared::RealtimeEvent;

/// Turn an event into its SSE frame, named after the event type
pub fn to_sse_event(event: &RealtimeEvent) -> Result<Event, serde_json::Error> {
    let data = serde_json::to_string(&event.payload)?;
    Ok(Event::default().event(event.event_type.as_str()).data(data))
}

/// Handle a notification stream subscription
pub async fn handle_notification_stream(
    user: AuthUser,
    State(hub): State<NotificationHub>,
    State(pool): State<SqlitePool>,
) -> ApiResult<Sse<impl Stream<Item = Result<Event, Infallible>>>> {
    let user_id = user.id();

    let receiver = hub.subscribe(user_id).await;
    let initial = to_sse_event(&RealtimeEvent::unread_count(unread_count(&pool, user_id).await?))?;

    tracing::info!("[Realtime] Notification stream opened for {}", user_id);

    let live = stream::unfold(receiver, move |mut rx| async move {
        loop {
            match rx.recv().await {
                Ok(event) => match to_sse_event(&event) {
                    Ok(sse_event) => return Some((Ok::<_, Infallible>(sse_event), rx)),
                    Err(e) => {
                        tracing::error!("[Realtime] Failed to serialize event: {:?}", e);
                        continue;
                    }
                },
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!("[Realtime] Stream of {} lagged, skipped {} events", user_id, skipped);
                    continue;
                }
                Err(RecvError::Closed) => {
                    tracing::debug!("[Realtime] Channel of {} closed, ending stream", user_id);
                    return None;
                }
            }
        }
    });

    let stream = stream::once(async move { Ok::<_, Infallible>(initial) }).chain(live);

    Ok(Sse::new(stream).keep_alive(KeepAlive::default()))
}

