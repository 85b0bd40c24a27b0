/**
 * Per-user Event Broadcasting
 *
 * Every connected user gets their own `tokio::sync::broadcast` channel, keyed
 * by user id. A user may hold several live connections (several tabs); each
 * one is a receiver on the same channel, so every event reaches all of them.
 *
 * Channels are created lazily on subscribe and dropped by
 * [`NotificationHub::cleanup_inactive_channels`] once their last receiver is
 * gone. Sending to a user without a channel is a no-op.
 */

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{broadcast, RwLock};
use uuid::Uuid;

use crate::shared::RealtimeEvent;

/// Buffered events per user before slow receivers start lagging
const CHANNEL_CAPACITY: usize = 100;

/// Registry of live per-user event channels
#[derive(Clone, Default)]
pub struct NotificationHub {
    channels: Arc<RwLock<HashMap<Uuid, broadcast::Sender<RealtimeEvent>>>>,
}

impl NotificationHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a new receiver for a user, creating the channel if needed
    pub async fn subscribe(&self, user_id: Uuid) -> broadcast::Receiver<RealtimeEvent> {
        let mut channels = self.channels.write().await;
        let receiver = channels
            .entry(user_id)
            .or_insert_with(|| broadcast::channel(CHANNEL_CAPACITY).0)
            .subscribe();

        tracing::debug!(
            "[Realtime] User {} subscribed ({} connections)",
            user_id,
            receiver_count(&channels, user_id)
        );
        receiver
    }

    /// Push an event to every live connection of a user
    ///
    /// Returns how many connections received it.
    pub async fn send_to(&self, user_id: Uuid, event: RealtimeEvent) -> usize {
        let channels = self.channels.read().await;
        let Some(sender) = channels.get(&user_id) else {
            tracing::debug!("[Realtime] User {} not connected, event dropped", user_id);
            return 0;
        };

        match sender.send(event) {
            Ok(count) => {
                tracing::debug!("[Realtime] Event delivered to {} connections of {}", count, user_id);
                count
            }
            Err(_) => 0,
        }
    }

    pub async fn subscriber_count(&self, user_id: Uuid) -> usize {
        receiver_count(&*self.channels.read().await, user_id)
    }

    pub async fn is_connected(&self, user_id: Uuid) -> bool {
        self.subscriber_count(user_id).await > 0
    }

    /// Drop channels with no receivers left
    ///
    /// Returns the number of channels removed.
    pub async fn cleanup_inactive_channels(&self) -> usize {
        let mut channels = self.channels.write().await;
        let before = channels.len();
        channels.retain(|_, sender| sender.receiver_count() > 0);
        before - channels.len()
    }

    /// Number of users with an open channel
    pub async fn channel_count(&self) -> usize {
        self.channels.read().await.len()
    }
}

fn receiver_count(channels: &HashMap<Uuid, broadcast::Sender<RealtimeEvent>>, user_id: Uuid) -> usize {
    channels
        .get(&user_id)
        .map(|sender| sender.receiver_count())
        .unwrap_or(0)
}
