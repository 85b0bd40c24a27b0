/**
 * Real-time Event System
 *
 * Events pushed to a single user's live connection. A notification event
 * carries the populated notification; an unread-count event carries the
 * recipient's new unread total after a read or delete.
 */
use serde::{Deserialize, Serialize};

use crate::shared::error::SharedError;
use crate::shared::social::NotificationView;

/// Type of real-time event
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    /// A new notification was stored for the user
    Notification,
    /// The user's unread notification count changed
    UnreadCount,
}

impl EventType {
    /// Name used for the SSE `event:` field
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Notification => "notification",
            EventType::UnreadCount => "unread_count",
        }
    }
}

/// Real-time event delivered to a user's subscribers
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RealtimeEvent {
    /// Type of event
    pub event_type: EventType,
    /// Event payload (JSON-serializable data)
    pub payload: serde_json::Value,
    /// Timestamp when event occurred (RFC3339)
    pub timestamp: String,
}

impl RealtimeEvent {
    /// Create a new real-time event
    pub fn new(event_type: EventType, payload: serde_json::Value) -> Self {
        Self {
            event_type,
            payload,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Create a notification event from a populated notification
    pub fn notification(notification: &NotificationView) -> Result<Self, SharedError> {
        let payload = serde_json::to_value(notification)?;
        Ok(Self::new(EventType::Notification, payload))
    }

    /// Create an unread-count event
    pub fn unread_count(count: i64) -> Self {
        Self::new(
            EventType::UnreadCount,
            serde_json::json!({ "unreadCount": count }),
        )
    }
}
