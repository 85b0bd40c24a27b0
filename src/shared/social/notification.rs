//! Notification wire types

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::error::SharedError;
use crate::shared::social::{PostThumb, UserSummary};

/// Page size used when the client does not ask for one
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Upper bound on a requested page size
pub const MAX_PAGE_SIZE: i64 = 100;

/// What triggered a notification
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Like,
    Comment,
    Follow,
    Mention,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::Like => "like",
            NotificationKind::Comment => "comment",
            NotificationKind::Follow => "follow",
            NotificationKind::Mention => "mention",
        }
    }
}

impl FromStr for NotificationKind {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "like" => Ok(NotificationKind::Like),
            "comment" => Ok(NotificationKind::Comment),
            "follow" => Ok(NotificationKind::Follow),
            "mention" => Ok(NotificationKind::Mention),
            other => Err(SharedError::unknown_variant("notification kind", other)),
        }
    }
}

/// A stored notification with sender and post populated
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NotificationView {
    #[serde(rename = "_id")]
    pub id: Uuid,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub from: UserSummary,
    pub post: Option<PostThumb>,
    pub message: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

/// Query string of `GET /api/v1/notification`
///
/// Values are parsed leniently: anything that is not a positive integer falls
/// back to the default.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NotificationQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl NotificationQuery {
    pub fn page(&self) -> i64 {
        parse_positive(self.page.as_deref()).unwrap_or(1)
    }

    pub fn limit(&self, default: i64) -> i64 {
        parse_positive(self.limit.as_deref())
            .unwrap_or(default)
            .min(MAX_PAGE_SIZE)
    }
}

fn parse_positive(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|s| s.trim().parse::<i64>().ok())
        .filter(|n| *n > 0)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationListResponse {
    pub success: bool,
    pub notifications: Vec<NotificationView>,
    pub unread_count: i64,
    pub current_page: i64,
    /// True when the page came back full
    pub has_more: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnreadCountResponse {
    pub success: bool,
    pub unread_count: i64,
}
