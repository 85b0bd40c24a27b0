//! Social Types
//!
//! Users, posts, comments and notifications as they travel over the API.
//!
//! Field names follow the JSON contract the web client already speaks:
//! camelCase keys and `_id` for record identifiers.

use serde::{Deserialize, Serialize};

pub mod notification;
pub mod post;
pub mod user;

pub use notification::{
    NotificationKind, NotificationListResponse, NotificationQuery, NotificationView,
    UnreadCountResponse, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE,
};
pub use post::{
    BookmarkResponse, BookmarkState, CommentResponse, CommentView, CommentsResponse,
    CreateCommentRequest, CreatePostRequest, PostResponse, PostThumb, PostView, PostsResponse,
};
pub use user::{
    EditProfileRequest, EditProfileResponse, FollowResponse, Gender, ProfileResponse,
    SuggestedUsersResponse, UserProfile, UserSummary,
};

/// Body of responses that only report an outcome
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}
