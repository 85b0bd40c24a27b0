//! Post and comment wire types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::shared::social::UserSummary;

/// A post with its author, likers and comments populated
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PostView {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub caption: String,
    pub image: String,
    pub author: UserSummary,
    /// Ids of users who liked the post
    pub likes: Vec<Uuid>,
    pub comments: Vec<CommentView>,
    pub created_at: DateTime<Utc>,
}

/// The `{_id, image}` projection of a post embedded in notifications
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PostThumb {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub image: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CommentView {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub text: String,
    pub author: UserSummary,
    pub post: Uuid,
    pub created_at: DateTime<Utc>,
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Body of `POST /api/v1/post/addpost`
///
/// `image` is the URL of an already-hosted image.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct CreatePostRequest {
    #[serde(default)]
    #[validate(length(max = 2200, message = "Caption must be at most 2200 characters"))]
    pub caption: String,
    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "Image is required"))]
    pub image: String,
}

/// Body of `POST /api/v1/post/{id}/comment`
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct CreateCommentRequest {
    #[serde(default)]
    #[validate(
        custom(function = "not_blank", message = "Comment text is required"),
        length(max = 2200, message = "Comment must be at most 2200 characters")
    )]
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostResponse {
    pub success: bool,
    pub message: String,
    pub post: PostView,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostsResponse {
    pub success: bool,
    pub posts: Vec<PostView>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentResponse {
    pub success: bool,
    pub message: String,
    pub comment: CommentView,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentsResponse {
    pub success: bool,
    pub comments: Vec<CommentView>,
}

/// Whether a bookmark toggle saved or removed the post
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BookmarkState {
    Saved,
    Unsaved,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookmarkResponse {
    pub success: bool,
    #[serde(rename = "type")]
    pub state: BookmarkState,
    pub message: String,
}
