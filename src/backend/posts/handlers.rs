//! Post HTTP Handlers
//!
//! Creating, listing and deleting posts, likes, comments and bookmarks.
//! Likes and comments notify the post's author; comments also notify every
//! user mentioned in the text.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::WithRejection;
use uuid::Uuid;
use validator::Validate;

use crate::backend::error::{ApiResult, BackendError};
use crate::backend::middleware::AuthUser;
use crate::backend::notifications::{self, NewNotification};
use crate::backend::server::state::AppState;
use crate::backend::users::db::{get_user_by_id, get_user_by_username, UserRecord};
use crate::shared::social::{
    BookmarkResponse, BookmarkState, CommentResponse, CommentsResponse, CreateCommentRequest,
    CreatePostRequest, MessageResponse, NotificationKind, PostResponse, PostsResponse,
};

use super::db::{self, PostRecord};
use super::mentions::extract_mentions;

async fn require_post(state: &AppState, post_id: Uuid) -> ApiResult<PostRecord> {
    db::get_post(&state.db_pool, post_id)
        .await?
        .ok_or_else(|| BackendError::not_found("Post not found"))
}

async fn require_user(state: &AppState, user_id: Uuid) -> ApiResult<UserRecord> {
    get_user_by_id(&state.db_pool, user_id)
        .await?
        .ok_or_else(|| BackendError::not_found("User not found"))
}

/// Create a post (POST /api/v1/post/addpost)
pub async fn add_post(
    State(state): State<AppState>,
    user: AuthUser,
    WithRejection(Json(request), _): WithRejection<Json<CreatePostRequest>, BackendError>,
) -> ApiResult<(StatusCode, Json<PostResponse>)> {
    request.validate()?;

    let post = db::create_post(
        &state.db_pool,
        user.id(),
        &request.caption,
        request.image.trim(),
    )
    .await?;

    let post = db::load_post_view(&state.db_pool, post)
        .await?
        .ok_or_else(|| BackendError::not_found("User not found"))?;

    tracing::info!("Post {} created by {}", post.id, post.author.username);

    Ok((
        StatusCode::CREATED,
        Json(PostResponse {
            success: true,
            message: "Post created successfully".to_string(),
            post,
        }),
    ))
}

/// Every post, newest first (GET /api/v1/post/all)
pub async fn get_all_posts(State(state): State<AppState>) -> ApiResult<Json<PostsResponse>> {
    let posts = db::load_post_views(&state.db_pool, db::list_posts(&state.db_pool).await?).await?;
    Ok(Json(PostsResponse {
        success: true,
        posts,
    }))
}

/// The caller's posts, newest first (GET /api/v1/post/userpost/all)
pub async fn get_user_posts(
    State(state): State<AppState>,
    user: AuthUser,
) -> ApiResult<Json<PostsResponse>> {
    let records = db::list_posts_by_author(&state.db_pool, user.id()).await?;
    let posts = db::load_post_views(&state.db_pool, records).await?;
    Ok(Json(PostsResponse {
        success: true,
        posts,
    }))
}

/// Like a post (GET /api/v1/post/{id}/like)
pub async fn like_post(
    State(state): State<AppState>,
    user: AuthUser,
    WithRejection(Path(post_id), _): WithRejection<Path<Uuid>, BackendError>,
) -> ApiResult<Json<MessageResponse>> {
    let post = require_post(&state, post_id).await?;
    let liker = require_user(&state, user.id()).await?;

    db::add_like(&state.db_pool, post_id, liker.id).await?;

    notifications::dispatch(
        &state.db_pool,
        &state.hub,
        &state.notification_policy(),
        NewNotification {
            from: liker.id,
            to: post.author_id,
            kind: NotificationKind::Like,
            message: format!("{} liked your post", liker.username),
            post_id: Some(post_id),
        },
    )
    .await;

    Ok(Json(MessageResponse::ok("Post liked")))
}

/// Remove a like (GET /api/v1/post/{id}/dislike)
///
/// The like notification, if any, is left in place.
pub async fn dislike_post(
    State(state): State<AppState>,
    user: AuthUser,
    WithRejection(Path(post_id), _): WithRejection<Path<Uuid>, BackendError>,
) -> ApiResult<Json<MessageResponse>> {
    require_post(&state, post_id).await?;
    db::remove_like(&state.db_pool, post_id, user.id()).await?;
    Ok(Json(MessageResponse::ok("Post disliked")))
}

/// Comment on a post (POST /api/v1/post/{id}/comment)
pub async fn add_comment(
    State(state): State<AppState>,
    user: AuthUser,
    WithRejection(Path(post_id), _): WithRejection<Path<Uuid>, BackendError>,
    WithRejection(Json(request), _): WithRejection<Json<CreateCommentRequest>, BackendError>,
) -> ApiResult<(StatusCode, Json<CommentResponse>)> {
    let post = require_post(&state, post_id).await?;
    request.validate()?;

    let commenter = require_user(&state, user.id()).await?;
    let comment = db::create_comment(&state.db_pool, post_id, commenter.id, &request.text).await?;

    let policy = state.notification_policy();

    notifications::dispatch(
        &state.db_pool,
        &state.hub,
        &policy,
        NewNotification {
            from: commenter.id,
            to: post.author_id,
            kind: NotificationKind::Comment,
            message: format!("{} commented on your post", commenter.username),
            post_id: Some(post_id),
        },
    )
    .await;

    for username in extract_mentions(&request.text) {
        let mentioned = match get_user_by_username(&state.db_pool, &username).await {
            Ok(Some(mentioned)) => mentioned,
            Ok(None) => continue,
            Err(e) => {
                tracing::error!("Error resolving mention @{}: {}", username, e);
                continue;
            }
        };

        notifications::dispatch(
            &state.db_pool,
            &state.hub,
            &policy,
            NewNotification {
                from: commenter.id,
                to: mentioned.id,
                kind: NotificationKind::Mention,
                message: format!("{} mentioned you in a comment", commenter.username),
                post_id: Some(post_id),
            },
        )
        .await;
    }

    Ok((
        StatusCode::CREATED,
        Json(CommentResponse {
            success: true,
            message: "Comment Added".to_string(),
            comment,
        }),
    ))
}

/// Comments of a post, oldest first (GET /api/v1/post/{id}/comment/all)
pub async fn get_comments_of_post(
    State(state): State<AppState>,
    WithRejection(Path(post_id), _): WithRejection<Path<Uuid>, BackendError>,
) -> ApiResult<Json<CommentsResponse>> {
    let comments = db::comments_for_post(&state.db_pool, post_id, false).await?;
    Ok(Json(CommentsResponse {
        success: true,
        comments,
    }))
}

/// Delete the caller's post (DELETE /api/v1/post/delete/{id})
pub async fn delete_post(
    State(state): State<AppState>,
    user: AuthUser,
    WithRejection(Path(post_id), _): WithRejection<Path<Uuid>, BackendError>,
) -> ApiResult<Json<MessageResponse>> {
    let post = require_post(&state, post_id).await?;
    if post.author_id != user.id() {
        return Err(BackendError::forbidden("Unauthorized"));
    }

    db::delete_post_cascade(&state.db_pool, post_id).await?;
    tracing::info!("Post {} deleted by its author", post_id);

    Ok(Json(MessageResponse::ok("Post deleted successfully")))
}

/// Toggle a bookmark (GET /api/v1/post/{id}/bookmark)
pub async fn bookmark_post(
    State(state): State<AppState>,
    user: AuthUser,
    WithRejection(Path(post_id), _): WithRejection<Path<Uuid>, BackendError>,
) -> ApiResult<Json<BookmarkResponse>> {
    require_post(&state, post_id).await?;
    let user = require_user(&state, user.id()).await?;

    let (state_after, message) = if db::is_bookmarked(&state.db_pool, user.id, post_id).await? {
        db::remove_bookmark(&state.db_pool, user.id, post_id).await?;
        (BookmarkState::Unsaved, "Post removed from bookmark")
    } else {
        db::add_bookmark(&state.db_pool, user.id, post_id).await?;
        (BookmarkState::Saved, "Post bookmarked")
    };

    Ok(Json(BookmarkResponse {
        success: true,
        state: state_after,
        message: message.to_string(),
    }))
}
