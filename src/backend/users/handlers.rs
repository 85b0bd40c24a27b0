//! User HTTP Handlers
//!
//! Profiles, profile editing, suggestions and the follow toggle.

use axum::{
    extract::{Path, State},
    Json,
};
use axum_extra::extract::WithRejection;
use uuid::Uuid;
use validator::Validate;

use crate::backend::error::{ApiResult, BackendError};
use crate::backend::middleware::AuthUser;
use crate::backend::notifications::{self, NewNotification};
use crate::backend::posts::db::{bookmarked_posts, list_posts_by_author, load_post_views};
use crate::backend::server::state::AppState;
use crate::shared::social::{
    EditProfileRequest, EditProfileResponse, FollowResponse, Gender, NotificationKind,
    ProfileResponse, SuggestedUsersResponse,
};

use super::db;

/// Empty strings in an edit request mean "leave as is"
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Get a user's profile (GET /api/v1/user/{id}/profile)
///
/// Posts (newest first) and bookmarks come back fully populated.
pub async fn get_profile(
    State(state): State<AppState>,
    WithRejection(Path(user_id), _): WithRejection<Path<Uuid>, BackendError>,
) -> ApiResult<Json<ProfileResponse>> {
    let pool = &state.db_pool;

    let user = db::get_user_by_id(pool, user_id)
        .await?
        .ok_or_else(|| BackendError::not_found("User not found"))?;

    let posts = load_post_views(pool, list_posts_by_author(pool, user_id).await?).await?;
    let bookmarks = load_post_views(pool, bookmarked_posts(pool, user_id).await?).await?;
    let followers = db::follower_ids(pool, user_id).await?;
    let following = db::following_ids(pool, user_id).await?;

    Ok(Json(ProfileResponse {
        success: true,
        user: db::profile_from_parts(user, followers, following, posts, bookmarks),
    }))
}

/// Edit the caller's profile (POST /api/v1/user/profile/edit)
pub async fn edit_profile(
    State(state): State<AppState>,
    user: AuthUser,
    WithRejection(Json(request), _): WithRejection<Json<EditProfileRequest>, BackendError>,
) -> ApiResult<Json<EditProfileResponse>> {
    let request = EditProfileRequest {
        bio: non_empty(request.bio),
        gender: non_empty(request.gender),
        profile_picture: non_empty(request.profile_picture),
    };
    request.validate()?;
    let gender = request
        .gender
        .as_deref()
        .map(str::parse::<Gender>)
        .transpose()?;

    let updated = db::update_profile(
        &state.db_pool,
        user.id(),
        request.bio.as_deref(),
        gender,
        request.profile_picture.as_deref(),
    )
    .await?
    .ok_or_else(|| BackendError::not_found("User not found."))?;

    tracing::info!("Profile of {} updated", updated.username);

    Ok(Json(EditProfileResponse {
        success: true,
        message: "Profile updated.".to_string(),
        user: db::load_profile(&state.db_pool, updated).await?,
    }))
}

/// Every user except the caller (GET /api/v1/user/suggested)
pub async fn suggested_users(
    State(state): State<AppState>,
    user: AuthUser,
) -> ApiResult<Json<SuggestedUsersResponse>> {
    let records = db::list_users_except(&state.db_pool, user.id()).await?;

    let mut users = Vec::with_capacity(records.len());
    for record in records {
        users.push(db::load_profile(&state.db_pool, record).await?);
    }

    Ok(Json(SuggestedUsersResponse {
        success: true,
        users,
    }))
}

/// Follow or unfollow a user (POST /api/v1/user/followorunfollow/{id})
pub async fn follow_or_unfollow(
    State(state): State<AppState>,
    user: AuthUser,
    WithRejection(Path(target_id), _): WithRejection<Path<Uuid>, BackendError>,
) -> ApiResult<Json<FollowResponse>> {
    let pool = &state.db_pool;
    let follower_id = user.id();

    if follower_id == target_id {
        return Err(BackendError::bad_request("You cannot follow/unfollow yourself"));
    }

    let follower = db::get_user_by_id(pool, follower_id).await?;
    let target = db::get_user_by_id(pool, target_id).await?;
    let (Some(follower), Some(target)) = (follower, target) else {
        return Err(BackendError::bad_request("User not found"));
    };

    let message = if db::is_following(pool, follower_id, target_id).await? {
        db::unfollow(pool, follower_id, target_id).await?;
        tracing::info!("{} unfollowed {}", follower.username, target.username);
        "Unfollowed successfully"
    } else {
        db::follow(pool, follower_id, target_id).await?;
        tracing::info!("{} followed {}", follower.username, target.username);

        notifications::dispatch(
            pool,
            &state.hub,
            &state.notification_policy(),
            NewNotification {
                from: follower_id,
                to: target_id,
                kind: NotificationKind::Follow,
                message: format!("{} started following you", follower.username),
                post_id: None,
            },
        )
        .await;

        "Followed successfully"
    };

    Ok(Json(FollowResponse {
        success: true,
        message: message.to_string(),
        user: db::load_profile(pool, follower).await?,
        target_user: db::load_profile(pool, target).await?,
    }))
}
