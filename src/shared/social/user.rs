//! User wire types
//!
//! Profiles, the compact author summary embedded in posts/comments/notifications,
//! and the request/response bodies of the user endpoints.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::shared::error::SharedError;
use crate::shared::social::PostView;

/// Self-declared gender on a profile
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

impl FromStr for Gender {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            other => Err(SharedError::unknown_variant("gender", other)),
        }
    }
}

/// The `{_id, username, profilePicture}` projection used wherever a user is
/// referenced from another record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub username: String,
    pub profile_picture: String,
}

/// A user profile
///
/// `P` is what the `posts` and `bookmarks` lists hold: plain post ids for the
/// compact form, or fully populated [`PostView`]s on the profile page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile<P = Uuid> {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub profile_picture: String,
    pub bio: String,
    pub gender: Option<Gender>,
    /// Ids of users following this user
    pub followers: Vec<Uuid>,
    /// Ids of users this user follows
    pub following: Vec<Uuid>,
    pub posts: Vec<P>,
    pub bookmarks: Vec<P>,
    pub created_at: DateTime<Utc>,
}

/// Body of `POST /api/v1/user/profile/edit`
///
/// Absent or empty fields leave the stored value untouched. `gender` stays a
/// string on the wire so an empty value can be ignored; parse it with
/// [`Gender::from_str`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EditProfileRequest {
    #[validate(length(max = 150, message = "Bio must be at most 150 characters"))]
    pub bio: Option<String>,
    pub gender: Option<String>,
    #[validate(url(message = "Profile picture must be a URL"))]
    pub profile_picture: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub success: bool,
    pub user: UserProfile<PostView>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditProfileResponse {
    pub success: bool,
    pub message: String,
    pub user: UserProfile,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestedUsersResponse {
    pub success: bool,
    pub users: Vec<UserProfile>,
}

/// Response of the follow toggle, carrying both refreshed profiles
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowResponse {
    pub success: bool,
    pub message: String,
    pub user: UserProfile,
    pub target_user: UserProfile,
}
