//! Profile and follow-graph endpoint tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::common::TestApp;
use crate::{assert_api_error, assert_status};

fn ids(value: &Value) -> Vec<String> {
    value
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

#[tokio::test]
async fn test_follow_then_unfollow_restores_both_lists() {
    let app = TestApp::new().await;
    let alice = app.create_user("alice").await;
    let bob = app.create_user("bob").await;

    let uri = format!("/api/v1/user/followorunfollow/{}", bob.id);

    let followed = app.post(&uri, &alice, json!({})).await;
    assert_status!(followed, StatusCode::OK);
    assert_eq!(followed.body["message"], "Followed successfully");
    assert_eq!(ids(&followed.body["user"]["following"]), vec![bob.id.to_string()]);
    assert_eq!(ids(&followed.body["targetUser"]["followers"]), vec![alice.id.to_string()]);

    let unfollowed = app.post(&uri, &alice, json!({})).await;
    assert_status!(unfollowed, StatusCode::OK);
    assert_eq!(unfollowed.body["message"], "Unfollowed successfully");
    assert!(ids(&unfollowed.body["user"]["following"]).is_empty());
    assert!(ids(&unfollowed.body["targetUser"]["followers"]).is_empty());

    let profile = app.get(&format!("/api/v1/user/{}/profile", bob.id), &alice).await;
    assert!(ids(&profile.body["user"]["followers"]).is_empty());
}

#[tokio::test]
async fn test_follow_yourself_is_rejected() {
    let app = TestApp::new().await;
    let alice = app.create_user("alice").await;

    let response = app
        .post(&format!("/api/v1/user/followorunfollow/{}", alice.id), &alice, json!({}))
        .await;

    assert_api_error!(
        response,
        StatusCode::BAD_REQUEST,
        "You cannot follow/unfollow yourself"
    );
}

#[tokio::test]
async fn test_follow_unknown_user_is_rejected() {
    let app = TestApp::new().await;
    let alice = app.create_user("alice").await;

    let response = app
        .post(
            &format!("/api/v1/user/followorunfollow/{}", Uuid::new_v4()),
            &alice,
            json!({}),
        )
        .await;

    assert_api_error!(response, StatusCode::BAD_REQUEST, "User not found");
}

#[tokio::test]
async fn test_follow_notifies_but_unfollow_does_not() {
    let app = TestApp::new().await;
    let alice = app.create_user("alice").await;
    let bob = app.create_user("bob").await;
    let uri = format!("/api/v1/user/followorunfollow/{}", bob.id);

    app.post(&uri, &alice, json!({})).await;
    app.post(&uri, &alice, json!({})).await;

    let notifications = app.notifications(&bob).await;
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0]["type"], "follow");
    assert_eq!(notifications[0]["message"], "alice started following you");
    assert_eq!(notifications[0]["from"]["username"], "alice");
    assert_eq!(notifications[0]["post"], Value::Null);
}

#[tokio::test]
async fn test_profile_of_unknown_user_is_404() {
    let app = TestApp::new().await;
    let alice = app.create_user("alice").await;

    let response = app
        .get(&format!("/api/v1/user/{}/profile", Uuid::new_v4()), &alice)
        .await;

    assert_api_error!(response, StatusCode::NOT_FOUND, "User not found");
}

#[tokio::test]
async fn test_profile_lists_posts_and_bookmarks() {
    let app = TestApp::new().await;
    let alice = app.create_user("alice").await;
    let bob = app.create_user("bob").await;

    let first = app.create_post(&alice, "first").await;
    let second = app.create_post(&alice, "second").await;
    app.get(&format!("/api/v1/post/{first}/bookmark"), &bob).await;

    let alice_profile = app.get(&format!("/api/v1/user/{}/profile", alice.id), &bob).await;
    assert_status!(alice_profile, StatusCode::OK);
    let posts = alice_profile.body["user"]["posts"].as_array().unwrap();
    assert_eq!(posts.len(), 2);
    assert_eq!(posts[0]["_id"], second.to_string());
    assert_eq!(posts[0]["author"]["username"], "alice");

    let bob_profile = app.get(&format!("/api/v1/user/{}/profile", bob.id), &bob).await;
    let bookmarks = bob_profile.body["user"]["bookmarks"].as_array().unwrap();
    assert_eq!(bookmarks.len(), 1);
    assert_eq!(bookmarks[0]["caption"], "first");
}

#[tokio::test]
async fn test_edit_profile_updates_only_given_fields() {
    let app = TestApp::new().await;
    let alice = app.create_user("alice").await;

    let response = app
        .post(
            "/api/v1/user/profile/edit",
            &alice,
            json!({ "bio": "hello there", "gender": "female" }),
        )
        .await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["message"], "Profile updated.");
    assert_eq!(response.body["user"]["bio"], "hello there");
    assert_eq!(response.body["user"]["gender"], "female");

    let response = app
        .post(
            "/api/v1/user/profile/edit",
            &alice,
            json!({ "profilePicture": "https://images.example.com/a.png", "bio": "" }),
        )
        .await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["user"]["bio"], "hello there");
    assert_eq!(
        response.body["user"]["profilePicture"],
        "https://images.example.com/a.png"
    );
}

#[tokio::test]
async fn test_edit_profile_ignores_empty_gender() {
    let app = TestApp::new().await;
    let alice = app.create_user("alice").await;

    app.post("/api/v1/user/profile/edit", &alice, json!({ "gender": "male" }))
        .await;

    let response = app
        .post(
            "/api/v1/user/profile/edit",
            &alice,
            json!({ "gender": "", "bio": "x" }),
        )
        .await;

    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["user"]["gender"], "male");
    assert_eq!(response.body["user"]["bio"], "x");
}

#[tokio::test]
async fn test_edit_profile_rejects_unknown_gender() {
    let app = TestApp::new().await;
    let alice = app.create_user("alice").await;

    let response = app
        .post("/api/v1/user/profile/edit", &alice, json!({ "gender": "robot" }))
        .await;

    assert_api_error!(
        response,
        StatusCode::BAD_REQUEST,
        "Unknown gender value: 'robot'"
    );
}

#[tokio::test]
async fn test_edit_profile_rejects_long_bio() {
    let app = TestApp::new().await;
    let alice = app.create_user("alice").await;

    let response = app
        .post(
            "/api/v1/user/profile/edit",
            &alice,
            json!({ "bio": "x".repeat(151) }),
        )
        .await;

    assert_status!(response, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["success"], false);
}

#[tokio::test]
async fn test_suggested_users_excludes_caller() {
    let app = TestApp::new().await;
    let alice = app.create_user("alice").await;
    app.create_user("bob").await;
    app.create_user("carol").await;

    let response = app.get("/api/v1/user/suggested", &alice).await;
    assert_status!(response, StatusCode::OK);

    let mut names: Vec<String> = response.body["users"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|u| u["username"].as_str().map(str::to_string))
        .collect();
    names.sort();
    assert_eq!(names, vec!["bob".to_string(), "carol".to_string()]);
}
