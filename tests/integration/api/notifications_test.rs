//! Notification rules and endpoint tests

use std::time::Duration;

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use uuid::Uuid;

use crate::common::TestApp;
use crate::{assert_api_error, assert_status};

#[tokio::test]
async fn test_repeated_like_notifies_once() {
    let app = TestApp::new().await;
    let alice = app.create_user("alice").await;
    let bob = app.create_user("bob").await;
    let post = app.create_post(&alice, "dog").await;

    app.get(&format!("/api/v1/post/{post}/like"), &bob).await;
    app.get(&format!("/api/v1/post/{post}/dislike"), &bob).await;
    app.get(&format!("/api/v1/post/{post}/like"), &bob).await;

    let notifications = app.notifications(&alice).await;
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0]["type"], "like");
    assert_eq!(notifications[0]["message"], "bob liked your post");
    assert_eq!(notifications[0]["isRead"], false);
    assert_eq!(notifications[0]["post"]["_id"], post.to_string());
    assert_eq!(
        notifications[0]["post"]["image"],
        "https://images.example.com/p.jpg"
    );
}

#[tokio::test]
async fn test_zero_dedup_window_keeps_every_like() {
    let config = TestApp::config()
        .dedup_window(Duration::ZERO)
        .build()
        .unwrap();
    let app = TestApp::with_config(config).await;
    let alice = app.create_user("alice").await;
    let bob = app.create_user("bob").await;
    let post = app.create_post(&alice, "dog").await;

    app.get(&format!("/api/v1/post/{post}/like"), &bob).await;
    app.get(&format!("/api/v1/post/{post}/like"), &bob).await;

    assert_eq!(app.notifications(&alice).await.len(), 2);
}

#[tokio::test]
async fn test_own_activity_does_not_notify() {
    let app = TestApp::new().await;
    let alice = app.create_user("alice").await;
    let post = app.create_post(&alice, "selfie").await;

    app.get(&format!("/api/v1/post/{post}/like"), &alice).await;
    app.post(
        &format!("/api/v1/post/{post}/comment"),
        &alice,
        json!({ "text": "me again @alice" }),
    )
    .await;

    assert!(app.notifications(&alice).await.is_empty());
}

#[tokio::test]
async fn test_mentions_notify_each_known_user_once() {
    let app = TestApp::new().await;
    let alice = app.create_user("alice").await;
    let bob = app.create_user("bob").await;
    let carol = app.create_user("carol").await;
    let post = app.create_post(&alice, "party").await;

    let response = app
        .post(
            &format!("/api/v1/post/{post}/comment"),
            &bob,
            json!({ "text": "@carol look! @carol @nobody @alice" }),
        )
        .await;
    assert_status!(response, StatusCode::CREATED);

    let carol_notifications = app.notifications(&carol).await;
    assert_eq!(carol_notifications.len(), 1);
    assert_eq!(carol_notifications[0]["type"], "mention");
    assert_eq!(
        carol_notifications[0]["message"],
        "bob mentioned you in a comment"
    );

    let kinds: Vec<String> = app
        .notifications(&alice)
        .await
        .iter()
        .filter_map(|n| n["type"].as_str().map(str::to_string))
        .collect();
    assert_eq!(kinds, vec!["mention".to_string(), "comment".to_string()]);
}

#[tokio::test]
async fn test_retention_keeps_newest() {
    let config = TestApp::config()
        .notification_retention(3)
        .build()
        .unwrap();
    let app = TestApp::with_config(config).await;
    let alice = app.create_user("alice").await;
    let bob = app.create_user("bob").await;

    let mut posts = Vec::new();
    for i in 0..5 {
        posts.push(app.create_post(&alice, &format!("post {i}")).await);
    }
    for post in &posts {
        app.get(&format!("/api/v1/post/{post}/like"), &bob).await;
    }

    let notifications = app.notifications(&alice).await;
    let liked: Vec<String> = notifications
        .iter()
        .filter_map(|n| n["post"]["_id"].as_str().map(str::to_string))
        .collect();
    let expected: Vec<String> = posts.iter().rev().take(3).map(|p| p.to_string()).collect();
    assert_eq!(liked, expected);
}

#[tokio::test]
async fn test_pagination_reports_has_more() {
    let config = TestApp::config().page_size(2).build().unwrap();
    let app = TestApp::with_config(config).await;
    let alice = app.create_user("alice").await;
    let bob = app.create_user("bob").await;

    for i in 0..3 {
        let post = app.create_post(&alice, &format!("post {i}")).await;
        app.get(&format!("/api/v1/post/{post}/like"), &bob).await;
    }

    let first = app.get("/api/v1/notification", &alice).await;
    assert_status!(first, StatusCode::OK);
    assert_eq!(first.body["notifications"].as_array().unwrap().len(), 2);
    assert_eq!(first.body["currentPage"], 1);
    assert_eq!(first.body["hasMore"], true);
    assert_eq!(first.body["unreadCount"], 3);

    let second = app.get("/api/v1/notification?page=2", &alice).await;
    assert_eq!(second.body["notifications"].as_array().unwrap().len(), 1);
    assert_eq!(second.body["currentPage"], 2);
    assert_eq!(second.body["hasMore"], false);

    let garbage = app.get("/api/v1/notification?page=abc&limit=-4", &alice).await;
    assert_status!(garbage, StatusCode::OK);
    assert_eq!(garbage.body["currentPage"], 1);
}

#[tokio::test]
async fn test_mark_read_and_unread_count() {
    let app = TestApp::new().await;
    let alice = app.create_user("alice").await;
    let bob = app.create_user("bob").await;
    let carol = app.create_user("carol").await;

    app.post(&format!("/api/v1/user/followorunfollow/{}", alice.id), &bob, json!({}))
        .await;
    app.post(&format!("/api/v1/user/followorunfollow/{}", alice.id), &carol, json!({}))
        .await;

    let count = app.get("/api/v1/notification/unread-count", &alice).await;
    assert_eq!(count.body["unreadCount"], 2);

    let notifications = app.notifications(&alice).await;
    let id = notifications[0]["_id"].as_str().unwrap().to_string();

    let response = app.put(&format!("/api/v1/notification/{id}/read"), &alice).await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["message"], "Notification marked as read");

    let count = app.get("/api/v1/notification/unread-count", &alice).await;
    assert_eq!(count.body["unreadCount"], 1);

    let response = app.put("/api/v1/notification/read-all", &alice).await;
    assert_eq!(response.body["message"], "All notifications marked as read");

    let count = app.get("/api/v1/notification/unread-count", &alice).await;
    assert_eq!(count.body["unreadCount"], 0);
    assert_eq!(app.notifications(&alice).await.len(), 2);
}

#[tokio::test]
async fn test_other_users_notifications_are_invisible() {
    let app = TestApp::new().await;
    let alice = app.create_user("alice").await;
    let bob = app.create_user("bob").await;

    app.post(&format!("/api/v1/user/followorunfollow/{}", alice.id), &bob, json!({}))
        .await;
    let id = app.notifications(&alice).await[0]["_id"]
        .as_str()
        .unwrap()
        .to_string();

    let read = app.put(&format!("/api/v1/notification/{id}/read"), &bob).await;
    assert_api_error!(read, StatusCode::NOT_FOUND, "Notification not found");

    let deleted = app.delete(&format!("/api/v1/notification/{id}"), &bob).await;
    assert_api_error!(deleted, StatusCode::NOT_FOUND, "Notification not found");

    let missing = app
        .delete(&format!("/api/v1/notification/{}", Uuid::new_v4()), &alice)
        .await;
    assert_api_error!(missing, StatusCode::NOT_FOUND, "Notification not found");

    assert_eq!(app.notifications(&alice).await.len(), 1);
}

#[tokio::test]
async fn test_delete_one_and_delete_all() {
    let app = TestApp::new().await;
    let alice = app.create_user("alice").await;
    let bob = app.create_user("bob").await;
    let carol = app.create_user("carol").await;

    app.post(&format!("/api/v1/user/followorunfollow/{}", alice.id), &bob, json!({}))
        .await;
    app.post(&format!("/api/v1/user/followorunfollow/{}", alice.id), &carol, json!({}))
        .await;

    let id = app.notifications(&alice).await[0]["_id"]
        .as_str()
        .unwrap()
        .to_string();
    let response = app.delete(&format!("/api/v1/notification/{id}"), &alice).await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["message"], "Notification deleted successfully");
    assert_eq!(app.notifications(&alice).await.len(), 1);

    let response = app.delete("/api/v1/notification/delete-all", &alice).await;
    assert_eq!(response.body["message"], "All notifications deleted successfully");
    assert!(app.notifications(&alice).await.is_empty());
}

#[tokio::test]
async fn test_malformed_notification_id_is_json_400() {
    let app = TestApp::new().await;
    let alice = app.create_user("alice").await;

    let response = app.put("/api/v1/notification/42/read", &alice).await;

    assert_status!(response, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["success"], false);
}
