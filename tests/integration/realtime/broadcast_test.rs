//! Hub delivery driven by real API actions

use serde_json::json;
use socialgram::shared::EventType;
use tokio::time::{timeout, Duration};

use crate::common::TestApp;

#[tokio::test]
async fn test_like_is_pushed_to_every_connection_of_the_author() {
    let app = TestApp::new().await;
    let alice = app.create_user("alice").await;
    let bob = app.create_user("bob").await;
    let post = app.create_post(&alice, "sky").await;

    let mut phone = app.state.hub.subscribe(alice.id).await;
    let mut laptop = app.state.hub.subscribe(alice.id).await;
    let mut bystander = app.state.hub.subscribe(bob.id).await;

    app.get(&format!("/api/v1/post/{post}/like"), &bob).await;

    for rx in [&mut phone, &mut laptop] {
        let event = timeout(Duration::from_secs(1), rx.recv())
            .await
            .expect("Timed out waiting for event")
            .unwrap();
        assert_eq!(event.event_type, EventType::Notification);
        assert_eq!(event.payload["message"], "bob liked your post");
        assert_eq!(event.payload["from"]["_id"], bob.id.to_string());
    }

    assert!(bystander.try_recv().is_err());
}

#[tokio::test]
async fn test_reading_pushes_new_unread_count() {
    let app = TestApp::new().await;
    let alice = app.create_user("alice").await;
    let bob = app.create_user("bob").await;

    app.post(&format!("/api/v1/user/followorunfollow/{}", alice.id), &bob, json!({}))
        .await;

    let mut rx = app.state.hub.subscribe(alice.id).await;
    app.put("/api/v1/notification/read-all", &alice).await;

    let event = timeout(Duration::from_secs(1), rx.recv())
        .await
        .expect("Timed out waiting for event")
        .unwrap();
    assert_eq!(event.event_type, EventType::UnreadCount);
    assert_eq!(event.payload["unreadCount"], 0);
}

#[tokio::test]
async fn test_offline_users_still_get_stored_notifications() {
    let app = TestApp::new().await;
    let alice = app.create_user("alice").await;
    let bob = app.create_user("bob").await;

    assert!(!app.state.hub.is_connected(alice.id).await);
    app.post(&format!("/api/v1/user/followorunfollow/{}", alice.id), &bob, json!({}))
        .await;

    assert_eq!(app.notifications(&alice).await.len(), 1);
}

#[tokio::test]
async fn test_sweep_drops_channels_without_listeners() {
    let app = TestApp::new().await;
    let alice = app.create_user("alice").await;
    let bob = app.create_user("bob").await;

    let _alice_rx = app.state.hub.subscribe(alice.id).await;
    drop(app.state.hub.subscribe(bob.id).await);
    assert_eq!(app.state.hub.channel_count().await, 2);

    assert_eq!(app.state.hub.cleanup_inactive_channels().await, 1);
    assert_eq!(app.state.hub.channel_count().await, 1);
    assert!(app.state.hub.is_connected(alice.id).await);
}
