/**
 * API Routes
 *
 * Every endpoint lives under `/api/v1` and requires a session token; the
 * auth middleware is applied as a route layer so unknown API paths still get
 * a plain JSON 404.
 *
 * ## User (`/api/v1/user`)
 * - `GET  /{id}/profile`
 * - `POST /profile/edit`
 * - `GET  /suggested`
 * - `POST /followorunfollow/{id}`
 *
 * ## Post (`/api/v1/post`)
 * - `POST   /addpost`
 * - `GET    /all`
 * - `GET    /userpost/all`
 * - `GET    /{id}/like`
 * - `GET    /{id}/dislike`
 * - `POST   /{id}/comment`
 * - `GET    /{id}/comment/all`
 * - `DELETE /delete/{id}`
 * - `GET    /{id}/bookmark`
 *
 * ## Notification (`/api/v1/notification`)
 * - `GET    /`
 * - `GET    /unread-count`
 * - `GET    /stream`
 * - `PUT    /{id}/read`
 * - `PUT    /read-all`
 * - `DELETE /{id}`
 * - `DELETE /delete-all`
 */

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};

use crate::backend::error::BackendError;
use crate::backend::middleware::auth_middleware;
use crate::backend::notifications::handlers as notification_handlers;
use crate::backend::posts::handlers as post_handlers;
use crate::backend::realtime::handle_notification_stream;
use crate::backend::server::state::AppState;
use crate::backend::users::handlers as user_handlers;

/// Path prefix of the JSON API
pub const API_PREFIX: &str = "/api/v1";

fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/{id}/profile", get(user_handlers::get_profile))
        .route("/profile/edit", post(user_handlers::edit_profile))
        .route("/suggested", get(user_handlers::suggested_users))
        .route("/followorunfollow/{id}", post(user_handlers::follow_or_unfollow))
}

fn post_routes() -> Router<AppState> {
    Router::new()
        .route("/addpost", post(post_handlers::add_post))
        .route("/all", get(post_handlers::get_all_posts))
        .route("/userpost/all", get(post_handlers::get_user_posts))
        .route("/{id}/like", get(post_handlers::like_post))
        .route("/{id}/dislike", get(post_handlers::dislike_post))
        .route("/{id}/comment", post(post_handlers::add_comment))
        .route("/{id}/comment/all", get(post_handlers::get_comments_of_post))
        .route("/delete/{id}", delete(post_handlers::delete_post))
        .route("/{id}/bookmark", get(post_handlers::bookmark_post))
}

fn notification_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(notification_handlers::get_notifications))
        .route("/unread-count", get(notification_handlers::get_unread_count))
        .route("/stream", get(handle_notification_stream))
        .route("/{id}/read", put(notification_handlers::mark_as_read))
        .route("/read-all", put(notification_handlers::mark_all_as_read))
        .route("/{id}", delete(notification_handlers::delete_notification))
        .route("/delete-all", delete(notification_handlers::delete_all_notifications))
}

async fn api_not_found() -> BackendError {
    BackendError::not_found("Route not found")
}

/// Configure API routes
///
/// Nests the API under [`API_PREFIX`] on `router`, gated by the auth
/// middleware.
pub fn configure_api_routes(router: Router<AppState>, app_state: &AppState) -> Router<AppState> {
    let api = Router::new()
        .nest("/user", user_routes())
        .nest("/post", post_routes())
        .nest("/notification", notification_routes())
        .route_layer(middleware::from_fn_with_state(
            app_state.clone(),
            auth_middleware,
        ))
        .fallback(api_not_found);

    router.nest(API_PREFIX, api)
}
