/**
 * Server Initialization
 *
 * Builds the application from a [`ServerConfig`]:
 *
 * 1. Open the database pool and run migrations
 * 2. Create the shared state and the realtime hub
 * 3. Start the periodic sweep of idle realtime channels
 * 4. Create the router
 */

use std::time::Duration;

use axum::Router;

use crate::backend::error::BackendError;
use crate::backend::realtime::NotificationHub;
use crate::backend::routes::create_router;
use crate::backend::server::config::{load_database, ServerConfig};
use crate::backend::server::state::AppState;

/// Interval between sweeps of channels nobody listens to anymore
const CHANNEL_SWEEP_INTERVAL: Duration = Duration::from_secs(300);

/// Create and configure the Axum application
pub async fn create_app(config: ServerConfig) -> Result<Router<()>, BackendError> {
    tracing::info!("Initializing socialgram backend server");

    let db_pool = load_database(&config).await?;
    let app_state = AppState::new(db_pool, config);

    spawn_channel_sweep(app_state.hub.clone());

    let app = create_router(app_state);
    tracing::info!("Router configured with periodic cleanup task");

    Ok(app)
}

/// Periodically drop realtime channels without receivers
pub fn spawn_channel_sweep(hub: NotificationHub) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(CHANNEL_SWEEP_INTERVAL);
        loop {
            interval.tick().await;
            let removed = hub.cleanup_inactive_channels().await;
            tracing::debug!("Cleaned up {} inactive notification channels", removed);
        }
    })
}
