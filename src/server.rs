use crate::config::Config;
use crate::routes::{
    AppState, accept_quest, cancel_quest, get_schedule, get_scores, health, ignore_quest,
    list_quests, post_score, ready, restore_quest, save_schedule, update_profile, whoami,
};
use crate::store::SqliteStore;
use anyhow::Result;
use axum::{
    Router,
    routing::{get, post},
};
use sidequest_shared::WeekId;
use sqlx::sqlite::SqlitePoolOptions;
use tower_http::trace::TraceLayer;

/// The full application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/ready", get(ready))
        .route("/api/whoami", get(whoami))
        .route("/api/preferences", post(update_profile))
        .route("/api/quests", get(list_quests))
        .route("/api/quests/accept", post(accept_quest))
        .route("/api/quests/cancel", post(cancel_quest))
        .route("/api/quests/ignore", post(ignore_quest))
        .route("/api/quests/restore", post(restore_quest))
        .route("/api/schedule", get(get_schedule).post(save_schedule))
        .route("/api/score", post(post_score))
        .route("/api/scores", get(get_scores))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tracing::instrument(skip(config))]
pub async fn serve(config: Config, host: String, port: u16) -> Result<()> {
    tracing::info!("Starting sidequest server...");

    let db_pool = SqlitePoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await?;

    let store = SqliteStore::new(db_pool);
    let history_start = WeekId::containing(config.schedule.history_start);
    let state = AppState::new(store, history_start);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app(state)).await?;

    Ok(())
}
