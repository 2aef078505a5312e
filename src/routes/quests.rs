use crate::error::AppError;
use crate::routes::{AppState, current_week, session::SessionUser};
use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use sidequest_quest::generate;
use sidequest_schedule::{PlannerState, QuestFilters};
use sidequest_shared::{Quest, WeekId};
use sidequest_user::{Preferences, UserDoc, UserStore};
use std::sync::Arc;

/// The candidate list for one user, generated on first use and cached for
/// the rest of the session.
async fn candidates_for(
    state: &AppState,
    user_id: &str,
    preferences: Option<&Preferences>,
) -> Arc<Vec<Quest>> {
    if let Some(cached) = state.quests.read().await.get(user_id) {
        return cached.clone();
    }

    // ThreadRng is not Send; keep it scoped away from the awaits.
    let generated = {
        let mut rng = rand::rng();
        Arc::new(generate(&state.catalog, preferences, &mut rng))
    };

    state
        .quests
        .write()
        .await
        .insert(user_id.to_string(), generated.clone());
    tracing::debug!(user = %user_id, count = generated.len(), "quest candidates generated");
    generated
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestQuery {
    pub week: WeekId,
    #[serde(default)]
    pub min_match: u8,
    #[serde(default)]
    pub exclude_meals: bool,
}

/// GET /api/quests - quests offerable for one week, best match first.
pub async fn list_quests(
    State(state): State<AppState>,
    user: SessionUser,
    Query(query): Query<QuestQuery>,
) -> Result<Json<Vec<Quest>>, AppError> {
    let doc = state
        .store
        .fetch(&user.0)
        .await?
        .unwrap_or_else(UserDoc::default);
    let candidates = candidates_for(&state, &user.0, doc.preferences.as_ref()).await;

    let planner = PlannerState::from_doc(&doc);
    let filters = QuestFilters {
        min_match_percent: query.min_match,
        exclude_meals: query.exclude_meals,
    };
    Ok(Json(planner.available(query.week, &candidates, &filters)))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcceptRequest {
    pub week: WeekId,
    pub quest_id: String,
}

/// POST /api/quests/accept - take a quest onto the week's grid.
pub async fn accept_quest(
    State(state): State<AppState>,
    user: SessionUser,
    Json(request): Json<AcceptRequest>,
) -> Result<Json<UserDoc>, AppError> {
    let mut doc = state
        .store
        .fetch(&user.0)
        .await?
        .unwrap_or_else(UserDoc::default);
    let candidates = candidates_for(&state, &user.0, doc.preferences.as_ref()).await;

    let quest = candidates
        .iter()
        .find(|q| q.id == request.quest_id)
        .ok_or_else(|| AppError::NotFound(format!("Quest {}", request.quest_id)))?;

    let mut planner = PlannerState::from_doc(&doc);
    planner.accept(current_week(), request.week, quest)?;
    planner.write_back(&mut doc);

    // One write covers the grid and the accepted list together.
    state.store.upsert(&user.0, &doc).await?;
    Ok(Json(doc))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelRequest {
    pub week: WeekId,
    pub quest_id: String,
}

/// POST /api/quests/cancel - release an accepted quest's cells.
pub async fn cancel_quest(
    State(state): State<AppState>,
    user: SessionUser,
    Json(request): Json<CancelRequest>,
) -> Result<Json<UserDoc>, AppError> {
    let mut doc = state
        .store
        .fetch(&user.0)
        .await?
        .unwrap_or_else(UserDoc::default);

    let mut planner = PlannerState::from_doc(&doc);
    planner.cancel(current_week(), request.week, &request.quest_id)?;
    planner.write_back(&mut doc);

    state.store.upsert(&user.0, &doc).await?;
    Ok(Json(doc))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IgnoreRequest {
    pub quest_id: String,
}

/// POST /api/quests/ignore - hide a candidate from every week's listing.
pub async fn ignore_quest(
    State(state): State<AppState>,
    user: SessionUser,
    Json(request): Json<IgnoreRequest>,
) -> Result<Json<UserDoc>, AppError> {
    let mut doc = state
        .store
        .fetch(&user.0)
        .await?
        .unwrap_or_else(UserDoc::default);

    let mut planner = PlannerState::from_doc(&doc);
    planner.ignore(&request.quest_id);
    planner.write_back(&mut doc);

    state.store.upsert(&user.0, &doc).await?;
    Ok(Json(doc))
}

/// POST /api/quests/restore - bring an ignored candidate back.
pub async fn restore_quest(
    State(state): State<AppState>,
    user: SessionUser,
    Json(request): Json<IgnoreRequest>,
) -> Result<Json<UserDoc>, AppError> {
    let mut doc = state
        .store
        .fetch(&user.0)
        .await?
        .unwrap_or_else(UserDoc::default);

    let mut planner = PlannerState::from_doc(&doc);
    planner.restore(&request.quest_id);
    planner.write_back(&mut doc);

    state.store.upsert(&user.0, &doc).await?;
    Ok(Json(doc))
}
