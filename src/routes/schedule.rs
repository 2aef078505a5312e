use crate::error::AppError;
use crate::routes::{AppState, current_week, session::SessionUser};
use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use serde_json::json;
use sidequest_schedule::PlannerState;
use sidequest_shared::{WeekGrid, WeekId};
use sidequest_user::{UserDoc, UserStore};

#[derive(Debug, Deserialize)]
pub struct ScheduleQuery {
    pub week: WeekId,
}

/// GET /api/schedule - the grid in effect for one week.
pub async fn get_schedule(
    State(state): State<AppState>,
    user: SessionUser,
    Query(query): Query<ScheduleQuery>,
) -> Result<Json<WeekGrid>, AppError> {
    let doc = state
        .store
        .fetch(&user.0)
        .await?
        .unwrap_or_else(UserDoc::default);
    let planner = PlannerState::from_doc(&doc);
    Ok(Json(planner.display_grid(query.week).clone()))
}

#[derive(Debug, Deserialize, Default, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SaveMode {
    #[default]
    Week,
    Recurring,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveScheduleRequest {
    pub week: WeekId,
    pub grid: WeekGrid,
    #[serde(default)]
    pub mode: SaveMode,
    #[serde(default)]
    pub confirm_future_overwrite: bool,
}

/// POST /api/schedule - commit an edited grid.
///
/// Mode `week` saves a one-week override. Mode `recurring` replaces the
/// template, freezing history and discarding newer overrides; when those
/// exist the request must carry `confirmFutureOverwrite: true` or it is
/// rejected with 409 so the client can ask.
pub async fn save_schedule(
    State(state): State<AppState>,
    user: SessionUser,
    Json(request): Json<SaveScheduleRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let mut doc = state
        .store
        .fetch(&user.0)
        .await?
        .unwrap_or_else(UserDoc::default);
    let mut planner = PlannerState::from_doc(&doc);

    let body = match request.mode {
        SaveMode::Week => {
            planner.save_week(current_week(), request.week, request.grid)?;
            json!({ "saved": request.week })
        }
        SaveMode::Recurring => {
            let report = planner.save_recurring(
                current_week(),
                request.week,
                request.grid,
                state.history_start,
                request.confirm_future_overwrite,
            )?;
            serde_json::to_value(&report)
                .map_err(|e| AppError::StoreError(sidequest_user::StoreError::from(e)))?
        }
    };

    planner.write_back(&mut doc);
    state.store.upsert(&user.0, &doc).await?;
    Ok(Json(body))
}
