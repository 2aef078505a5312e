use crate::error::AppError;
use crate::routes::{AppState, session::MaybeUser};
use axum::{Json, extract::State};
use serde::Deserialize;
use sidequest_user::UserStore;

use crate::store::ScoreRow;

const LEADERBOARD_SIZE: i64 = 10;

#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    pub score: i64,
}

/// POST /api/score - submit a minigame result.
///
/// Signed-in players are credited under their stored display name;
/// everyone else lands on the board as "Anonymous".
pub async fn post_score(
    State(state): State<AppState>,
    user: MaybeUser,
    Json(request): Json<ScoreRequest>,
) -> Result<Json<ScoreRow>, AppError> {
    if request.score < 0 {
        return Err(AppError::ValidationError(
            "Score must be non-negative".to_string(),
        ));
    }

    let (name, user_id) = match &user.0 {
        Some(id) => {
            let doc = state.store.fetch(id).await?.unwrap_or_default();
            let name = doc
                .name
                .or(doc.first_name)
                .unwrap_or_else(|| id.clone());
            (name, Some(id.clone()))
        }
        None => ("Anonymous".to_string(), None),
    };

    let row = state
        .store
        .record_score(&name, user_id.as_deref(), request.score)
        .await?;
    Ok(Json(row))
}

/// GET /api/scores - the top of the leaderboard.
pub async fn get_scores(State(state): State<AppState>) -> Result<Json<Vec<ScoreRow>>, AppError> {
    let rows = state.store.top_scores(LEADERBOARD_SIZE).await?;
    Ok(Json(rows))
}
