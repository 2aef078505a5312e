use crate::error::AppError;
use crate::routes::{AppState, session::SessionUser};
use axum::{Json, extract::State};
use sidequest_user::{ProfileUpdate, UserDoc, UserStore};

/// POST /api/preferences - partial profile/preferences update.
///
/// Preference keys merge shallowly into the stored set; omitted keys keep
/// their values. A preference change drops the cached quest candidates so
/// the next listing regenerates them against the new tastes.
pub async fn update_profile(
    State(state): State<AppState>,
    user: SessionUser,
    Json(update): Json<ProfileUpdate>,
) -> Result<Json<UserDoc>, AppError> {
    let mut doc = state
        .store
        .fetch(&user.0)
        .await?
        .unwrap_or_else(UserDoc::default);

    let preferences_changed = update.preferences.is_some();
    doc.apply(update);
    state.store.upsert(&user.0, &doc).await?;

    if preferences_changed {
        state.quests.write().await.remove(&user.0);
        tracing::debug!(user = %user.0, "preferences changed; quest candidates invalidated");
    }

    Ok(Json(doc))
}
