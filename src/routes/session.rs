use crate::error::AppError;
use crate::routes::AppState;
use axum::{Json, extract::FromRequestParts, extract::State, http::request::Parts};
use sidequest_user::UserDoc;
use std::convert::Infallible;

/// Header carrying the caller's session identity. The value is opaque here;
/// the fronting proxy owns how it is issued and verified.
pub const SESSION_HEADER: &str = "x-session-user";

/// Extractor for routes that require a signed-in caller.
#[derive(Debug, Clone)]
pub struct SessionUser(pub String);

/// Extractor for routes that also serve anonymous callers.
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<String>);

fn session_id(parts: &Parts) -> Option<String> {
    parts
        .headers
        .get(SESSION_HEADER)
        .and_then(|value| value.to_str().ok())
        .filter(|id| !id.is_empty())
        .map(str::to_string)
}

impl<S> FromRequestParts<S> for SessionUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        session_id(parts).map(SessionUser).ok_or(AppError::Unauthorized)
    }
}

impl<S> FromRequestParts<S> for MaybeUser
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(MaybeUser(session_id(parts)))
    }
}

/// GET /api/whoami - the caller's stored document, or `{}` when anonymous.
///
/// A signed-in caller without a stored document gets a fresh default one,
/// so first login and returning login look the same to the client.
pub async fn whoami(
    State(state): State<AppState>,
    user: MaybeUser,
) -> Result<Json<serde_json::Value>, AppError> {
    use sidequest_user::UserStore;

    let Some(user_id) = user.0 else {
        return Ok(Json(serde_json::json!({})));
    };

    let doc = state
        .store
        .fetch(&user_id)
        .await?
        .unwrap_or_else(UserDoc::default);
    let value = serde_json::to_value(&doc)
        .map_err(|e| AppError::StoreError(sidequest_user::StoreError::from(e)))?;
    Ok(Json(value))
}
