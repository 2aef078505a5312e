use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use sidequest_schedule::ScheduleError;
use sidequest_user::StoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Authentication required")]
    Unauthorized,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Schedule error: {0}")]
    ScheduleError(#[from] ScheduleError),

    #[error("Store error: {0}")]
    StoreError(#[from] StoreError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status_code, body) = match self {
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                json!({"msg": "Authentication required."}),
            ),
            AppError::NotFound(what) => (
                StatusCode::NOT_FOUND,
                json!({"msg": format!("{} could not be found.", what)}),
            ),
            AppError::ValidationError(msg) => {
                (StatusCode::UNPROCESSABLE_ENTITY, json!({ "msg": msg }))
            }
            AppError::ScheduleError(ScheduleError::FutureOverridesExist(weeks)) => (
                StatusCode::CONFLICT,
                json!({
                    "msg": "Saving this template would overwrite future week schedules.",
                    "futureOverrides": weeks,
                }),
            ),
            AppError::ScheduleError(e @ ScheduleError::PastWeek(_)) => {
                (StatusCode::CONFLICT, json!({"msg": e.to_string()}))
            }
            AppError::ScheduleError(e) => {
                (StatusCode::UNPROCESSABLE_ENTITY, json!({"msg": e.to_string()}))
            }
            AppError::StoreError(e) => {
                tracing::error!("Store error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({"msg": "An unexpected error occurred. Please try again later."}),
                )
            }
        };

        (status_code, Json(body)).into_response()
    }
}
