use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde_json::Value;

use super::error::ApiError;
use crate::app::AppState;
use crate::auth::{self, LoginResponse};

pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<LoginResponse>, ApiError> {
    let tokens = state
        .tokens
        .as_ref()
        .ok_or_else(|| ApiError::new(StatusCode::NOT_FOUND, "Login is not enabled"))?;
    let Json(input) = payload?;
    let response = auth::login(state.store.as_ref(), tokens, &input).await?;
    Ok(Json(response))
}
