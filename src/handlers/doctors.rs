use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::Value;

use super::error::ApiError;
use crate::app::AppState;
use crate::db::models::Doctor;
use crate::services::booking;

#[derive(Debug, Default, Deserialize)]
pub struct ListDoctorsQuery {
    /// `true` limits the listing to available doctors.
    pub available: Option<bool>,
}

pub async fn list_doctors(
    State(state): State<AppState>,
    query: Result<Query<ListDoctorsQuery>, QueryRejection>,
) -> Result<Json<Vec<Doctor>>, ApiError> {
    let Query(query) = query?;
    let only_available = query.available.unwrap_or(false);
    let doctors = booking::list_doctors(state.store.as_ref(), only_available).await?;
    Ok(Json(doctors))
}

pub async fn add_doctor(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Doctor>), ApiError> {
    let Json(input) = payload?;
    let doctor = booking::add_doctor(state.store.as_ref(), &input).await?;

    if let Some(mirror) = &state.mirror {
        mirror.forward("doctors", &doctor).await;
    }

    Ok((StatusCode::CREATED, Json(doctor)))
}
