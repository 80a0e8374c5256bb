use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::{Extension, Json};
use serde_json::Value;

use super::error::ApiError;
use crate::app::AppState;
use crate::auth::middleware::AuthenticatedMember;
use crate::db::models::Appointment;
use crate::services::booking;

pub async fn book_appointment(
    State(state): State<AppState>,
    member: Option<Extension<AuthenticatedMember>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Appointment>), ApiError> {
    let Json(input) = payload?;
    let appointment =
        booking::book_appointment(state.store.as_ref(), &input, state.booking_policy).await?;

    if let Some(Extension(AuthenticatedMember(member_id))) = member {
        log::info!(
            "Appointment {} booked by member {}",
            appointment.id,
            member_id
        );
    }

    if let Some(mirror) = &state.mirror {
        mirror.forward("appointments", &appointment).await;
    }

    Ok((StatusCode::CREATED, Json(appointment)))
}
