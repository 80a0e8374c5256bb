//! Validation and booking rules for doctors and appointments.
//!
//! Operations take the raw JSON body so that missing, empty and mistyped
//! fields all produce the same `ServiceError::Validation` shape, then hand
//! typed records to the store.
use serde_json::{Map, Value};

use super::{ServiceError, ServiceResult};
use crate::db::models::{Appointment, Doctor, NewAppointment, NewDoctor};
use crate::store::HospitalStore;
use crate::utils::parse_date;

/// Longest accepted name or specialization, matching the column width.
pub const MAX_TEXT_LEN: usize = 100;

/// Domain rules that vary between deployments.
#[derive(Debug, Clone, Copy)]
pub struct BookingPolicy {
    /// Reject bookings for doctors whose `available` flag is false.
    pub enforce_availability: bool,
}

impl Default for BookingPolicy {
    fn default() -> Self {
        Self {
            enforce_availability: true,
        }
    }
}

fn as_object(input: &Value) -> ServiceResult<&Map<String, Value>> {
    input
        .as_object()
        .ok_or_else(|| ServiceError::Validation("Request body must be a JSON object.".to_string()))
}

/// Returns the trimmed string at `field`, or `None` when absent, null or blank.
fn text_field<'a>(body: &'a Map<String, Value>, field: &str) -> Option<&'a str> {
    body.get(field)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

fn present(body: &Map<String, Value>, field: &str) -> bool {
    match body.get(field) {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.trim().is_empty(),
        Some(_) => true,
    }
}

fn check_length(field: &str, value: &str) -> ServiceResult<()> {
    if value.chars().count() > MAX_TEXT_LEN {
        return Err(ServiceError::Validation(format!(
            "{} must be at most {} characters.",
            field, MAX_TEXT_LEN
        )));
    }
    Ok(())
}

fn parse_doctor_id(value: &Value) -> ServiceResult<i32> {
    let id = match value {
        Value::Number(n) => n.as_i64().and_then(|n| i32::try_from(n).ok()),
        Value::String(s) => s.trim().parse::<i32>().ok(),
        _ => None,
    };
    id.ok_or_else(|| ServiceError::Validation("doctor_id must be an integer.".to_string()))
}

/// Creates a doctor from `{name, specialization, available?}`.
pub async fn add_doctor(store: &dyn HospitalStore, input: &Value) -> ServiceResult<Doctor> {
    let body = as_object(input)?;

    let (name, specialization) = match (
        text_field(body, "name"),
        text_field(body, "specialization"),
    ) {
        (Some(name), Some(specialization)) => (name, specialization),
        _ => {
            return Err(ServiceError::Validation(
                "name and specialization are required.".to_string(),
            ))
        }
    };
    check_length("name", name)?;
    check_length("specialization", specialization)?;

    let available = match body.get("available") {
        None | Some(Value::Null) => true,
        Some(Value::Bool(flag)) => *flag,
        Some(_) => {
            return Err(ServiceError::Validation(
                "available must be a boolean.".to_string(),
            ))
        }
    };

    let doctor = store
        .create_doctor(NewDoctor {
            name: name.to_string(),
            specialization: specialization.to_string(),
            available,
        })
        .await?;
    log::info!("Added doctor {} ({})", doctor.id, doctor.specialization);
    Ok(doctor)
}

/// Lists every doctor, or only available ones when `only_available` is set.
pub async fn list_doctors(
    store: &dyn HospitalStore,
    only_available: bool,
) -> ServiceResult<Vec<Doctor>> {
    Ok(store.list_doctors(only_available).await?)
}

/// Books an appointment from `{patient_name, doctor_id, date}`.
///
/// Checks run in order and stop at the first failure: required fields,
/// date format, doctor existence, then availability when the policy asks
/// for it. The availability check and the insert are not isolated from
/// each other, so a doctor marked unavailable between the two can still
/// receive the booking.
pub async fn book_appointment(
    store: &dyn HospitalStore,
    input: &Value,
    policy: BookingPolicy,
) -> ServiceResult<Appointment> {
    let body = as_object(input)?;

    if !["patient_name", "doctor_id", "date"]
        .iter()
        .all(|field| present(body, field))
    {
        return Err(ServiceError::Validation(
            "patient_name, doctor_id and date are required.".to_string(),
        ));
    }

    let date = body
        .get("date")
        .and_then(Value::as_str)
        .and_then(parse_date)
        .ok_or_else(|| {
            ServiceError::Validation("Invalid date format. Use YYYY-MM-DD.".to_string())
        })?;

    let patient_name = text_field(body, "patient_name").ok_or_else(|| {
        ServiceError::Validation("patient_name must be a non-empty string.".to_string())
    })?;
    check_length("patient_name", patient_name)?;

    let doctor_id = parse_doctor_id(body.get("doctor_id").unwrap_or(&Value::Null))?;

    let doctor = store.get_doctor(doctor_id).await?.ok_or_else(|| {
        ServiceError::NotFound(format!("Doctor with id {} does not exist", doctor_id))
    })?;

    if policy.enforce_availability && !doctor.available {
        return Err(ServiceError::Conflict(format!(
            "Doctor {} is not available",
            doctor.name
        )));
    }

    let appointment = store
        .create_appointment(NewAppointment {
            patient_name: patient_name.to_string(),
            doctor_id: doctor.id,
            date,
        })
        .await?;
    log::info!(
        "Booked appointment {} with doctor {} on {}",
        appointment.id,
        appointment.doctor_id,
        appointment.date
    );
    Ok(appointment)
}
