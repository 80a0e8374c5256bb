use async_trait::async_trait;
use thiserror::Error;

use crate::db::models::{Appointment, Doctor, Member, NewAppointment, NewDoctor, NewMember};

pub mod memory;
pub mod postgres;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence seam for doctors, appointments and members.
///
/// Every creating call is a single atomic write: the record is either fully
/// stored and returned with its assigned id, or nothing changes.
#[async_trait]
pub trait HospitalStore: Send + Sync {
    async fn list_doctors(&self, only_available: bool) -> StoreResult<Vec<Doctor>>;
    async fn get_doctor(&self, id: i32) -> StoreResult<Option<Doctor>>;
    async fn create_doctor(&self, doctor: NewDoctor) -> StoreResult<Doctor>;
    async fn count_doctors(&self) -> StoreResult<i64>;

    /// Inserts `doctors` only when no doctor exists yet; returns how many were inserted.
    async fn seed_doctors(&self, doctors: Vec<NewDoctor>) -> StoreResult<usize>;

    /// Fails with `StoreError::NotFound` when `doctor_id` references no doctor.
    async fn create_appointment(&self, appointment: NewAppointment) -> StoreResult<Appointment>;
    async fn count_appointments(&self) -> StoreResult<i64>;

    async fn find_member_by_email(&self, email: &str) -> StoreResult<Option<Member>>;
    /// Fails with `StoreError::Conflict` when the email is already registered.
    async fn create_member(&self, member: NewMember) -> StoreResult<Member>;

    fn backend_name(&self) -> &'static str;
}
