use async_trait::async_trait;
use sqlx::PgPool;

use super::{HospitalStore, StoreError, StoreResult};
use crate::db::models::{Appointment, Doctor, Member, NewAppointment, NewDoctor, NewMember};

const FOREIGN_KEY_VIOLATION: &str = "23503";
const UNIQUE_VIOLATION: &str = "23505";

/// `HospitalStore` backed by a PostgreSQL pool. Each record creation runs
/// in its own transaction.
#[derive(Clone, Debug)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn violates(err: &sqlx::Error, code: &str) -> bool {
    err.as_database_error()
        .and_then(|db| db.code())
        .is_some_and(|c| c == code)
}

#[async_trait]
impl HospitalStore for PostgresStore {
    async fn list_doctors(&self, only_available: bool) -> StoreResult<Vec<Doctor>> {
        let query = if only_available {
            "SELECT id, name, specialization, available FROM doctors WHERE available = TRUE ORDER BY id"
        } else {
            "SELECT id, name, specialization, available FROM doctors ORDER BY id"
        };
        Ok(sqlx::query_as::<_, Doctor>(query)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn get_doctor(&self, id: i32) -> StoreResult<Option<Doctor>> {
        Ok(sqlx::query_as::<_, Doctor>(
            "SELECT id, name, specialization, available FROM doctors WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn create_doctor(&self, doctor: NewDoctor) -> StoreResult<Doctor> {
        let mut transaction = self.pool.begin().await?;
        let doctor = sqlx::query_as::<_, Doctor>(
            "INSERT INTO doctors (name, specialization, available) VALUES ($1, $2, $3) \
             RETURNING id, name, specialization, available",
        )
        .bind(&doctor.name)
        .bind(&doctor.specialization)
        .bind(doctor.available)
        .fetch_one(&mut *transaction)
        .await?;
        transaction.commit().await?;
        Ok(doctor)
    }

    async fn count_doctors(&self) -> StoreResult<i64> {
        Ok(sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM doctors")
            .fetch_one(&self.pool)
            .await?)
    }

    async fn seed_doctors(&self, doctors: Vec<NewDoctor>) -> StoreResult<usize> {
        let mut transaction = self.pool.begin().await?;

        // Serializes concurrent seeders so only one of them sees an empty table.
        sqlx::query("LOCK TABLE doctors IN SHARE ROW EXCLUSIVE MODE")
            .execute(&mut *transaction)
            .await?;

        let existing = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM doctors")
            .fetch_one(&mut *transaction)
            .await?;
        if existing > 0 {
            transaction.rollback().await?;
            return Ok(0);
        }

        let count = doctors.len();
        for doctor in doctors {
            sqlx::query("INSERT INTO doctors (name, specialization, available) VALUES ($1, $2, $3)")
                .bind(doctor.name)
                .bind(doctor.specialization)
                .bind(doctor.available)
                .execute(&mut *transaction)
                .await?;
        }
        transaction.commit().await?;
        Ok(count)
    }

    async fn create_appointment(&self, appointment: NewAppointment) -> StoreResult<Appointment> {
        let mut transaction = self.pool.begin().await?;
        let inserted = sqlx::query_as::<_, Appointment>(
            "INSERT INTO appointments (patient_name, doctor_id, date) VALUES ($1, $2, $3) \
             RETURNING id, patient_name, doctor_id, date",
        )
        .bind(&appointment.patient_name)
        .bind(appointment.doctor_id)
        .bind(appointment.date)
        .fetch_one(&mut *transaction)
        .await;

        match inserted {
            Ok(row) => {
                transaction.commit().await?;
                Ok(row)
            }
            Err(e) if violates(&e, FOREIGN_KEY_VIOLATION) => {
                transaction.rollback().await?;
                Err(StoreError::NotFound(format!(
                    "doctor {}",
                    appointment.doctor_id
                )))
            }
            Err(e) => {
                transaction.rollback().await?;
                Err(e.into())
            }
        }
    }

    async fn count_appointments(&self) -> StoreResult<i64> {
        Ok(sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM appointments")
            .fetch_one(&self.pool)
            .await?)
    }

    async fn find_member_by_email(&self, email: &str) -> StoreResult<Option<Member>> {
        Ok(sqlx::query_as::<_, Member>(
            "SELECT id, name, email, password FROM members WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn create_member(&self, member: NewMember) -> StoreResult<Member> {
        let mut transaction = self.pool.begin().await?;
        let inserted = sqlx::query_as::<_, Member>(
            "INSERT INTO members (name, email, password) VALUES ($1, $2, $3) \
             RETURNING id, name, email, password",
        )
        .bind(&member.name)
        .bind(&member.email)
        .bind(&member.password_hash)
        .fetch_one(&mut *transaction)
        .await;

        match inserted {
            Ok(row) => {
                transaction.commit().await?;
                Ok(row)
            }
            Err(e) if violates(&e, UNIQUE_VIOLATION) => {
                transaction.rollback().await?;
                Err(StoreError::Conflict(format!("member {}", member.email)))
            }
            Err(e) => {
                transaction.rollback().await?;
                Err(e.into())
            }
        }
    }

    fn backend_name(&self) -> &'static str {
        "postgres"
    }
}
