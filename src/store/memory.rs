//! In-memory `HospitalStore` backing the unit and router tests.
//!
//! All tables live behind one `tokio::sync::RwLock`, so each write is
//! applied as a whole while holding the lock. Nothing survives a restart.
use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{HospitalStore, StoreError, StoreResult};
use crate::db::models::{Appointment, Doctor, Member, NewAppointment, NewDoctor, NewMember};

#[derive(Debug, Default)]
struct Tables {
    doctors: Vec<Doctor>,
    appointments: Vec<Appointment>,
    members: Vec<Member>,
    next_doctor_id: i32,
    next_appointment_id: i32,
    next_member_id: i32,
}

impl Tables {
    fn insert_doctor(&mut self, doctor: NewDoctor) -> Doctor {
        self.next_doctor_id += 1;
        let doctor = Doctor {
            id: self.next_doctor_id,
            name: doctor.name,
            specialization: doctor.specialization,
            available: doctor.available,
        };
        self.doctors.push(doctor.clone());
        doctor
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl HospitalStore for MemoryStore {
    async fn list_doctors(&self, only_available: bool) -> StoreResult<Vec<Doctor>> {
        let tables = self.tables.read().await;
        Ok(tables
            .doctors
            .iter()
            .filter(|doctor| !only_available || doctor.available)
            .cloned()
            .collect())
    }

    async fn get_doctor(&self, id: i32) -> StoreResult<Option<Doctor>> {
        let tables = self.tables.read().await;
        Ok(tables.doctors.iter().find(|doctor| doctor.id == id).cloned())
    }

    async fn create_doctor(&self, doctor: NewDoctor) -> StoreResult<Doctor> {
        let mut tables = self.tables.write().await;
        Ok(tables.insert_doctor(doctor))
    }

    async fn count_doctors(&self) -> StoreResult<i64> {
        Ok(self.tables.read().await.doctors.len() as i64)
    }

    async fn seed_doctors(&self, doctors: Vec<NewDoctor>) -> StoreResult<usize> {
        let mut tables = self.tables.write().await;
        if !tables.doctors.is_empty() {
            return Ok(0);
        }
        let count = doctors.len();
        for doctor in doctors {
            tables.insert_doctor(doctor);
        }
        Ok(count)
    }

    async fn create_appointment(&self, appointment: NewAppointment) -> StoreResult<Appointment> {
        let mut tables = self.tables.write().await;
        if !tables
            .doctors
            .iter()
            .any(|doctor| doctor.id == appointment.doctor_id)
        {
            return Err(StoreError::NotFound(format!(
                "doctor {}",
                appointment.doctor_id
            )));
        }
        tables.next_appointment_id += 1;
        let appointment = Appointment {
            id: tables.next_appointment_id,
            patient_name: appointment.patient_name,
            doctor_id: appointment.doctor_id,
            date: appointment.date,
        };
        tables.appointments.push(appointment.clone());
        Ok(appointment)
    }

    async fn count_appointments(&self) -> StoreResult<i64> {
        Ok(self.tables.read().await.appointments.len() as i64)
    }

    async fn find_member_by_email(&self, email: &str) -> StoreResult<Option<Member>> {
        let tables = self.tables.read().await;
        Ok(tables
            .members
            .iter()
            .find(|member| member.email == email)
            .cloned())
    }

    async fn create_member(&self, member: NewMember) -> StoreResult<Member> {
        let mut tables = self.tables.write().await;
        if tables.members.iter().any(|m| m.email == member.email) {
            return Err(StoreError::Conflict(format!("member {}", member.email)));
        }
        tables.next_member_id += 1;
        let member = Member {
            id: tables.next_member_id,
            name: member.name,
            email: member.email,
            password: member.password_hash,
        };
        tables.members.push(member.clone());
        Ok(member)
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
