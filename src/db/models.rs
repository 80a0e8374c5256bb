use chrono::NaiveDate;
use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::utils::format_date;

/// Placeholder written in place of a member's password hash.
pub const PASSWORD_MASK: &str = "########";

#[derive(sqlx::FromRow, Debug, Clone, PartialEq)]
pub struct Doctor {
    pub id: i32,
    pub name: String,
    pub specialization: String,
    pub available: bool,
}

#[derive(sqlx::FromRow, Debug, Clone, PartialEq)]
pub struct Appointment {
    pub id: i32,
    pub patient_name: String,
    pub doctor_id: i32,
    pub date: NaiveDate,
}

/// A login-capable staff account. `password` holds the bcrypt hash.
#[derive(sqlx::FromRow, Debug, Clone)]
pub struct Member {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Validated fields for a doctor that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewDoctor {
    pub name: String,
    pub specialization: String,
    pub available: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewAppointment {
    pub patient_name: String,
    pub doctor_id: i32,
    pub date: NaiveDate,
}

#[derive(Debug, Clone)]
pub struct NewMember {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

impl Serialize for Doctor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Doctor", 4)?;
        state.serialize_field("id", &self.id)?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field("specialization", &self.specialization)?;
        state.serialize_field("available", &self.available)?;
        state.end()
    }
}

impl Serialize for Appointment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Appointment", 4)?;
        state.serialize_field("id", &self.id)?;
        state.serialize_field("patient_name", &self.patient_name)?;
        state.serialize_field("doctor_id", &self.doctor_id)?;
        state.serialize_field("date", &format_date(self.date))?;
        state.end()
    }
}

// The hash never leaves the process: the field is always the mask.
impl Serialize for Member {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Member", 4)?;
        state.serialize_field("id", &self.id)?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field("email", &self.email)?;
        state.serialize_field("password", PASSWORD_MASK)?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn doctor_serializes_public_fields() {
        let doctor = Doctor {
            id: 1,
            name: "Dr. X".to_string(),
            specialization: "ENT".to_string(),
            available: true,
        };
        assert_eq!(
            serde_json::to_value(&doctor).unwrap(),
            json!({"id": 1, "name": "Dr. X", "specialization": "ENT", "available": true})
        );
    }

    #[test]
    fn appointment_serializes_date_as_iso() {
        let appointment = Appointment {
            id: 7,
            patient_name: "Jane".to_string(),
            doctor_id: 1,
            date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        };
        assert_eq!(
            serde_json::to_value(&appointment).unwrap(),
            json!({"id": 7, "patient_name": "Jane", "doctor_id": 1, "date": "2024-06-01"})
        );
    }

    #[test]
    fn member_never_exposes_hash() {
        let member = Member {
            id: 3,
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            password: "$2b$04$abcdefghijklmnopqrstuu".to_string(),
        };
        let value = serde_json::to_value(&member).unwrap();
        assert_eq!(value["password"], PASSWORD_MASK);
        assert!(!value.to_string().contains("$2b$"));
    }
}
