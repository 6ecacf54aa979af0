use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Female,
    Male,
    Other,
}

/// Patient lifecycle. Hard delete is a store-level removal and only legal
/// from `archived`; it does not appear as a stored state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PatientStatus {
    Active,
    Archived,
}

/// A patient registered to one hospital.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Patient {
    pub id: Uuid,
    pub hospital_id: Uuid,
    pub name: String,
    pub gender: Gender,
    pub birth_date: NaiveDate,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub allergies: Option<String>,
    pub notes: Option<String>,
    /// Unique within the hospital.
    pub chart_number: String,
    pub status: PatientStatus,
    pub visit_count: u32,
    pub last_visit_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Patient {
    /// Age in whole years as of `on` — always derived, never stored.
    pub fn age(&self, on: NaiveDate) -> u32 {
        let mut age = on.year() - self.birth_date.year();
        if (on.month(), on.day()) < (self.birth_date.month(), self.birth_date.day()) {
            age -= 1;
        }
        age.max(0) as u32
    }

    /// Archive transition guard. Idempotent: archiving an archived patient
    /// stays archived without error.
    pub fn archive(&mut self) {
        self.status = PatientStatus::Archived;
    }

    /// Restore transition guard. Idempotent on active patients.
    pub fn restore(&mut self) {
        self.status = PatientStatus::Active;
    }

    /// Hard delete is only legal from `archived`.
    pub fn ensure_deletable(&self) -> ApiResult<()> {
        match self.status {
            PatientStatus::Archived => Ok(()),
            PatientStatus::Active => Err(ApiError::conflict(
                "Patient must be archived before deletion",
            )),
        }
    }

    pub fn record_visit(&mut self, at: DateTime<Utc>) {
        self.visit_count += 1;
        self.last_visit_at = Some(at);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patient(birth: NaiveDate) -> Patient {
        Patient {
            id: Uuid::new_v4(),
            hospital_id: Uuid::new_v4(),
            name: "Test Patient".into(),
            gender: Gender::Female,
            birth_date: birth,
            phone: None,
            address: None,
            allergies: None,
            notes: None,
            chart_number: "C-001".into(),
            status: PatientStatus::Active,
            visit_count: 0,
            last_visit_at: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn age_counts_completed_years_only() {
        let p = patient(NaiveDate::from_ymd_opt(1990, 6, 15).unwrap());
        assert_eq!(p.age(NaiveDate::from_ymd_opt(2025, 6, 14).unwrap()), 34);
        assert_eq!(p.age(NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()), 35);
    }

    #[test]
    fn archive_is_idempotent() {
        let mut p = patient(NaiveDate::from_ymd_opt(1990, 1, 1).unwrap());
        p.archive();
        p.archive();
        assert_eq!(p.status, PatientStatus::Archived);
    }

    #[test]
    fn active_patient_cannot_be_deleted() {
        let p = patient(NaiveDate::from_ymd_opt(1990, 1, 1).unwrap());
        assert!(p.ensure_deletable().is_err());
        let mut archived = p.clone();
        archived.archive();
        assert!(archived.ensure_deletable().is_ok());
    }
}
