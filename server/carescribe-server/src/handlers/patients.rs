use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::{
    error::{api_success, ApiError, ApiResponse},
    models::{Gender, Patient, PatientStatus},
    server::CareScribeServer,
    validate_length, validate_required,
    validation::RequestValidation,
};

// ============================================================================
// REQUEST/RESPONSE TYPES
// ============================================================================

#[derive(Debug, Deserialize, IntoParams)]
pub struct ListPatientsQuery {
    pub hospital_id: Uuid,
    pub status: Option<PatientStatus>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreatePatientRequest {
    pub hospital_id: Uuid,
    pub name: String,
    pub gender: Gender,
    pub birth_date: NaiveDate,
    pub chart_number: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub allergies: Option<String>,
    pub notes: Option<String>,
}

impl RequestValidation for CreatePatientRequest {
    fn validate(&self) -> Result<(), ApiError> {
        validate_required!(self.name, "Patient name is required");
        validate_required!(self.chart_number, "Chart number is required");
        validate_length!(self.name, 1, 100, "Name must be between 1 and 100 characters");
        validate_length!(
            self.chart_number,
            1,
            32,
            "Chart number must be between 1 and 32 characters"
        );
        Ok(())
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdatePatientRequest {
    pub name: Option<String>,
    pub gender: Option<Gender>,
    pub birth_date: Option<NaiveDate>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub allergies: Option<String>,
    pub notes: Option<String>,
}

impl RequestValidation for UpdatePatientRequest {
    fn validate(&self) -> Result<(), ApiError> {
        if let Some(ref name) = self.name {
            validate_required!(name, "Patient name cannot be blank");
            validate_length!(name, 1, 100, "Name must be between 1 and 100 characters");
        }
        Ok(())
    }
}

/// Archive or restore transition.
#[derive(Debug, Deserialize, ToSchema)]
pub struct PatientStatusRequest {
    pub status: PatientStatus,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PatientResponse {
    pub id: Uuid,
    pub hospital_id: Uuid,
    pub name: String,
    pub gender: Gender,
    pub birth_date: NaiveDate,
    /// Whole years as of today, always derived.
    pub age: u32,
    pub chart_number: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub allergies: Option<String>,
    pub notes: Option<String>,
    pub status: PatientStatus,
    pub visit_count: u32,
    pub last_visit_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<Patient> for PatientResponse {
    fn from(p: Patient) -> Self {
        let age = p.age(Utc::now().date_naive());
        Self {
            id: p.id,
            hospital_id: p.hospital_id,
            name: p.name,
            gender: p.gender,
            birth_date: p.birth_date,
            age,
            chart_number: p.chart_number,
            phone: p.phone,
            address: p.address,
            allergies: p.allergies,
            notes: p.notes,
            status: p.status,
            visit_count: p.visit_count,
            last_visit_at: p.last_visit_at,
            created_at: p.created_at,
        }
    }
}

// ============================================================================
// HANDLERS
// ============================================================================

/// List the patients of a hospital, newest first
#[utoipa::path(
    get,
    path = "/api/v1/patients",
    params(ListPatientsQuery),
    responses(
        (status = 200, description = "Patients retrieved successfully", body = Vec<PatientResponse>),
        (status = 404, description = "Hospital not found")
    ),
    tag = "patients"
)]
pub async fn list_patients(
    State(server): State<CareScribeServer>,
    Query(query): Query<ListPatientsQuery>,
) -> Result<Json<ApiResponse<Vec<PatientResponse>>>, ApiError> {
    server.store.get_hospital(query.hospital_id).await?;

    let patients: Vec<PatientResponse> = server
        .store
        .list_patients(query.hospital_id)
        .await
        .into_iter()
        .filter(|p| query.status.map_or(true, |s| p.status == s))
        .map(PatientResponse::from)
        .collect();

    Ok(Json(api_success(patients)))
}

/// Register a new patient
#[utoipa::path(
    post,
    path = "/api/v1/patients",
    request_body = CreatePatientRequest,
    responses(
        (status = 201, description = "Patient created", body = PatientResponse),
        (status = 400, description = "Invalid request"),
        (status = 404, description = "Hospital not found"),
        (status = 409, description = "Chart number already exists in this hospital")
    ),
    tag = "patients"
)]
pub async fn create_patient(
    State(server): State<CareScribeServer>,
    Json(req): Json<CreatePatientRequest>,
) -> Result<(StatusCode, Json<ApiResponse<PatientResponse>>), ApiError> {
    req.validate()?;
    server.store.get_hospital(req.hospital_id).await?;

    let patient = server
        .store
        .insert_patient(Patient {
            id: Uuid::new_v4(),
            hospital_id: req.hospital_id,
            name: req.name,
            gender: req.gender,
            birth_date: req.birth_date,
            phone: req.phone,
            address: req.address,
            allergies: req.allergies,
            notes: req.notes,
            chart_number: req.chart_number,
            status: PatientStatus::Active,
            visit_count: 0,
            last_visit_at: None,
            created_at: Utc::now(),
        })
        .await?;

    Ok((StatusCode::CREATED, Json(api_success(patient.into()))))
}

/// Get one patient
#[utoipa::path(
    get,
    path = "/api/v1/patients/{id}",
    params(("id" = Uuid, Path, description = "Patient id")),
    responses(
        (status = 200, description = "Patient detail", body = PatientResponse),
        (status = 404, description = "Patient not found")
    ),
    tag = "patients"
)]
pub async fn get_patient(
    State(server): State<CareScribeServer>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<PatientResponse>>, ApiError> {
    let patient = server.store.get_patient(id).await?;
    Ok(Json(api_success(patient.into())))
}

/// Update patient demographics
#[utoipa::path(
    put,
    path = "/api/v1/patients/{id}",
    params(("id" = Uuid, Path, description = "Patient id")),
    request_body = UpdatePatientRequest,
    responses(
        (status = 200, description = "Patient updated", body = PatientResponse),
        (status = 400, description = "Invalid request"),
        (status = 404, description = "Patient not found")
    ),
    tag = "patients"
)]
pub async fn update_patient(
    State(server): State<CareScribeServer>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdatePatientRequest>,
) -> Result<Json<ApiResponse<PatientResponse>>, ApiError> {
    req.validate()?;

    let patient = server
        .store
        .update_patient(id, |patient| {
            if let Some(name) = req.name {
                patient.name = name;
            }
            if let Some(gender) = req.gender {
                patient.gender = gender;
            }
            if let Some(birth_date) = req.birth_date {
                patient.birth_date = birth_date;
            }
            if let Some(phone) = req.phone {
                patient.phone = Some(phone);
            }
            if let Some(address) = req.address {
                patient.address = Some(address);
            }
            if let Some(allergies) = req.allergies {
                patient.allergies = Some(allergies);
            }
            if let Some(notes) = req.notes {
                patient.notes = Some(notes);
            }
            Ok(())
        })
        .await?;

    Ok(Json(api_success(patient.into())))
}

/// Archive or restore a patient
#[utoipa::path(
    patch,
    path = "/api/v1/patients/{id}/status",
    params(("id" = Uuid, Path, description = "Patient id")),
    request_body = PatientStatusRequest,
    responses(
        (status = 200, description = "Status changed", body = PatientResponse),
        (status = 404, description = "Patient not found")
    ),
    tag = "patients"
)]
pub async fn set_patient_status(
    State(server): State<CareScribeServer>,
    Path(id): Path<Uuid>,
    Json(req): Json<PatientStatusRequest>,
) -> Result<Json<ApiResponse<PatientResponse>>, ApiError> {
    let patient = server
        .store
        .update_patient(id, |patient| {
            match req.status {
                PatientStatus::Archived => patient.archive(),
                PatientStatus::Active => patient.restore(),
            }
            Ok(())
        })
        .await?;

    Ok(Json(api_success(patient.into())))
}

/// Hard-delete an archived patient
#[utoipa::path(
    delete,
    path = "/api/v1/patients/{id}",
    params(("id" = Uuid, Path, description = "Patient id")),
    responses(
        (status = 204, description = "Patient deleted"),
        (status = 404, description = "Patient not found"),
        (status = 409, description = "Patient must be archived before deletion")
    ),
    tag = "patients"
)]
pub async fn delete_patient(
    State(server): State<CareScribeServer>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    server.store.delete_patient(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
