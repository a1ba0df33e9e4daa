use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use shared_models::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Patient {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub gender: Gender,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub medical_record_number: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Patient {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatePatientRequest {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub gender: Gender,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub medical_record_number: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdatePatientRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<Gender>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PatientSearchQuery {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub mrn: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PageQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MedicalHistory {
    pub id: i64,
    pub patient_id: i64,
    pub condition: String,
    pub icd_code: Option<String>,
    pub diagnosis_date: Option<NaiveDate>,
    pub status: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateMedicalHistoryRequest {
    pub patient_id: i64,
    pub condition: String,
    pub icd_code: Option<String>,
    pub diagnosis_date: Option<NaiveDate>,
    pub status: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateMedicalHistoryRequest {
    pub condition: Option<String>,
    pub icd_code: Option<String>,
    pub diagnosis_date: Option<NaiveDate>,
    pub status: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MedicalHistoryQuery {
    pub patient_id: Option<i64>,
    pub status: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Allergy {
    pub id: i64,
    pub patient_id: i64,
    pub allergen: String,
    pub reaction: Option<String>,
    pub severity: Option<String>,
    pub onset_date: Option<NaiveDate>,
    pub is_active: bool,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateAllergyRequest {
    pub patient_id: i64,
    pub allergen: String,
    pub reaction: Option<String>,
    pub severity: Option<String>,
    pub onset_date: Option<NaiveDate>,
    pub is_active: Option<bool>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateAllergyRequest {
    pub allergen: Option<String>,
    pub reaction: Option<String>,
    pub severity: Option<String>,
    pub onset_date: Option<NaiveDate>,
    pub is_active: Option<bool>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AllergyQuery {
    pub patient_id: Option<i64>,
    pub severity: Option<String>,
    pub is_active: Option<bool>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsurancePolicy {
    pub id: i64,
    pub patient_id: i64,
    pub provider_name: String,
    pub policy_number: String,
    pub coverage_details: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub is_primary: bool,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateInsurancePolicyRequest {
    pub patient_id: i64,
    pub provider_name: String,
    pub policy_number: String,
    pub coverage_details: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub is_primary: Option<bool>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateInsurancePolicyRequest {
    pub provider_name: Option<String>,
    pub policy_number: Option<String>,
    pub coverage_details: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub is_primary: Option<bool>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InsuranceQuery {
    pub patient_id: Option<i64>,
    pub status: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, thiserror::Error)]
pub enum PatientError {
    #[error("Patient not found")]
    NotFound,

    #[error("Medical history record not found")]
    HistoryNotFound,

    #[error("Allergy not found")]
    AllergyNotFound,

    #[error("Insurance policy not found")]
    InsuranceNotFound,

    #[error("Patient with medical record number {mrn} already exists")]
    MrnAlreadyExists { mrn: String },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<PatientError> for AppError {
    fn from(err: PatientError) -> Self {
        match err {
            PatientError::NotFound
            | PatientError::HistoryNotFound
            | PatientError::AllergyNotFound
            | PatientError::InsuranceNotFound => AppError::NotFound(err.to_string()),
            PatientError::MrnAlreadyExists { .. } => AppError::BadRequest(err.to_string()),
            PatientError::Validation(msg) => AppError::ValidationError(msg),
            PatientError::Database(msg) => AppError::Database(msg),
        }
    }
}

impl From<anyhow::Error> for PatientError {
    fn from(err: anyhow::Error) -> Self {
        PatientError::Database(err.to_string())
    }
}
