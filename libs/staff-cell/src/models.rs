use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shared_models::error::AppError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffUser {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Never serialized into responses.
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: String,
    pub department_id: Option<i64>,
    pub is_active: bool,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateStaffUserRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub role: String,
    pub department_id: Option<i64>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateStaffUserRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    /// Re-hashed on update when supplied.
    pub password: Option<String>,
    pub role: Option<String>,
    pub department_id: Option<i64>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StaffQuery {
    pub role: Option<String>,
    pub department_id: Option<i64>,
    pub is_active: Option<bool>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Technologist {
    pub id: i64,
    pub name: String,
    pub department_id: Option<i64>,
    pub specialization: Option<String>,
    pub certification_number: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateTechnologistRequest {
    pub name: String,
    pub department_id: Option<i64>,
    pub specialization: Option<String>,
    pub certification_number: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateTechnologistRequest {
    pub name: Option<String>,
    pub department_id: Option<i64>,
    pub specialization: Option<String>,
    pub certification_number: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TechnologistQuery {
    pub department_id: Option<i64>,
    pub specialization: Option<String>,
    pub status: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, thiserror::Error)]
pub enum StaffError {
    #[error("Email already registered")]
    EmailAlreadyExists,

    #[error("Staff user not found")]
    NotFound,

    #[error("Technologist not found")]
    TechnologistNotFound,

    #[error("Password hashing error: {0}")]
    Hash(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<StaffError> for AppError {
    fn from(err: StaffError) -> Self {
        match err {
            StaffError::EmailAlreadyExists => AppError::BadRequest(err.to_string()),
            StaffError::NotFound | StaffError::TechnologistNotFound => {
                AppError::NotFound(err.to_string())
            }
            StaffError::Hash(msg) => AppError::Internal(msg),
            StaffError::Database(msg) => AppError::Database(msg),
        }
    }
}

impl From<anyhow::Error> for StaffError {
    fn from(err: anyhow::Error) -> Self {
        StaffError::Database(err.to_string())
    }
}
