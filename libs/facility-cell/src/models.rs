use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shared_models::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepartmentStatus {
    Active,
    Inactive,
    UnderMaintenance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomStatus {
    Available,
    Occupied,
    Maintenance,
    Inactive,
}

impl RoomStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoomStatus::Available => "available",
            RoomStatus::Occupied => "occupied",
            RoomStatus::Maintenance => "maintenance",
            RoomStatus::Inactive => "inactive",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PageQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Department {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub status: DepartmentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateDepartmentRequest {
    pub name: String,
    pub description: Option<String>,
    pub status: Option<DepartmentStatus>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateDepartmentRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<DepartmentStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    pub id: i64,
    pub name: String,
    pub department_id: i64,
    pub capacity: Option<i32>,
    pub status: RoomStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateRoomRequest {
    pub name: String,
    pub department_id: i64,
    pub capacity: Option<i32>,
    pub status: Option<RoomStatus>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateRoomRequest {
    pub name: Option<String>,
    pub department_id: Option<i64>,
    pub capacity: Option<i32>,
    pub status: Option<RoomStatus>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RoomQuery {
    pub department_id: Option<i64>,
    pub status: Option<RoomStatus>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferringPhysician {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub specialization: Option<String>,
    pub contact_number: Option<String>,
    pub email: String,
    pub address: Option<String>,
    pub hospital_affiliation: Option<String>,
    pub license_number: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatePhysicianRequest {
    pub first_name: String,
    pub last_name: String,
    pub specialization: Option<String>,
    pub contact_number: Option<String>,
    pub email: String,
    pub address: Option<String>,
    pub hospital_affiliation: Option<String>,
    pub license_number: String,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdatePhysicianRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub specialization: Option<String>,
    pub contact_number: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub hospital_affiliation: Option<String>,
    pub license_number: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PhysicianQuery {
    pub specialization: Option<String>,
    pub is_active: Option<bool>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, thiserror::Error)]
pub enum FacilityError {
    #[error("Department not found")]
    DepartmentNotFound,

    #[error("Room not found")]
    RoomNotFound,

    #[error("Referring physician not found")]
    PhysicianNotFound,

    #[error("A referring physician with this email or license number already exists")]
    PhysicianAlreadyExists,

    #[error("Database error: {0}")]
    Database(String),
}

impl From<FacilityError> for AppError {
    fn from(err: FacilityError) -> Self {
        match err {
            FacilityError::DepartmentNotFound
            | FacilityError::RoomNotFound
            | FacilityError::PhysicianNotFound => AppError::NotFound(err.to_string()),
            FacilityError::PhysicianAlreadyExists => AppError::BadRequest(err.to_string()),
            FacilityError::Database(msg) => AppError::Database(msg),
        }
    }
}

impl From<anyhow::Error> for FacilityError {
    fn from(err: anyhow::Error) -> Self {
        FacilityError::Database(err.to_string())
    }
}
