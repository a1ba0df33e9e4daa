use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use shared_models::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaintenanceType {
    Preventive,
    Corrective,
    Emergency,
    Routine,
}

impl MaintenanceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MaintenanceType::Preventive => "preventive",
            MaintenanceType::Corrective => "corrective",
            MaintenanceType::Emergency => "emergency",
            MaintenanceType::Routine => "routine",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Equipment {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub equipment_type: String,
    pub serial_number: String,
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub room_id: Option<i64>,
    pub status: String,
    pub installation_date: Option<NaiveDate>,
    pub warranty_expiry_date: Option<NaiveDate>,
    pub last_maintenance_date: Option<NaiveDate>,
    pub next_maintenance_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateEquipmentRequest {
    pub name: String,
    #[serde(rename = "type")]
    pub equipment_type: String,
    pub serial_number: String,
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub room_id: Option<i64>,
    pub status: Option<String>,
    pub installation_date: Option<NaiveDate>,
    pub warranty_expiry_date: Option<NaiveDate>,
    pub last_maintenance_date: Option<NaiveDate>,
    pub next_maintenance_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateEquipmentRequest {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub equipment_type: Option<String>,
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub room_id: Option<i64>,
    pub status: Option<String>,
    pub installation_date: Option<NaiveDate>,
    pub warranty_expiry_date: Option<NaiveDate>,
    pub last_maintenance_date: Option<NaiveDate>,
    pub next_maintenance_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EquipmentQuery {
    #[serde(rename = "type")]
    pub equipment_type: Option<String>,
    pub status: Option<String>,
    pub room_id: Option<i64>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaintenanceRecord {
    pub id: i64,
    pub equipment_id: i64,
    pub description: Option<String>,
    pub performed_by: Option<String>,
    pub cost: Option<Decimal>,
    pub maintenance_date: NaiveDate,
    pub last_maintenance_date: Option<NaiveDate>,
    pub next_maintenance_date: Option<NaiveDate>,
    pub status: String,
    pub maintenance_type: MaintenanceType,
    pub parts_replaced: Option<String>,
    pub technician_notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateMaintenanceRequest {
    pub equipment_id: i64,
    pub description: Option<String>,
    pub performed_by: Option<String>,
    pub cost: Option<Decimal>,
    pub maintenance_date: NaiveDate,
    pub last_maintenance_date: Option<NaiveDate>,
    pub next_maintenance_date: Option<NaiveDate>,
    pub status: Option<String>,
    pub maintenance_type: MaintenanceType,
    pub parts_replaced: Option<String>,
    pub technician_notes: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateMaintenanceRequest {
    pub description: Option<String>,
    pub performed_by: Option<String>,
    pub cost: Option<Decimal>,
    pub maintenance_date: Option<NaiveDate>,
    pub last_maintenance_date: Option<NaiveDate>,
    pub next_maintenance_date: Option<NaiveDate>,
    pub status: Option<String>,
    pub maintenance_type: Option<MaintenanceType>,
    pub parts_replaced: Option<String>,
    pub technician_notes: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MaintenanceQuery {
    pub equipment_id: Option<i64>,
    pub status: Option<String>,
    pub maintenance_type: Option<MaintenanceType>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpcomingMaintenanceQuery {
    pub days_ahead: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityControl {
    pub id: i64,
    pub check_type: String,
    pub study_id: Option<i64>,
    pub equipment_id: Option<i64>,
    pub report_id: Option<i64>,
    pub performed_by: Option<i64>,
    pub reviewed_by: Option<i64>,
    pub status: String,
    pub priority: Option<String>,
    pub result: Option<Value>,
    pub comments: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateQualityControlRequest {
    pub check_type: String,
    pub study_id: Option<i64>,
    pub equipment_id: Option<i64>,
    pub report_id: Option<i64>,
    pub performed_by: Option<i64>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub result: Option<Value>,
    pub comments: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateQualityControlRequest {
    pub check_type: Option<String>,
    pub reviewed_by: Option<i64>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub result: Option<Value>,
    pub comments: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QualityControlQuery {
    pub check_type: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, thiserror::Error)]
pub enum EquipmentError {
    #[error("Equipment not found")]
    NotFound,

    #[error("Maintenance record not found")]
    MaintenanceNotFound,

    #[error("Quality control record not found")]
    QualityControlNotFound,

    #[error("Equipment with serial number {serial} already exists")]
    SerialAlreadyExists { serial: String },

    #[error("Database error: {0}")]
    Database(String),
}

impl From<EquipmentError> for AppError {
    fn from(err: EquipmentError) -> Self {
        match err {
            EquipmentError::NotFound
            | EquipmentError::MaintenanceNotFound
            | EquipmentError::QualityControlNotFound => AppError::NotFound(err.to_string()),
            EquipmentError::SerialAlreadyExists { .. } => AppError::BadRequest(err.to_string()),
            EquipmentError::Database(msg) => AppError::Database(msg),
        }
    }
}

impl From<anyhow::Error> for EquipmentError {
    fn from(err: anyhow::Error) -> Self {
        EquipmentError::Database(err.to_string())
    }
}
