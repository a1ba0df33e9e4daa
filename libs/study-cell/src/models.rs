use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use shared_models::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StudyStatus {
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
    Reported,
}

impl StudyStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StudyStatus::Scheduled => "scheduled",
            StudyStatus::InProgress => "in_progress",
            StudyStatus::Completed => "completed",
            StudyStatus::Cancelled => "cancelled",
            StudyStatus::Reported => "reported",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Draft,
    Pending,
    Final,
    Amended,
}

impl ReportStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportStatus::Draft => "draft",
            ReportStatus::Pending => "pending",
            ReportStatus::Final => "final",
            ReportStatus::Amended => "amended",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Study {
    pub id: i64,
    pub patient_id: i64,
    pub referring_physician_id: Option<i64>,
    pub room_id: Option<i64>,
    pub equipment_id: Option<i64>,
    pub study_date: NaiveDate,
    pub study_type: String,
    pub priority: Option<String>,
    pub status: StudyStatus,
    pub notes: Option<String>,
    pub report: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateStudyRequest {
    pub patient_id: i64,
    pub referring_physician_id: Option<i64>,
    pub room_id: Option<i64>,
    pub equipment_id: Option<i64>,
    pub study_date: NaiveDate,
    pub study_type: String,
    pub priority: Option<String>,
    pub status: Option<StudyStatus>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateStudyRequest {
    pub referring_physician_id: Option<i64>,
    pub room_id: Option<i64>,
    pub equipment_id: Option<i64>,
    pub study_date: Option<NaiveDate>,
    pub study_type: Option<String>,
    pub priority: Option<String>,
    pub status: Option<StudyStatus>,
    pub notes: Option<String>,
    pub report: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StudyQuery {
    pub patient_id: Option<i64>,
    pub physician_id: Option<i64>,
    pub status: Option<StudyStatus>,
    pub study_type: Option<String>,
    pub priority: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RadiologyReport {
    pub id: i64,
    pub study_id: i64,
    pub patient_id: i64,
    pub radiologist_id: i64,
    pub findings: Option<String>,
    pub impression: Option<String>,
    pub recommendations: Option<String>,
    pub status: ReportStatus,
    pub critical_findings: bool,
    pub signed_by: Option<i64>,
    pub signed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateReportRequest {
    pub study_id: i64,
    pub patient_id: i64,
    pub radiologist_id: i64,
    pub findings: Option<String>,
    pub impression: Option<String>,
    pub recommendations: Option<String>,
    pub status: Option<ReportStatus>,
    pub critical_findings: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateReportRequest {
    pub findings: Option<String>,
    pub impression: Option<String>,
    pub recommendations: Option<String>,
    pub status: Option<ReportStatus>,
    pub critical_findings: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReportQuery {
    pub study_id: Option<i64>,
    pub patient_id: Option<i64>,
    pub radiologist_id: Option<i64>,
    pub status: Option<ReportStatus>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageAnnotation {
    pub id: i64,
    pub study_id: i64,
    pub image_id: String,
    pub created_by: i64,
    #[serde(rename = "type")]
    pub annotation_type: String,
    pub data: Value,
    pub status: String,
    pub notes: Option<String>,
    pub version: i32,
    pub is_ai_generated: bool,
    pub reviewed_by: Option<i64>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateAnnotationRequest {
    pub study_id: i64,
    pub image_id: String,
    pub created_by: i64,
    #[serde(rename = "type")]
    pub annotation_type: String,
    pub data: Value,
    pub status: Option<String>,
    pub notes: Option<String>,
    pub is_ai_generated: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateAnnotationRequest {
    pub image_id: Option<String>,
    #[serde(rename = "type")]
    pub annotation_type: Option<String>,
    pub data: Option<Value>,
    pub status: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReviewAnnotationRequest {
    pub status: String,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnnotationQuery {
    pub study_id: Option<i64>,
    pub created_by: Option<i64>,
    #[serde(rename = "type")]
    pub annotation_type: Option<String>,
    pub status: Option<String>,
    pub is_ai_generated: Option<bool>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProtocolTemplate {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub equipment_type: Option<String>,
    pub department_id: Option<i64>,
    pub body: Value,
    pub version: i32,
    pub is_active: bool,
    pub created_by: Option<i64>,
    pub updated_by: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateProtocolRequest {
    pub name: String,
    pub category: String,
    pub equipment_type: Option<String>,
    pub department_id: Option<i64>,
    pub body: Value,
    pub version: Option<i32>,
    pub is_active: Option<bool>,
    pub created_by: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProtocolRequest {
    pub name: Option<String>,
    pub category: Option<String>,
    pub equipment_type: Option<String>,
    pub department_id: Option<i64>,
    pub body: Option<Value>,
    pub version: Option<i32>,
    pub is_active: Option<bool>,
    pub updated_by: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProtocolQuery {
    pub category: Option<String>,
    pub equipment_type: Option<String>,
    pub department_id: Option<i64>,
    pub is_active: Option<bool>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, thiserror::Error)]
pub enum StudyError {
    #[error("Study not found")]
    NotFound,

    #[error("Report not found")]
    ReportNotFound,

    #[error("Annotation not found")]
    AnnotationNotFound,

    #[error("Protocol template not found")]
    ProtocolNotFound,

    #[error("Database error: {0}")]
    Database(String),
}

impl From<StudyError> for AppError {
    fn from(err: StudyError) -> Self {
        match err {
            StudyError::NotFound
            | StudyError::ReportNotFound
            | StudyError::AnnotationNotFound
            | StudyError::ProtocolNotFound => AppError::NotFound(err.to_string()),
            StudyError::Database(msg) => AppError::Database(msg),
        }
    }
}

impl From<anyhow::Error> for StudyError {
    fn from(err: anyhow::Error) -> Self {
        StudyError::Database(err.to_string())
    }
}
