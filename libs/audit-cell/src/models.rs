use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use shared_models::error::AppError;

/// Append-only log row. There is no updated_at: entries are never
/// modified or deleted after the fact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditLogEntry {
    pub id: i64,
    pub user_id: Option<i64>,
    pub action: String,
    pub module: String,
    pub resource_type: Option<String>,
    pub resource_id: Option<i64>,
    pub department_id: Option<i64>,
    pub detail: Option<Value>,
    pub ip_address: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateAuditEntryRequest {
    pub action: String,
    pub module: String,
    pub resource_type: Option<String>,
    pub resource_id: Option<i64>,
    pub department_id: Option<i64>,
    pub detail: Option<Value>,
    pub ip_address: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuditQuery {
    pub user_id: Option<i64>,
    pub action: Option<String>,
    pub module: Option<String>,
    pub resource_type: Option<String>,
    pub resource_id: Option<i64>,
    pub department_id: Option<i64>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, thiserror::Error)]
pub enum AuditError {
    #[error("Audit log entry not found")]
    NotFound,

    #[error("Database error: {0}")]
    Database(String),
}

impl From<AuditError> for AppError {
    fn from(err: AuditError) -> Self {
        match err {
            AuditError::NotFound => AppError::NotFound(err.to_string()),
            AuditError::Database(msg) => AppError::Database(msg),
        }
    }
}

impl From<anyhow::Error> for AuditError {
    fn from(err: anyhow::Error) -> Self {
        AuditError::Database(err.to_string())
    }
}
