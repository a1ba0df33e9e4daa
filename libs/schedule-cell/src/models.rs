use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use shared_models::error::AppError;

/// A staff work-schedule booking. `start_time`/`end_time` are same-day
/// wall-clock times forming the half-open interval `[start, end)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Schedule {
    pub id: i64,
    pub staff_id: i64,
    pub department_id: Option<i64>,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub shift_type: Option<String>,
    pub status: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleRequest {
    pub staff_id: i64,
    pub department_id: Option<i64>,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub shift_type: Option<String>,
    pub status: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleQuery {
    pub staff_id: Option<i64>,
    pub department_id: Option<i64>,
    pub status: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DateRangeQuery {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConflictCheckQuery {
    pub staff_id: i64,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub exclude_id: Option<i64>,
}

#[derive(Debug, thiserror::Error)]
pub enum ScheduleError {
    #[error("Schedule conflict detected")]
    ConflictDetected,

    #[error("Schedule not found")]
    NotFound,

    #[error("start_time must be before end_time")]
    InvalidTimeRange,

    #[error("Database error: {0}")]
    Database(String),
}

impl From<ScheduleError> for AppError {
    fn from(err: ScheduleError) -> Self {
        match err {
            ScheduleError::ConflictDetected => AppError::Conflict(err.to_string()),
            ScheduleError::NotFound => AppError::NotFound(err.to_string()),
            ScheduleError::InvalidTimeRange => AppError::ValidationError(err.to_string()),
            ScheduleError::Database(msg) => AppError::Database(msg),
        }
    }
}

impl From<anyhow::Error> for ScheduleError {
    fn from(err: anyhow::Error) -> Self {
        ScheduleError::Database(err.to_string())
    }
}
