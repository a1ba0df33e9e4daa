use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shared_models::error::AppError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub category: String,
    pub department_id: Option<i64>,
    pub created_by: i64,
    pub storage_path: String,
    pub content_type: Option<String>,
    pub tags: Option<Vec<String>>,
    pub is_public: bool,
    pub status: String,
    pub version: i32,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateDocumentRequest {
    pub title: String,
    pub description: Option<String>,
    pub category: String,
    pub department_id: Option<i64>,
    pub storage_path: String,
    pub content_type: Option<String>,
    pub tags: Option<Vec<String>>,
    pub is_public: Option<bool>,
    pub status: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateDocumentRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub department_id: Option<i64>,
    pub storage_path: Option<String>,
    pub content_type: Option<String>,
    pub tags: Option<Vec<String>>,
    pub is_public: Option<bool>,
    pub status: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DocumentQuery {
    pub category: Option<String>,
    pub status: Option<String>,
    pub department_id: Option<i64>,
    pub created_by: Option<i64>,
    pub search: Option<String>,
    pub tag: Option<String>,
    pub is_public: Option<bool>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentVersion {
    pub id: i64,
    pub document_id: i64,
    pub version: i32,
    pub storage_path: String,
    pub uploaded_by: i64,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateVersionRequest {
    pub storage_path: String,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentShare {
    pub id: i64,
    pub document_id: i64,
    pub shared_by: i64,
    pub shared_with: i64,
    pub permission: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ShareDocumentRequest {
    pub shared_with: i64,
    pub permission: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("Document not found")]
    NotFound,

    #[error("Document version not found")]
    VersionNotFound,

    #[error("Database error: {0}")]
    Database(String),
}

impl From<DocumentError> for AppError {
    fn from(err: DocumentError) -> Self {
        match err {
            DocumentError::NotFound | DocumentError::VersionNotFound => {
                AppError::NotFound(err.to_string())
            }
            DocumentError::Database(msg) => AppError::Database(msg),
        }
    }
}

impl From<anyhow::Error> for DocumentError {
    fn from(err: anyhow::Error) -> Self {
        DocumentError::Database(err.to_string())
    }
}
