use chrono::{Duration, Utc};
use reqwest::Method;
use serde_json::{json, Map, Value};
use tracing::debug;

use shared_database::{AppState, PostgrestClient, TableQuery};
use shared_utils::pagination::page_bounds;

use crate::models::{CreateDocumentRequest, Document, DocumentError, DocumentQuery, UpdateDocumentRequest};

pub struct DocumentService {
    store: PostgrestClient,
}

impl DocumentService {
    pub fn new(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
        }
    }

    pub async fn create_document(
        &self,
        request: CreateDocumentRequest,
        created_by: i64,
    ) -> Result<Document, DocumentError> {
        debug!("Creating document: {}", request.title);

        let now = Utc::now().to_rfc3339();
        let row = json!({
            "title": request.title,
            "description": request.description,
            "category": request.category,
            "department_id": request.department_id,
            "created_by": created_by,
            "storage_path": request.storage_path,
            "content_type": request.content_type,
            "tags": request.tags,
            "is_public": request.is_public.unwrap_or(false),
            "status": request.status.unwrap_or_else(|| "active".to_string()),
            "version": 1,
            "expires_at": request.expires_at,
            "created_at": now,
            "updated_at": now,
        });

        let mut result: Vec<Document> = self
            .store
            .mutate(Method::POST, &TableQuery::new("documents").path(), Some(row))
            .await?;

        if result.is_empty() {
            return Err(DocumentError::Database("Failed to create document".to_string()));
        }
        Ok(result.remove(0))
    }

    pub async fn get_document(&self, document_id: i64) -> Result<Document, DocumentError> {
        let path = TableQuery::new("documents").eq("id", document_id).path();
        let mut rows: Vec<Document> = self.store.request(Method::GET, &path, None).await?;

        if rows.is_empty() {
            return Err(DocumentError::NotFound);
        }
        Ok(rows.remove(0))
    }

    pub async fn list_documents(&self, query: DocumentQuery) -> Result<Vec<Document>, DocumentError> {
        let mut q = TableQuery::new("documents");

        if let Some(category) = query.category {
            q = q.eq("category", category);
        }
        if let Some(status) = query.status {
            q = q.eq("status", status);
        }
        if let Some(department_id) = query.department_id {
            q = q.eq("department_id", department_id);
        }
        if let Some(created_by) = query.created_by {
            q = q.eq("created_by", created_by);
        }
        if let Some(search) = query.search {
            q = q.contains("title", &search);
        }
        if let Some(tag) = query.tag {
            q = q.contains_element("tags", &tag);
        }
        if let Some(is_public) = query.is_public {
            q = q.eq("is_public", is_public);
        }
        if let Some(start_date) = query.start_date {
            q = q.gte("created_at", start_date.to_rfc3339());
        }
        if let Some(end_date) = query.end_date {
            q = q.lte("created_at", end_date.to_rfc3339());
        }

        let (limit, offset) = page_bounds(query.limit, query.offset);
        let path = q.order("created_at.desc").paginate(limit, offset).path();

        let rows: Vec<Document> = self.store.request(Method::GET, &path, None).await?;
        Ok(rows)
    }

    pub async fn get_documents_by_category(&self, category: &str) -> Result<Vec<Document>, DocumentError> {
        let path = TableQuery::new("documents")
            .eq("category", category)
            .order("created_at.desc")
            .path();
        let rows: Vec<Document> = self.store.request(Method::GET, &path, None).await?;
        Ok(rows)
    }

    pub async fn get_documents_for_department(
        &self,
        department_id: i64,
    ) -> Result<Vec<Document>, DocumentError> {
        let path = TableQuery::new("documents")
            .eq("department_id", department_id)
            .order("created_at.desc")
            .path();
        let rows: Vec<Document> = self.store.request(Method::GET, &path, None).await?;
        Ok(rows)
    }

    /// Documents whose expiry falls within the next 30 days.
    pub async fn get_expiring_documents(&self) -> Result<Vec<Document>, DocumentError> {
        let horizon = Utc::now() + Duration::days(30);
        let path = TableQuery::new("documents")
            .lte("expires_at", horizon.to_rfc3339())
            .order("expires_at.asc")
            .path();
        let rows: Vec<Document> = self.store.request(Method::GET, &path, None).await?;
        Ok(rows)
    }

    pub async fn get_documents_by_ids(&self, ids: &[i64]) -> Result<Vec<Document>, DocumentError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let path = TableQuery::new("documents").in_ids("id", ids).path();
        let rows: Vec<Document> = self.store.request(Method::GET, &path, None).await?;
        Ok(rows)
    }

    pub async fn update_document(
        &self,
        document_id: i64,
        request: UpdateDocumentRequest,
    ) -> Result<Document, DocumentError> {
        let mut update = Map::new();

        if let Some(title) = request.title {
            update.insert("title".to_string(), json!(title));
        }
        if let Some(description) = request.description {
            update.insert("description".to_string(), json!(description));
        }
        if let Some(category) = request.category {
            update.insert("category".to_string(), json!(category));
        }
        if let Some(department_id) = request.department_id {
            update.insert("department_id".to_string(), json!(department_id));
        }
        if let Some(storage_path) = request.storage_path {
            update.insert("storage_path".to_string(), json!(storage_path));
        }
        if let Some(content_type) = request.content_type {
            update.insert("content_type".to_string(), json!(content_type));
        }
        if let Some(tags) = request.tags {
            update.insert("tags".to_string(), json!(tags));
        }
        if let Some(is_public) = request.is_public {
            update.insert("is_public".to_string(), json!(is_public));
        }
        if let Some(status) = request.status {
            update.insert("status".to_string(), json!(status));
        }
        if let Some(expires_at) = request.expires_at {
            update.insert("expires_at".to_string(), json!(expires_at));
        }
        update.insert("updated_at".to_string(), json!(Utc::now().to_rfc3339()));

        let path = TableQuery::new("documents").eq("id", document_id).path();
        let mut result: Vec<Document> = self
            .store
            .mutate(Method::PATCH, &path, Some(Value::Object(update)))
            .await?;

        if result.is_empty() {
            return Err(DocumentError::NotFound);
        }
        Ok(result.remove(0))
    }

    pub async fn delete_document(&self, document_id: i64) -> Result<(), DocumentError> {
        let path = TableQuery::new("documents").eq("id", document_id).path();
        let deleted: Vec<Value> = self.store.mutate(Method::DELETE, &path, None).await?;

        if deleted.is_empty() {
            return Err(DocumentError::NotFound);
        }
        Ok(())
    }
}
