use chrono::Utc;
use reqwest::Method;
use serde_json::json;

use shared_database::{AppState, PostgrestClient, TableQuery};

use crate::models::{CreateVersionRequest, Document, DocumentError, DocumentVersion};

pub struct VersionService {
    store: PostgrestClient,
}

impl VersionService {
    pub fn new(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
        }
    }

    /// Records a new version row and bumps the parent document's version
    /// counter to match.
    pub async fn create_version(
        &self,
        document_id: i64,
        request: CreateVersionRequest,
        uploaded_by: i64,
    ) -> Result<DocumentVersion, DocumentError> {
        let doc_path = TableQuery::new("documents").eq("id", document_id).path();
        let mut docs: Vec<Document> = self.store.request(Method::GET, &doc_path, None).await?;
        if docs.is_empty() {
            return Err(DocumentError::NotFound);
        }
        let document = docs.remove(0);
        let next_version = document.version + 1;

        let now = Utc::now().to_rfc3339();
        let row = json!({
            "document_id": document_id,
            "version": next_version,
            "storage_path": request.storage_path,
            "uploaded_by": uploaded_by,
            "notes": request.notes,
            "created_at": now,
        });

        let mut result: Vec<DocumentVersion> = self
            .store
            .mutate(Method::POST, &TableQuery::new("document_versions").path(), Some(row))
            .await?;

        if result.is_empty() {
            return Err(DocumentError::Database(
                "Failed to create document version".to_string(),
            ));
        }

        let update = json!({
            "version": next_version,
            "storage_path": result[0].storage_path,
            "updated_at": now,
        });
        let _: Vec<Document> = self
            .store
            .mutate(Method::PATCH, &doc_path, Some(update))
            .await?;

        Ok(result.remove(0))
    }

    pub async fn list_versions(&self, document_id: i64) -> Result<Vec<DocumentVersion>, DocumentError> {
        let path = TableQuery::new("document_versions")
            .eq("document_id", document_id)
            .order("version.desc")
            .path();
        let rows: Vec<DocumentVersion> = self.store.request(Method::GET, &path, None).await?;
        Ok(rows)
    }
}
