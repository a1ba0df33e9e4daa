use chrono::Utc;
use reqwest::Method;
use serde_json::{json, Value};

use shared_database::{AppState, PostgrestClient, TableQuery};

use crate::models::{Document, DocumentError, DocumentShare, ShareDocumentRequest};

use super::DocumentService;

pub struct ShareService {
    store: PostgrestClient,
}

impl ShareService {
    pub fn new(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
        }
    }

    pub async fn share_document(
        &self,
        document_id: i64,
        request: ShareDocumentRequest,
        shared_by: i64,
    ) -> Result<DocumentShare, DocumentError> {
        let doc_path = TableQuery::new("documents").eq("id", document_id).path();
        let docs: Vec<Value> = self.store.request(Method::GET, &doc_path, None).await?;
        if docs.is_empty() {
            return Err(DocumentError::NotFound);
        }

        let row = json!({
            "document_id": document_id,
            "shared_by": shared_by,
            "shared_with": request.shared_with,
            "permission": request.permission.unwrap_or_else(|| "view".to_string()),
            "is_active": true,
            "created_at": Utc::now().to_rfc3339(),
        });

        let mut result: Vec<DocumentShare> = self
            .store
            .mutate(Method::POST, &TableQuery::new("document_shares").path(), Some(row))
            .await?;

        if result.is_empty() {
            return Err(DocumentError::Database("Failed to share document".to_string()));
        }
        Ok(result.remove(0))
    }

    pub async fn get_shared_with_user(
        &self,
        state: &AppState,
        user_id: i64,
    ) -> Result<Vec<Document>, DocumentError> {
        let path = TableQuery::new("document_shares")
            .eq("shared_with", user_id)
            .eq("is_active", true)
            .path();
        let shares: Vec<DocumentShare> = self.store.request(Method::GET, &path, None).await?;

        let ids: Vec<i64> = shares.iter().map(|s| s.document_id).collect();
        DocumentService::new(state).get_documents_by_ids(&ids).await
    }

    pub async fn get_shared_by_user(
        &self,
        state: &AppState,
        user_id: i64,
    ) -> Result<Vec<Document>, DocumentError> {
        let path = TableQuery::new("document_shares")
            .eq("shared_by", user_id)
            .eq("is_active", true)
            .path();
        let shares: Vec<DocumentShare> = self.store.request(Method::GET, &path, None).await?;

        let ids: Vec<i64> = shares.iter().map(|s| s.document_id).collect();
        DocumentService::new(state).get_documents_by_ids(&ids).await
    }
}
