use chrono::Utc;
use reqwest::Method;
use serde_json::json;

use shared_database::{AppState, PostgrestClient, TableQuery};
use shared_utils::pagination::page_bounds;

use crate::models::{AuditError, AuditLogEntry, AuditQuery, CreateAuditEntryRequest};

pub struct AuditService {
    store: PostgrestClient,
}

impl AuditService {
    pub fn new(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
        }
    }

    pub async fn append_entry(
        &self,
        request: CreateAuditEntryRequest,
        user_id: i64,
    ) -> Result<AuditLogEntry, AuditError> {
        let row = json!({
            "user_id": user_id,
            "action": request.action,
            "module": request.module,
            "resource_type": request.resource_type,
            "resource_id": request.resource_id,
            "department_id": request.department_id,
            "detail": request.detail,
            "ip_address": request.ip_address,
            "created_at": Utc::now().to_rfc3339(),
        });

        let mut result: Vec<AuditLogEntry> = self
            .store
            .mutate(Method::POST, &TableQuery::new("audit_log").path(), Some(row))
            .await?;

        if result.is_empty() {
            return Err(AuditError::Database("Failed to append audit entry".to_string()));
        }
        Ok(result.remove(0))
    }

    pub async fn get_entry(&self, entry_id: i64) -> Result<AuditLogEntry, AuditError> {
        let path = TableQuery::new("audit_log").eq("id", entry_id).path();
        let mut rows: Vec<AuditLogEntry> = self.store.request(Method::GET, &path, None).await?;

        if rows.is_empty() {
            return Err(AuditError::NotFound);
        }
        Ok(rows.remove(0))
    }

    pub async fn list_entries(&self, query: AuditQuery) -> Result<Vec<AuditLogEntry>, AuditError> {
        let mut q = TableQuery::new("audit_log");

        if let Some(user_id) = query.user_id {
            q = q.eq("user_id", user_id);
        }
        if let Some(action) = query.action {
            q = q.eq("action", action);
        }
        if let Some(module) = query.module {
            q = q.eq("module", module);
        }
        if let Some(resource_type) = query.resource_type {
            q = q.eq("resource_type", resource_type);
        }
        if let Some(resource_id) = query.resource_id {
            q = q.eq("resource_id", resource_id);
        }
        if let Some(department_id) = query.department_id {
            q = q.eq("department_id", department_id);
        }
        if let Some(start_date) = query.start_date {
            q = q.gte("created_at", start_date);
        }
        if let Some(end_date) = query.end_date {
            q = q.lte("created_at", end_date);
        }

        let (limit, offset) = page_bounds(query.limit, query.offset);
        let path = q.order("created_at.desc").paginate(limit, offset).path();

        let rows: Vec<AuditLogEntry> = self.store.request(Method::GET, &path, None).await?;
        Ok(rows)
    }
}
