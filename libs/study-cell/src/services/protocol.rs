use chrono::Utc;
use reqwest::Method;
use serde_json::{json, Map, Value};

use shared_database::{AppState, PostgrestClient, TableQuery};
use shared_utils::pagination::page_bounds;

use crate::models::{
    CreateProtocolRequest, ProtocolQuery, ProtocolTemplate, StudyError, UpdateProtocolRequest,
};

pub struct ProtocolService {
    store: PostgrestClient,
}

impl ProtocolService {
    pub fn new(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
        }
    }

    pub async fn create_protocol(
        &self,
        request: CreateProtocolRequest,
    ) -> Result<ProtocolTemplate, StudyError> {
        let now = Utc::now().to_rfc3339();
        let row = json!({
            "name": request.name,
            "category": request.category,
            "equipment_type": request.equipment_type,
            "department_id": request.department_id,
            "body": request.body,
            "version": request.version.unwrap_or(1),
            "is_active": request.is_active.unwrap_or(true),
            "created_by": request.created_by,
            "created_at": now,
            "updated_at": now,
        });

        let mut result: Vec<ProtocolTemplate> = self
            .store
            .mutate(Method::POST, &TableQuery::new("protocol_templates").path(), Some(row))
            .await?;

        if result.is_empty() {
            return Err(StudyError::Database(
                "Failed to create protocol template".to_string(),
            ));
        }
        Ok(result.remove(0))
    }

    pub async fn get_protocol(&self, protocol_id: i64) -> Result<ProtocolTemplate, StudyError> {
        let path = TableQuery::new("protocol_templates").eq("id", protocol_id).path();
        let mut rows: Vec<ProtocolTemplate> = self.store.request(Method::GET, &path, None).await?;

        if rows.is_empty() {
            return Err(StudyError::ProtocolNotFound);
        }
        Ok(rows.remove(0))
    }

    pub async fn list_protocols(
        &self,
        query: ProtocolQuery,
    ) -> Result<Vec<ProtocolTemplate>, StudyError> {
        let mut q = TableQuery::new("protocol_templates");

        if let Some(category) = query.category {
            q = q.eq("category", category);
        }
        if let Some(equipment_type) = query.equipment_type {
            q = q.eq("equipment_type", equipment_type);
        }
        if let Some(department_id) = query.department_id {
            q = q.eq("department_id", department_id);
        }
        if let Some(is_active) = query.is_active {
            q = q.eq("is_active", is_active);
        }

        let (limit, offset) = page_bounds(query.limit, query.offset);
        let path = q.paginate(limit, offset).path();

        let rows: Vec<ProtocolTemplate> = self.store.request(Method::GET, &path, None).await?;
        Ok(rows)
    }

    pub async fn get_active_protocols(&self) -> Result<Vec<ProtocolTemplate>, StudyError> {
        let path = TableQuery::new("protocol_templates").eq("is_active", true).path();
        let rows: Vec<ProtocolTemplate> = self.store.request(Method::GET, &path, None).await?;
        Ok(rows)
    }

    pub async fn update_protocol(
        &self,
        protocol_id: i64,
        request: UpdateProtocolRequest,
    ) -> Result<ProtocolTemplate, StudyError> {
        let mut update = Map::new();

        if let Some(name) = request.name {
            update.insert("name".to_string(), json!(name));
        }
        if let Some(category) = request.category {
            update.insert("category".to_string(), json!(category));
        }
        if let Some(equipment_type) = request.equipment_type {
            update.insert("equipment_type".to_string(), json!(equipment_type));
        }
        if let Some(department_id) = request.department_id {
            update.insert("department_id".to_string(), json!(department_id));
        }
        if let Some(body) = request.body {
            update.insert("body".to_string(), body);
        }
        if let Some(version) = request.version {
            update.insert("version".to_string(), json!(version));
        }
        if let Some(is_active) = request.is_active {
            update.insert("is_active".to_string(), json!(is_active));
        }
        if let Some(updated_by) = request.updated_by {
            update.insert("updated_by".to_string(), json!(updated_by));
        }
        update.insert("updated_at".to_string(), json!(Utc::now().to_rfc3339()));

        let path = TableQuery::new("protocol_templates").eq("id", protocol_id).path();
        let mut result: Vec<ProtocolTemplate> = self
            .store
            .mutate(Method::PATCH, &path, Some(Value::Object(update)))
            .await?;

        if result.is_empty() {
            return Err(StudyError::ProtocolNotFound);
        }
        Ok(result.remove(0))
    }

    /// Copies an existing template into a fresh row; id and timestamps are
    /// newly assigned, everything else carries over.
    pub async fn duplicate_protocol(
        &self,
        protocol_id: i64,
        duplicated_by: i64,
    ) -> Result<ProtocolTemplate, StudyError> {
        let source = self.get_protocol(protocol_id).await?;

        let now = Utc::now().to_rfc3339();
        let row = json!({
            "name": source.name,
            "category": source.category,
            "equipment_type": source.equipment_type,
            "department_id": source.department_id,
            "body": source.body,
            "version": source.version,
            "is_active": source.is_active,
            "created_by": duplicated_by,
            "created_at": now,
            "updated_at": now,
        });

        let mut result: Vec<ProtocolTemplate> = self
            .store
            .mutate(Method::POST, &TableQuery::new("protocol_templates").path(), Some(row))
            .await?;

        if result.is_empty() {
            return Err(StudyError::Database(
                "Failed to duplicate protocol template".to_string(),
            ));
        }
        Ok(result.remove(0))
    }

    pub async fn delete_protocol(&self, protocol_id: i64) -> Result<(), StudyError> {
        let path = TableQuery::new("protocol_templates").eq("id", protocol_id).path();
        let deleted: Vec<Value> = self.store.mutate(Method::DELETE, &path, None).await?;

        if deleted.is_empty() {
            return Err(StudyError::ProtocolNotFound);
        }
        Ok(())
    }
}
