use chrono::Utc;
use reqwest::Method;
use serde_json::{json, Map, Value};

use shared_database::{AppState, PostgrestClient, TableQuery};
use shared_utils::pagination::page_bounds;

use crate::models::{
    CreateTechnologistRequest, StaffError, Technologist, TechnologistQuery,
    UpdateTechnologistRequest,
};

pub struct TechnologistService {
    store: PostgrestClient,
}

impl TechnologistService {
    pub fn new(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
        }
    }

    pub async fn create_technologist(
        &self,
        request: CreateTechnologistRequest,
    ) -> Result<Technologist, StaffError> {
        let now = Utc::now().to_rfc3339();
        let row = json!({
            "name": request.name,
            "department_id": request.department_id,
            "specialization": request.specialization,
            "certification_number": request.certification_number,
            "status": request.status.as_deref().unwrap_or("active"),
            "created_at": now,
            "updated_at": now,
        });

        let mut result: Vec<Technologist> = self
            .store
            .mutate(Method::POST, &TableQuery::new("technologists").path(), Some(row))
            .await?;

        if result.is_empty() {
            return Err(StaffError::Database("Failed to create technologist".to_string()));
        }
        Ok(result.remove(0))
    }

    pub async fn get_technologist(&self, technologist_id: i64) -> Result<Technologist, StaffError> {
        let path = TableQuery::new("technologists").eq("id", technologist_id).path();
        let mut rows: Vec<Technologist> = self.store.request(Method::GET, &path, None).await?;

        if rows.is_empty() {
            return Err(StaffError::TechnologistNotFound);
        }
        Ok(rows.remove(0))
    }

    pub async fn list_technologists(
        &self,
        query: TechnologistQuery,
    ) -> Result<Vec<Technologist>, StaffError> {
        let mut q = TableQuery::new("technologists");

        if let Some(department_id) = query.department_id {
            q = q.eq("department_id", department_id);
        }
        if let Some(specialization) = query.specialization {
            q = q.eq("specialization", specialization);
        }
        if let Some(status) = query.status {
            q = q.eq("status", status);
        }

        let (limit, offset) = page_bounds(query.limit, query.offset);
        let path = q.paginate(limit, offset).path();

        let rows: Vec<Technologist> = self.store.request(Method::GET, &path, None).await?;
        Ok(rows)
    }

    pub async fn update_technologist(
        &self,
        technologist_id: i64,
        request: UpdateTechnologistRequest,
    ) -> Result<Technologist, StaffError> {
        let mut update = Map::new();

        if let Some(name) = request.name {
            update.insert("name".to_string(), json!(name));
        }
        if let Some(department_id) = request.department_id {
            update.insert("department_id".to_string(), json!(department_id));
        }
        if let Some(specialization) = request.specialization {
            update.insert("specialization".to_string(), json!(specialization));
        }
        if let Some(certification_number) = request.certification_number {
            update.insert("certification_number".to_string(), json!(certification_number));
        }
        if let Some(status) = request.status {
            update.insert("status".to_string(), json!(status));
        }
        update.insert("updated_at".to_string(), json!(Utc::now().to_rfc3339()));

        let path = TableQuery::new("technologists").eq("id", technologist_id).path();
        let mut result: Vec<Technologist> = self
            .store
            .mutate(Method::PATCH, &path, Some(Value::Object(update)))
            .await?;

        if result.is_empty() {
            return Err(StaffError::TechnologistNotFound);
        }
        Ok(result.remove(0))
    }

    pub async fn delete_technologist(&self, technologist_id: i64) -> Result<(), StaffError> {
        let path = TableQuery::new("technologists").eq("id", technologist_id).path();
        let deleted: Vec<Value> = self.store.mutate(Method::DELETE, &path, None).await?;

        if deleted.is_empty() {
            return Err(StaffError::TechnologistNotFound);
        }
        Ok(())
    }
}
