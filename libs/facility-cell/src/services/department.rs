use chrono::Utc;
use reqwest::Method;
use serde_json::{json, Map, Value};

use shared_database::{AppState, PostgrestClient, TableQuery};
use shared_utils::pagination::page_bounds;

use crate::models::{
    CreateDepartmentRequest, Department, DepartmentStatus, FacilityError, UpdateDepartmentRequest,
};

pub struct DepartmentService {
    store: PostgrestClient,
}

impl DepartmentService {
    pub fn new(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
        }
    }

    pub async fn create_department(
        &self,
        request: CreateDepartmentRequest,
    ) -> Result<Department, FacilityError> {
        let now = Utc::now().to_rfc3339();
        let row = json!({
            "name": request.name,
            "description": request.description,
            "status": request.status.unwrap_or(DepartmentStatus::Active),
            "created_at": now,
            "updated_at": now,
        });

        let mut result: Vec<Department> = self
            .store
            .mutate(Method::POST, &TableQuery::new("departments").path(), Some(row))
            .await?;

        if result.is_empty() {
            return Err(FacilityError::Database("Failed to create department".to_string()));
        }
        Ok(result.remove(0))
    }

    pub async fn get_department(&self, department_id: i64) -> Result<Department, FacilityError> {
        let path = TableQuery::new("departments").eq("id", department_id).path();
        let mut rows: Vec<Department> = self.store.request(Method::GET, &path, None).await?;

        if rows.is_empty() {
            return Err(FacilityError::DepartmentNotFound);
        }
        Ok(rows.remove(0))
    }

    pub async fn list_departments(
        &self,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<Department>, FacilityError> {
        let (limit, offset) = page_bounds(limit, offset);
        let path = TableQuery::new("departments")
            .order("name.asc")
            .paginate(limit, offset)
            .path();

        let rows: Vec<Department> = self.store.request(Method::GET, &path, None).await?;
        Ok(rows)
    }

    pub async fn update_department(
        &self,
        department_id: i64,
        request: UpdateDepartmentRequest,
    ) -> Result<Department, FacilityError> {
        let mut update = Map::new();

        if let Some(name) = request.name {
            update.insert("name".to_string(), json!(name));
        }
        if let Some(description) = request.description {
            update.insert("description".to_string(), json!(description));
        }
        if let Some(status) = request.status {
            update.insert("status".to_string(), json!(status));
        }
        update.insert("updated_at".to_string(), json!(Utc::now().to_rfc3339()));

        let path = TableQuery::new("departments").eq("id", department_id).path();
        let mut result: Vec<Department> = self
            .store
            .mutate(Method::PATCH, &path, Some(Value::Object(update)))
            .await?;

        if result.is_empty() {
            return Err(FacilityError::DepartmentNotFound);
        }
        Ok(result.remove(0))
    }

    pub async fn delete_department(&self, department_id: i64) -> Result<(), FacilityError> {
        let path = TableQuery::new("departments").eq("id", department_id).path();
        let deleted: Vec<Value> = self.store.mutate(Method::DELETE, &path, None).await?;

        if deleted.is_empty() {
            return Err(FacilityError::DepartmentNotFound);
        }
        Ok(())
    }
}
