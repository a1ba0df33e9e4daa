use chrono::Utc;
use reqwest::Method;
use serde_json::{json, Map, Value};
use tracing::debug;

use auth_cell::services::password::hash_password;
use shared_database::{AppState, PostgrestClient, TableQuery};
use shared_utils::pagination::page_bounds;

use crate::models::{CreateStaffUserRequest, StaffError, StaffQuery, StaffUser, UpdateStaffUserRequest};

pub struct StaffService {
    store: PostgrestClient,
}

impl StaffService {
    pub fn new(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
        }
    }

    pub async fn create_staff_user(
        &self,
        request: CreateStaffUserRequest,
    ) -> Result<StaffUser, StaffError> {
        debug!("Creating staff user: {}", request.email);

        let existing_path = TableQuery::new("staff_users").eq("email", &request.email).path();
        let existing: Vec<Value> = self.store.request(Method::GET, &existing_path, None).await?;
        if !existing.is_empty() {
            return Err(StaffError::EmailAlreadyExists);
        }

        let password_hash =
            hash_password(&request.password).map_err(|e| StaffError::Hash(e.to_string()))?;

        let now = Utc::now().to_rfc3339();
        let row = json!({
            "first_name": request.first_name,
            "last_name": request.last_name,
            "email": request.email,
            "password_hash": password_hash,
            "role": request.role,
            "department_id": request.department_id,
            "is_active": request.is_active.unwrap_or(true),
            "created_at": now,
            "updated_at": now,
        });

        let mut result: Vec<StaffUser> = self
            .store
            .mutate(Method::POST, &TableQuery::new("staff_users").path(), Some(row))
            .await?;

        if result.is_empty() {
            return Err(StaffError::Database("Failed to create staff user".to_string()));
        }
        Ok(result.remove(0))
    }

    pub async fn get_staff_user(&self, user_id: i64) -> Result<StaffUser, StaffError> {
        let path = TableQuery::new("staff_users").eq("id", user_id).path();
        let mut rows: Vec<StaffUser> = self.store.request(Method::GET, &path, None).await?;

        if rows.is_empty() {
            return Err(StaffError::NotFound);
        }
        Ok(rows.remove(0))
    }

    pub async fn list_staff_users(&self, query: StaffQuery) -> Result<Vec<StaffUser>, StaffError> {
        let mut q = TableQuery::new("staff_users");

        if let Some(role) = query.role {
            q = q.eq("role", role);
        }
        if let Some(department_id) = query.department_id {
            q = q.eq("department_id", department_id);
        }
        if let Some(is_active) = query.is_active {
            q = q.eq("is_active", is_active);
        }

        let (limit, offset) = page_bounds(query.limit, query.offset);
        let path = q.paginate(limit, offset).path();

        let rows: Vec<StaffUser> = self.store.request(Method::GET, &path, None).await?;
        Ok(rows)
    }

    pub async fn update_staff_user(
        &self,
        user_id: i64,
        request: UpdateStaffUserRequest,
    ) -> Result<StaffUser, StaffError> {
        let mut update = Map::new();

        if let Some(first_name) = request.first_name {
            update.insert("first_name".to_string(), json!(first_name));
        }
        if let Some(last_name) = request.last_name {
            update.insert("last_name".to_string(), json!(last_name));
        }
        if let Some(email) = request.email {
            update.insert("email".to_string(), json!(email));
        }
        if let Some(password) = request.password {
            let password_hash =
                hash_password(&password).map_err(|e| StaffError::Hash(e.to_string()))?;
            update.insert("password_hash".to_string(), json!(password_hash));
        }
        if let Some(role) = request.role {
            update.insert("role".to_string(), json!(role));
        }
        if let Some(department_id) = request.department_id {
            update.insert("department_id".to_string(), json!(department_id));
        }
        if let Some(is_active) = request.is_active {
            update.insert("is_active".to_string(), json!(is_active));
        }
        update.insert("updated_at".to_string(), json!(Utc::now().to_rfc3339()));

        let path = TableQuery::new("staff_users").eq("id", user_id).path();
        let mut result: Vec<StaffUser> = self
            .store
            .mutate(Method::PATCH, &path, Some(Value::Object(update)))
            .await?;

        if result.is_empty() {
            return Err(StaffError::NotFound);
        }
        Ok(result.remove(0))
    }

    pub async fn delete_staff_user(&self, user_id: i64) -> Result<(), StaffError> {
        let path = TableQuery::new("staff_users").eq("id", user_id).path();
        let deleted: Vec<Value> = self.store.mutate(Method::DELETE, &path, None).await?;

        if deleted.is_empty() {
            return Err(StaffError::NotFound);
        }
        Ok(())
    }

    pub async fn get_staff_by_role(&self, role: &str) -> Result<Vec<StaffUser>, StaffError> {
        let path = TableQuery::new("staff_users").eq("role", role).path();
        let rows: Vec<StaffUser> = self.store.request(Method::GET, &path, None).await?;
        Ok(rows)
    }
}
