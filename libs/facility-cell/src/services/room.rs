use chrono::Utc;
use reqwest::Method;
use serde_json::{json, Map, Value};

use shared_database::{AppState, PostgrestClient, TableQuery};
use shared_utils::pagination::page_bounds;

use crate::models::{CreateRoomRequest, FacilityError, Room, RoomQuery, RoomStatus, UpdateRoomRequest};

pub struct RoomService {
    store: PostgrestClient,
}

impl RoomService {
    pub fn new(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
        }
    }

    pub async fn create_room(&self, request: CreateRoomRequest) -> Result<Room, FacilityError> {
        let now = Utc::now().to_rfc3339();
        let row = json!({
            "name": request.name,
            "department_id": request.department_id,
            "capacity": request.capacity,
            "status": request.status.unwrap_or(RoomStatus::Available),
            "created_at": now,
            "updated_at": now,
        });

        let mut result: Vec<Room> = self
            .store
            .mutate(Method::POST, &TableQuery::new("rooms").path(), Some(row))
            .await?;

        if result.is_empty() {
            return Err(FacilityError::Database("Failed to create room".to_string()));
        }
        Ok(result.remove(0))
    }

    pub async fn get_room(&self, room_id: i64) -> Result<Room, FacilityError> {
        let path = TableQuery::new("rooms").eq("id", room_id).path();
        let mut rows: Vec<Room> = self.store.request(Method::GET, &path, None).await?;

        if rows.is_empty() {
            return Err(FacilityError::RoomNotFound);
        }
        Ok(rows.remove(0))
    }

    pub async fn list_rooms(&self, query: RoomQuery) -> Result<Vec<Room>, FacilityError> {
        let mut q = TableQuery::new("rooms");

        if let Some(department_id) = query.department_id {
            q = q.eq("department_id", department_id);
        }
        if let Some(status) = query.status {
            q = q.eq("status", status.as_str());
        }

        let (limit, offset) = page_bounds(query.limit, query.offset);
        let path = q.paginate(limit, offset).path();

        let rows: Vec<Room> = self.store.request(Method::GET, &path, None).await?;
        Ok(rows)
    }

    pub async fn update_room(
        &self,
        room_id: i64,
        request: UpdateRoomRequest,
    ) -> Result<Room, FacilityError> {
        let mut update = Map::new();

        if let Some(name) = request.name {
            update.insert("name".to_string(), json!(name));
        }
        if let Some(department_id) = request.department_id {
            update.insert("department_id".to_string(), json!(department_id));
        }
        if let Some(capacity) = request.capacity {
            update.insert("capacity".to_string(), json!(capacity));
        }
        if let Some(status) = request.status {
            update.insert("status".to_string(), json!(status));
        }
        update.insert("updated_at".to_string(), json!(Utc::now().to_rfc3339()));

        let path = TableQuery::new("rooms").eq("id", room_id).path();
        let mut result: Vec<Room> = self
            .store
            .mutate(Method::PATCH, &path, Some(Value::Object(update)))
            .await?;

        if result.is_empty() {
            return Err(FacilityError::RoomNotFound);
        }
        Ok(result.remove(0))
    }

    pub async fn delete_room(&self, room_id: i64) -> Result<(), FacilityError> {
        let path = TableQuery::new("rooms").eq("id", room_id).path();
        let deleted: Vec<Value> = self.store.mutate(Method::DELETE, &path, None).await?;

        if deleted.is_empty() {
            return Err(FacilityError::RoomNotFound);
        }
        Ok(())
    }
}
