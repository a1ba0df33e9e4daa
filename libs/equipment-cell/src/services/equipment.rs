use chrono::Utc;
use reqwest::Method;
use serde_json::{json, Map, Value};
use tracing::debug;

use shared_database::{AppState, PostgrestClient, TableQuery};
use shared_utils::pagination::page_bounds;

use crate::models::{
    CreateEquipmentRequest, Equipment, EquipmentError, EquipmentQuery, UpdateEquipmentRequest,
};

pub struct EquipmentService {
    store: PostgrestClient,
}

impl EquipmentService {
    pub fn new(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
        }
    }

    pub async fn create_equipment(
        &self,
        request: CreateEquipmentRequest,
    ) -> Result<Equipment, EquipmentError> {
        debug!("Registering equipment with serial {}", request.serial_number);

        let existing_path = TableQuery::new("equipment")
            .eq("serial_number", &request.serial_number)
            .path();
        let existing: Vec<Value> = self.store.request(Method::GET, &existing_path, None).await?;
        if !existing.is_empty() {
            return Err(EquipmentError::SerialAlreadyExists {
                serial: request.serial_number,
            });
        }

        let now = Utc::now().to_rfc3339();
        let row = json!({
            "name": request.name,
            "type": request.equipment_type,
            "serial_number": request.serial_number,
            "manufacturer": request.manufacturer,
            "model": request.model,
            "room_id": request.room_id,
            "status": request.status.unwrap_or_else(|| "operational".to_string()),
            "installation_date": request.installation_date,
            "warranty_expiry_date": request.warranty_expiry_date,
            "last_maintenance_date": request.last_maintenance_date,
            "next_maintenance_date": request.next_maintenance_date,
            "created_at": now,
            "updated_at": now,
        });

        let mut result: Vec<Equipment> = self
            .store
            .mutate(Method::POST, &TableQuery::new("equipment").path(), Some(row))
            .await?;

        if result.is_empty() {
            return Err(EquipmentError::Database("Failed to create equipment".to_string()));
        }
        Ok(result.remove(0))
    }

    pub async fn get_equipment(&self, equipment_id: i64) -> Result<Equipment, EquipmentError> {
        let path = TableQuery::new("equipment").eq("id", equipment_id).path();
        let mut rows: Vec<Equipment> = self.store.request(Method::GET, &path, None).await?;

        if rows.is_empty() {
            return Err(EquipmentError::NotFound);
        }
        Ok(rows.remove(0))
    }

    pub async fn get_equipment_by_serial(&self, serial: &str) -> Result<Equipment, EquipmentError> {
        let path = TableQuery::new("equipment").eq("serial_number", serial).path();
        let mut rows: Vec<Equipment> = self.store.request(Method::GET, &path, None).await?;

        if rows.is_empty() {
            return Err(EquipmentError::NotFound);
        }
        Ok(rows.remove(0))
    }

    pub async fn list_equipment(
        &self,
        query: EquipmentQuery,
    ) -> Result<Vec<Equipment>, EquipmentError> {
        let mut q = TableQuery::new("equipment");

        if let Some(equipment_type) = query.equipment_type {
            q = q.eq("type", equipment_type);
        }
        if let Some(status) = query.status {
            q = q.eq("status", status);
        }
        if let Some(room_id) = query.room_id {
            q = q.eq("room_id", room_id);
        }

        let (limit, offset) = page_bounds(query.limit, query.offset);
        let path = q.paginate(limit, offset).path();

        let rows: Vec<Equipment> = self.store.request(Method::GET, &path, None).await?;
        Ok(rows)
    }

    /// Units whose next scheduled maintenance is today or already overdue.
    pub async fn get_equipment_needing_maintenance(
        &self,
    ) -> Result<Vec<Equipment>, EquipmentError> {
        let today = Utc::now().date_naive();
        let path = TableQuery::new("equipment")
            .lte("next_maintenance_date", today)
            .order("next_maintenance_date.asc")
            .path();

        let rows: Vec<Equipment> = self.store.request(Method::GET, &path, None).await?;
        Ok(rows)
    }

    pub async fn get_equipment_by_room(&self, room_id: i64) -> Result<Vec<Equipment>, EquipmentError> {
        let path = TableQuery::new("equipment").eq("room_id", room_id).path();
        let rows: Vec<Equipment> = self.store.request(Method::GET, &path, None).await?;
        Ok(rows)
    }

    pub async fn update_equipment(
        &self,
        equipment_id: i64,
        request: UpdateEquipmentRequest,
    ) -> Result<Equipment, EquipmentError> {
        let mut update = Map::new();

        if let Some(name) = request.name {
            update.insert("name".to_string(), json!(name));
        }
        if let Some(equipment_type) = request.equipment_type {
            update.insert("type".to_string(), json!(equipment_type));
        }
        if let Some(manufacturer) = request.manufacturer {
            update.insert("manufacturer".to_string(), json!(manufacturer));
        }
        if let Some(model) = request.model {
            update.insert("model".to_string(), json!(model));
        }
        if let Some(room_id) = request.room_id {
            update.insert("room_id".to_string(), json!(room_id));
        }
        if let Some(status) = request.status {
            update.insert("status".to_string(), json!(status));
        }
        if let Some(installation_date) = request.installation_date {
            update.insert("installation_date".to_string(), json!(installation_date));
        }
        if let Some(warranty_expiry_date) = request.warranty_expiry_date {
            update.insert("warranty_expiry_date".to_string(), json!(warranty_expiry_date));
        }
        if let Some(last_maintenance_date) = request.last_maintenance_date {
            update.insert("last_maintenance_date".to_string(), json!(last_maintenance_date));
        }
        if let Some(next_maintenance_date) = request.next_maintenance_date {
            update.insert("next_maintenance_date".to_string(), json!(next_maintenance_date));
        }
        update.insert("updated_at".to_string(), json!(Utc::now().to_rfc3339()));

        let path = TableQuery::new("equipment").eq("id", equipment_id).path();
        let mut result: Vec<Equipment> = self
            .store
            .mutate(Method::PATCH, &path, Some(Value::Object(update)))
            .await?;

        if result.is_empty() {
            return Err(EquipmentError::NotFound);
        }
        Ok(result.remove(0))
    }

    pub async fn delete_equipment(&self, equipment_id: i64) -> Result<(), EquipmentError> {
        let path = TableQuery::new("equipment").eq("id", equipment_id).path();
        let deleted: Vec<Value> = self.store.mutate(Method::DELETE, &path, None).await?;

        if deleted.is_empty() {
            return Err(EquipmentError::NotFound);
        }
        Ok(())
    }
}
