use chrono::{Duration, Utc};
use reqwest::Method;
use serde_json::{json, Map, Value};

use shared_database::{AppState, PostgrestClient, TableQuery};
use shared_utils::pagination::page_bounds;

use crate::models::{
    CreateMaintenanceRequest, EquipmentError, MaintenanceQuery, MaintenanceRecord,
    UpdateMaintenanceRequest,
};

pub struct MaintenanceService {
    store: PostgrestClient,
}

impl MaintenanceService {
    pub fn new(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
        }
    }

    pub async fn create_record(
        &self,
        request: CreateMaintenanceRequest,
    ) -> Result<MaintenanceRecord, EquipmentError> {
        let now = Utc::now().to_rfc3339();
        let row = json!({
            "equipment_id": request.equipment_id,
            "description": request.description,
            "performed_by": request.performed_by,
            "cost": request.cost,
            "maintenance_date": request.maintenance_date,
            "last_maintenance_date": request.last_maintenance_date,
            "next_maintenance_date": request.next_maintenance_date,
            "status": request.status.unwrap_or_else(|| "scheduled".to_string()),
            "maintenance_type": request.maintenance_type,
            "parts_replaced": request.parts_replaced,
            "technician_notes": request.technician_notes,
            "created_at": now,
            "updated_at": now,
        });

        let mut result: Vec<MaintenanceRecord> = self
            .store
            .mutate(Method::POST, &TableQuery::new("maintenance_records").path(), Some(row))
            .await?;

        if result.is_empty() {
            return Err(EquipmentError::Database(
                "Failed to create maintenance record".to_string(),
            ));
        }
        Ok(result.remove(0))
    }

    pub async fn get_record(&self, record_id: i64) -> Result<MaintenanceRecord, EquipmentError> {
        let path = TableQuery::new("maintenance_records").eq("id", record_id).path();
        let mut rows: Vec<MaintenanceRecord> = self.store.request(Method::GET, &path, None).await?;

        if rows.is_empty() {
            return Err(EquipmentError::MaintenanceNotFound);
        }
        Ok(rows.remove(0))
    }

    pub async fn list_records(
        &self,
        query: MaintenanceQuery,
    ) -> Result<Vec<MaintenanceRecord>, EquipmentError> {
        let mut q = TableQuery::new("maintenance_records");

        if let Some(equipment_id) = query.equipment_id {
            q = q.eq("equipment_id", equipment_id);
        }
        if let Some(status) = query.status {
            q = q.eq("status", status);
        }
        if let Some(maintenance_type) = query.maintenance_type {
            q = q.eq("maintenance_type", maintenance_type.as_str());
        }
        if let Some(start_date) = query.start_date {
            q = q.gte("maintenance_date", start_date);
        }
        if let Some(end_date) = query.end_date {
            q = q.lte("maintenance_date", end_date);
        }

        let (limit, offset) = page_bounds(query.limit, query.offset);
        let path = q.order("maintenance_date.desc").paginate(limit, offset).path();

        let rows: Vec<MaintenanceRecord> = self.store.request(Method::GET, &path, None).await?;
        Ok(rows)
    }

    /// Open records due within the window (today .. today + days_ahead).
    pub async fn get_upcoming_maintenance(
        &self,
        days_ahead: i64,
    ) -> Result<Vec<MaintenanceRecord>, EquipmentError> {
        let today = Utc::now().date_naive();
        let horizon = today + Duration::days(days_ahead);

        let path = TableQuery::new("maintenance_records")
            .gte("next_maintenance_date", today)
            .lte("next_maintenance_date", horizon)
            .neq("status", "completed")
            .order("next_maintenance_date.asc")
            .path();

        let rows: Vec<MaintenanceRecord> = self.store.request(Method::GET, &path, None).await?;
        Ok(rows)
    }

    pub async fn update_record(
        &self,
        record_id: i64,
        request: UpdateMaintenanceRequest,
    ) -> Result<MaintenanceRecord, EquipmentError> {
        let mut update = Map::new();

        if let Some(description) = request.description {
            update.insert("description".to_string(), json!(description));
        }
        if let Some(performed_by) = request.performed_by {
            update.insert("performed_by".to_string(), json!(performed_by));
        }
        if let Some(cost) = request.cost {
            update.insert("cost".to_string(), json!(cost));
        }
        if let Some(maintenance_date) = request.maintenance_date {
            update.insert("maintenance_date".to_string(), json!(maintenance_date));
        }
        if let Some(last_maintenance_date) = request.last_maintenance_date {
            update.insert("last_maintenance_date".to_string(), json!(last_maintenance_date));
        }
        if let Some(next_maintenance_date) = request.next_maintenance_date {
            update.insert("next_maintenance_date".to_string(), json!(next_maintenance_date));
        }
        if let Some(status) = request.status {
            update.insert("status".to_string(), json!(status));
        }
        if let Some(maintenance_type) = request.maintenance_type {
            update.insert("maintenance_type".to_string(), json!(maintenance_type));
        }
        if let Some(parts_replaced) = request.parts_replaced {
            update.insert("parts_replaced".to_string(), json!(parts_replaced));
        }
        if let Some(technician_notes) = request.technician_notes {
            update.insert("technician_notes".to_string(), json!(technician_notes));
        }
        update.insert("updated_at".to_string(), json!(Utc::now().to_rfc3339()));

        let path = TableQuery::new("maintenance_records").eq("id", record_id).path();
        let mut result: Vec<MaintenanceRecord> = self
            .store
            .mutate(Method::PATCH, &path, Some(Value::Object(update)))
            .await?;

        if result.is_empty() {
            return Err(EquipmentError::MaintenanceNotFound);
        }
        Ok(result.remove(0))
    }

    pub async fn delete_record(&self, record_id: i64) -> Result<(), EquipmentError> {
        let path = TableQuery::new("maintenance_records").eq("id", record_id).path();
        let deleted: Vec<Value> = self.store.mutate(Method::DELETE, &path, None).await?;

        if deleted.is_empty() {
            return Err(EquipmentError::MaintenanceNotFound);
        }
        Ok(())
    }
}
