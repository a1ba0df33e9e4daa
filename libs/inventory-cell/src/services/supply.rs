use chrono::{Duration, Utc};
use reqwest::Method;
use serde_json::{json, Map, Value};
use tracing::debug;

use shared_database::{AppState, PostgrestClient, TableQuery};
use shared_utils::pagination::page_bounds;

use crate::models::{
    CreateSupplyRequest, InventoryError, Supply, SupplyQuery, UpdateSupplyRequest,
};
use crate::services::ledger::derive_status;

pub struct SupplyService {
    store: PostgrestClient,
}

impl SupplyService {
    pub fn new(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
        }
    }

    pub async fn create_supply(&self, request: CreateSupplyRequest) -> Result<Supply, InventoryError> {
        debug!("Creating supply: {}", request.name);

        // Status is derived, never taken from the request.
        let status = derive_status(request.current_quantity, request.minimum_quantity);

        let now = Utc::now().to_rfc3339();
        let row = json!({
            "name": request.name,
            "category": request.category,
            "department_id": request.department_id,
            "current_quantity": request.current_quantity,
            "minimum_quantity": request.minimum_quantity,
            "maximum_quantity": request.maximum_quantity,
            "unit": request.unit,
            "unit_cost": request.unit_cost,
            "expiration_date": request.expiration_date,
            "status": status.as_str(),
            "location": request.location,
            "created_at": now,
            "updated_at": now,
        });

        let mut result: Vec<Supply> = self
            .store
            .mutate(Method::POST, &TableQuery::new("supplies").path(), Some(row))
            .await?;

        if result.is_empty() {
            return Err(InventoryError::Database("Failed to create supply".to_string()));
        }
        Ok(result.remove(0))
    }

    pub async fn get_supply(&self, supply_id: i64) -> Result<Supply, InventoryError> {
        let path = TableQuery::new("supplies").eq("id", supply_id).path();
        let mut rows: Vec<Supply> = self.store.request(Method::GET, &path, None).await?;

        if rows.is_empty() {
            return Err(InventoryError::SupplyNotFound);
        }
        Ok(rows.remove(0))
    }

    pub async fn list_supplies(&self, query: SupplyQuery) -> Result<Vec<Supply>, InventoryError> {
        let mut q = TableQuery::new("supplies");

        if let Some(category) = query.category {
            q = q.eq("category", category);
        }
        if let Some(status) = query.status {
            q = q.eq("status", status.as_str());
        }
        if let Some(department_id) = query.department_id {
            q = q.eq("department_id", department_id);
        }
        if let Some(search) = query.search {
            q = q.contains("name", &search);
        }
        if query.low_stock.unwrap_or(false) {
            // The persisted status already encodes quantity <= minimum.
            q = q.or("status.eq.low_stock,status.eq.out_of_stock");
        }
        if query.expiring_soon.unwrap_or(false) {
            let cutoff = Utc::now().date_naive() + Duration::days(30);
            q = q.lte("expiration_date", cutoff);
        }

        let (limit, offset) = page_bounds(query.limit, query.offset);
        let path = q.paginate(limit, offset).path();

        let rows: Vec<Supply> = self.store.request(Method::GET, &path, None).await?;
        Ok(rows)
    }

    pub async fn update_supply(
        &self,
        supply_id: i64,
        request: UpdateSupplyRequest,
    ) -> Result<Supply, InventoryError> {
        // Threshold changes re-derive the status, so fetch the current
        // quantities first to fill in whatever the request leaves out.
        let current = self.get_supply(supply_id).await?;

        let quantity = request.current_quantity.unwrap_or(current.current_quantity);
        let minimum = request.minimum_quantity.unwrap_or(current.minimum_quantity);
        let status = derive_status(quantity, minimum);

        let mut update = Map::new();
        if let Some(name) = request.name {
            update.insert("name".to_string(), json!(name));
        }
        if let Some(category) = request.category {
            update.insert("category".to_string(), json!(category));
        }
        if let Some(department_id) = request.department_id {
            update.insert("department_id".to_string(), json!(department_id));
        }
        if let Some(current_quantity) = request.current_quantity {
            update.insert("current_quantity".to_string(), json!(current_quantity));
        }
        if let Some(minimum_quantity) = request.minimum_quantity {
            update.insert("minimum_quantity".to_string(), json!(minimum_quantity));
        }
        if let Some(maximum_quantity) = request.maximum_quantity {
            update.insert("maximum_quantity".to_string(), json!(maximum_quantity));
        }
        if let Some(unit) = request.unit {
            update.insert("unit".to_string(), json!(unit));
        }
        if let Some(unit_cost) = request.unit_cost {
            update.insert("unit_cost".to_string(), json!(unit_cost));
        }
        if let Some(expiration_date) = request.expiration_date {
            update.insert("expiration_date".to_string(), json!(expiration_date));
        }
        if let Some(location) = request.location {
            update.insert("location".to_string(), json!(location));
        }
        update.insert("status".to_string(), json!(status.as_str()));
        update.insert("updated_at".to_string(), json!(Utc::now().to_rfc3339()));

        let path = TableQuery::new("supplies").eq("id", supply_id).path();
        let mut result: Vec<Supply> = self
            .store
            .mutate(Method::PATCH, &path, Some(Value::Object(update)))
            .await?;

        if result.is_empty() {
            return Err(InventoryError::SupplyNotFound);
        }
        Ok(result.remove(0))
    }

    pub async fn delete_supply(&self, supply_id: i64) -> Result<(), InventoryError> {
        let path = TableQuery::new("supplies").eq("id", supply_id).path();
        let deleted: Vec<Value> = self.store.mutate(Method::DELETE, &path, None).await?;

        if deleted.is_empty() {
            return Err(InventoryError::SupplyNotFound);
        }
        Ok(())
    }

    pub async fn get_low_stock_supplies(&self) -> Result<Vec<Supply>, InventoryError> {
        let path = TableQuery::new("supplies")
            .or("status.eq.low_stock,status.eq.out_of_stock")
            .path();
        let rows: Vec<Supply> = self.store.request(Method::GET, &path, None).await?;
        Ok(rows)
    }

    pub async fn get_expiring_supplies(&self) -> Result<Vec<Supply>, InventoryError> {
        let cutoff = Utc::now().date_naive() + Duration::days(30);
        let path = TableQuery::new("supplies").lte("expiration_date", cutoff).path();
        let rows: Vec<Supply> = self.store.request(Method::GET, &path, None).await?;
        Ok(rows)
    }

    pub async fn get_department_supplies(
        &self,
        department_id: i64,
    ) -> Result<Vec<Supply>, InventoryError> {
        let path = TableQuery::new("supplies").eq("department_id", department_id).path();
        let rows: Vec<Supply> = self.store.request(Method::GET, &path, None).await?;
        Ok(rows)
    }
}
