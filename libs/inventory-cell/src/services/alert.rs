use chrono::Utc;
use reqwest::Method;
use serde_json::json;

use shared_database::{AppState, PostgrestClient, TableQuery};
use shared_utils::pagination::page_bounds;

use crate::models::{AlertQuery, CreateAlertRequest, InventoryAlert, InventoryError};

pub struct AlertService {
    store: PostgrestClient,
}

impl AlertService {
    pub fn new(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
        }
    }

    pub async fn create_alert(
        &self,
        request: CreateAlertRequest,
    ) -> Result<InventoryAlert, InventoryError> {
        let now = Utc::now().to_rfc3339();
        let row = json!({
            "supply_id": request.supply_id,
            "alert_type": request.alert_type.as_str(),
            "message": request.message,
            "is_active": true,
            "created_at": now,
            "updated_at": now,
        });

        let mut result: Vec<InventoryAlert> = self
            .store
            .mutate(
                Method::POST,
                &TableQuery::new("inventory_alerts").path(),
                Some(row),
            )
            .await?;

        if result.is_empty() {
            return Err(InventoryError::Database("Failed to create alert".to_string()));
        }
        Ok(result.remove(0))
    }

    pub async fn list_alerts(&self, query: AlertQuery) -> Result<Vec<InventoryAlert>, InventoryError> {
        let mut q = TableQuery::new("inventory_alerts");

        if let Some(supply_id) = query.supply_id {
            q = q.eq("supply_id", supply_id);
        }
        if let Some(alert_type) = query.alert_type {
            q = q.eq("alert_type", alert_type.as_str());
        }
        if let Some(is_active) = query.is_active {
            q = q.eq("is_active", is_active);
        }

        let (limit, offset) = page_bounds(query.limit, query.offset);
        let path = q.paginate(limit, offset).path();

        let rows: Vec<InventoryAlert> = self.store.request(Method::GET, &path, None).await?;
        Ok(rows)
    }

    /// Marks the alert inactive and stamps who acknowledged it and when.
    pub async fn acknowledge_alert(
        &self,
        alert_id: i64,
        user_id: i64,
    ) -> Result<InventoryAlert, InventoryError> {
        let path = TableQuery::new("inventory_alerts").eq("id", alert_id).path();
        let now = Utc::now().to_rfc3339();

        let mut result: Vec<InventoryAlert> = self
            .store
            .mutate(
                Method::PATCH,
                &path,
                Some(json!({
                    "is_active": false,
                    "acknowledged_at": now,
                    "acknowledged_by": user_id,
                    "updated_at": now,
                })),
            )
            .await?;

        if result.is_empty() {
            return Err(InventoryError::AlertNotFound);
        }
        Ok(result.remove(0))
    }
}
