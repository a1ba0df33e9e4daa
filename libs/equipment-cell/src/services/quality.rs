use chrono::Utc;
use reqwest::Method;
use serde_json::{json, Map, Value};

use shared_database::{AppState, PostgrestClient, TableQuery};
use shared_utils::pagination::page_bounds;

use crate::models::{
    CreateQualityControlRequest, EquipmentError, QualityControl, QualityControlQuery,
    UpdateQualityControlRequest,
};

pub struct QualityControlService {
    store: PostgrestClient,
}

impl QualityControlService {
    pub fn new(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
        }
    }

    pub async fn create_check(
        &self,
        request: CreateQualityControlRequest,
    ) -> Result<QualityControl, EquipmentError> {
        let now = Utc::now().to_rfc3339();
        let row = json!({
            "check_type": request.check_type,
            "study_id": request.study_id,
            "equipment_id": request.equipment_id,
            "report_id": request.report_id,
            "performed_by": request.performed_by,
            "status": request.status.unwrap_or_else(|| "pending".to_string()),
            "priority": request.priority,
            "result": request.result,
            "comments": request.comments,
            "created_at": now,
            "updated_at": now,
        });

        let mut result: Vec<QualityControl> = self
            .store
            .mutate(Method::POST, &TableQuery::new("quality_controls").path(), Some(row))
            .await?;

        if result.is_empty() {
            return Err(EquipmentError::Database(
                "Failed to create quality control record".to_string(),
            ));
        }
        Ok(result.remove(0))
    }

    pub async fn get_check(&self, check_id: i64) -> Result<QualityControl, EquipmentError> {
        let path = TableQuery::new("quality_controls").eq("id", check_id).path();
        let mut rows: Vec<QualityControl> = self.store.request(Method::GET, &path, None).await?;

        if rows.is_empty() {
            return Err(EquipmentError::QualityControlNotFound);
        }
        Ok(rows.remove(0))
    }

    pub async fn list_checks(
        &self,
        query: QualityControlQuery,
    ) -> Result<Vec<QualityControl>, EquipmentError> {
        let mut q = TableQuery::new("quality_controls");

        if let Some(check_type) = query.check_type {
            q = q.eq("check_type", check_type);
        }
        if let Some(status) = query.status {
            q = q.eq("status", status);
        }
        if let Some(priority) = query.priority {
            q = q.eq("priority", priority);
        }

        let (limit, offset) = page_bounds(query.limit, query.offset);
        let path = q.paginate(limit, offset).path();

        let rows: Vec<QualityControl> = self.store.request(Method::GET, &path, None).await?;
        Ok(rows)
    }

    pub async fn get_checks_for_study(&self, study_id: i64) -> Result<Vec<QualityControl>, EquipmentError> {
        let path = TableQuery::new("quality_controls").eq("study_id", study_id).path();
        let rows: Vec<QualityControl> = self.store.request(Method::GET, &path, None).await?;
        Ok(rows)
    }

    pub async fn get_checks_for_equipment(
        &self,
        equipment_id: i64,
    ) -> Result<Vec<QualityControl>, EquipmentError> {
        let path = TableQuery::new("quality_controls").eq("equipment_id", equipment_id).path();
        let rows: Vec<QualityControl> = self.store.request(Method::GET, &path, None).await?;
        Ok(rows)
    }

    pub async fn get_checks_for_report(
        &self,
        report_id: i64,
    ) -> Result<Vec<QualityControl>, EquipmentError> {
        let path = TableQuery::new("quality_controls").eq("report_id", report_id).path();
        let rows: Vec<QualityControl> = self.store.request(Method::GET, &path, None).await?;
        Ok(rows)
    }

    pub async fn get_pending_checks(&self) -> Result<Vec<QualityControl>, EquipmentError> {
        let path = TableQuery::new("quality_controls").eq("status", "pending").path();
        let rows: Vec<QualityControl> = self.store.request(Method::GET, &path, None).await?;
        Ok(rows)
    }

    pub async fn get_needs_review_checks(&self) -> Result<Vec<QualityControl>, EquipmentError> {
        let path = TableQuery::new("quality_controls").eq("status", "needs_review").path();
        let rows: Vec<QualityControl> = self.store.request(Method::GET, &path, None).await?;
        Ok(rows)
    }

    pub async fn update_check(
        &self,
        check_id: i64,
        request: UpdateQualityControlRequest,
    ) -> Result<QualityControl, EquipmentError> {
        let mut update = Map::new();

        if let Some(check_type) = request.check_type {
            update.insert("check_type".to_string(), json!(check_type));
        }
        if let Some(reviewed_by) = request.reviewed_by {
            update.insert("reviewed_by".to_string(), json!(reviewed_by));
        }
        if let Some(status) = request.status {
            update.insert("status".to_string(), json!(status));
        }
        if let Some(priority) = request.priority {
            update.insert("priority".to_string(), json!(priority));
        }
        if let Some(result) = request.result {
            update.insert("result".to_string(), result);
        }
        if let Some(comments) = request.comments {
            update.insert("comments".to_string(), json!(comments));
        }
        update.insert("updated_at".to_string(), json!(Utc::now().to_rfc3339()));

        let path = TableQuery::new("quality_controls").eq("id", check_id).path();
        let mut result: Vec<QualityControl> = self
            .store
            .mutate(Method::PATCH, &path, Some(Value::Object(update)))
            .await?;

        if result.is_empty() {
            return Err(EquipmentError::QualityControlNotFound);
        }
        Ok(result.remove(0))
    }

    pub async fn delete_check(&self, check_id: i64) -> Result<(), EquipmentError> {
        let path = TableQuery::new("quality_controls").eq("id", check_id).path();
        let deleted: Vec<Value> = self.store.mutate(Method::DELETE, &path, None).await?;

        if deleted.is_empty() {
            return Err(EquipmentError::QualityControlNotFound);
        }
        Ok(())
    }
}
