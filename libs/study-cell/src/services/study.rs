use chrono::Utc;
use reqwest::Method;
use serde_json::{json, Map, Value};
use tracing::debug;

use shared_database::{AppState, PostgrestClient, TableQuery};
use shared_utils::pagination::page_bounds;

use crate::models::{CreateStudyRequest, Study, StudyError, StudyQuery, StudyStatus, UpdateStudyRequest};

pub struct StudyService {
    store: PostgrestClient,
}

impl StudyService {
    pub fn new(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
        }
    }

    pub async fn create_study(&self, request: CreateStudyRequest) -> Result<Study, StudyError> {
        debug!(
            "Creating {} study for patient {}",
            request.study_type, request.patient_id
        );

        let now = Utc::now().to_rfc3339();
        let row = json!({
            "patient_id": request.patient_id,
            "referring_physician_id": request.referring_physician_id,
            "room_id": request.room_id,
            "equipment_id": request.equipment_id,
            "study_date": request.study_date,
            "study_type": request.study_type,
            "priority": request.priority,
            "status": request.status.unwrap_or(StudyStatus::Scheduled),
            "notes": request.notes,
            "created_at": now,
            "updated_at": now,
        });

        let mut result: Vec<Study> = self
            .store
            .mutate(Method::POST, &TableQuery::new("studies").path(), Some(row))
            .await?;

        if result.is_empty() {
            return Err(StudyError::Database("Failed to create study".to_string()));
        }
        Ok(result.remove(0))
    }

    pub async fn get_study(&self, study_id: i64) -> Result<Study, StudyError> {
        let path = TableQuery::new("studies").eq("id", study_id).path();
        let mut rows: Vec<Study> = self.store.request(Method::GET, &path, None).await?;

        if rows.is_empty() {
            return Err(StudyError::NotFound);
        }
        Ok(rows.remove(0))
    }

    pub async fn list_studies(&self, query: StudyQuery) -> Result<Vec<Study>, StudyError> {
        let mut q = TableQuery::new("studies");

        if let Some(patient_id) = query.patient_id {
            q = q.eq("patient_id", patient_id);
        }
        if let Some(physician_id) = query.physician_id {
            q = q.eq("referring_physician_id", physician_id);
        }
        if let Some(status) = query.status {
            q = q.eq("status", status.as_str());
        }
        if let Some(study_type) = query.study_type {
            q = q.eq("study_type", study_type);
        }
        if let Some(priority) = query.priority {
            q = q.eq("priority", priority);
        }
        if let Some(start_date) = query.start_date {
            q = q.gte("study_date", start_date);
        }
        if let Some(end_date) = query.end_date {
            q = q.lte("study_date", end_date);
        }

        let (limit, offset) = page_bounds(query.limit, query.offset);
        let path = q.order("study_date.desc").paginate(limit, offset).path();

        let rows: Vec<Study> = self.store.request(Method::GET, &path, None).await?;
        Ok(rows)
    }

    pub async fn get_studies_for_patient(&self, patient_id: i64) -> Result<Vec<Study>, StudyError> {
        let path = TableQuery::new("studies")
            .eq("patient_id", patient_id)
            .order("study_date.desc")
            .path();
        let rows: Vec<Study> = self.store.request(Method::GET, &path, None).await?;
        Ok(rows)
    }

    pub async fn update_study(
        &self,
        study_id: i64,
        request: UpdateStudyRequest,
    ) -> Result<Study, StudyError> {
        let mut update = Map::new();

        if let Some(referring_physician_id) = request.referring_physician_id {
            update.insert("referring_physician_id".to_string(), json!(referring_physician_id));
        }
        if let Some(room_id) = request.room_id {
            update.insert("room_id".to_string(), json!(room_id));
        }
        if let Some(equipment_id) = request.equipment_id {
            update.insert("equipment_id".to_string(), json!(equipment_id));
        }
        if let Some(study_date) = request.study_date {
            update.insert("study_date".to_string(), json!(study_date));
        }
        if let Some(study_type) = request.study_type {
            update.insert("study_type".to_string(), json!(study_type));
        }
        if let Some(priority) = request.priority {
            update.insert("priority".to_string(), json!(priority));
        }
        if let Some(status) = request.status {
            update.insert("status".to_string(), json!(status));
        }
        if let Some(notes) = request.notes {
            update.insert("notes".to_string(), json!(notes));
        }
        if let Some(report) = request.report {
            update.insert("report".to_string(), json!(report));
        }
        update.insert("updated_at".to_string(), json!(Utc::now().to_rfc3339()));

        let path = TableQuery::new("studies").eq("id", study_id).path();
        let mut result: Vec<Study> = self
            .store
            .mutate(Method::PATCH, &path, Some(Value::Object(update)))
            .await?;

        if result.is_empty() {
            return Err(StudyError::NotFound);
        }
        Ok(result.remove(0))
    }

    pub async fn delete_study(&self, study_id: i64) -> Result<(), StudyError> {
        let path = TableQuery::new("studies").eq("id", study_id).path();
        let deleted: Vec<Value> = self.store.mutate(Method::DELETE, &path, None).await?;

        if deleted.is_empty() {
            return Err(StudyError::NotFound);
        }
        Ok(())
    }
}
