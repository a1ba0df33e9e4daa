use chrono::Utc;
use reqwest::Method;
use serde_json::{json, Map, Value};

use shared_database::{AppState, PostgrestClient, TableQuery};
use shared_utils::pagination::page_bounds;

use crate::models::{
    CreateMedicalHistoryRequest, MedicalHistory, MedicalHistoryQuery, PatientError,
    UpdateMedicalHistoryRequest,
};

pub struct MedicalHistoryService {
    store: PostgrestClient,
}

impl MedicalHistoryService {
    pub fn new(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
        }
    }

    pub async fn create_history(
        &self,
        request: CreateMedicalHistoryRequest,
    ) -> Result<MedicalHistory, PatientError> {
        let now = Utc::now().to_rfc3339();
        let row = json!({
            "patient_id": request.patient_id,
            "condition": request.condition,
            "icd_code": request.icd_code,
            "diagnosis_date": request.diagnosis_date,
            "status": request.status.unwrap_or_else(|| "active".to_string()),
            "notes": request.notes,
            "created_at": now,
            "updated_at": now,
        });

        let mut result: Vec<MedicalHistory> = self
            .store
            .mutate(
                Method::POST,
                &TableQuery::new("medical_history").path(),
                Some(row),
            )
            .await?;

        if result.is_empty() {
            return Err(PatientError::Database(
                "Failed to create medical history record".to_string(),
            ));
        }
        Ok(result.remove(0))
    }

    pub async fn get_history(&self, history_id: i64) -> Result<MedicalHistory, PatientError> {
        let path = TableQuery::new("medical_history").eq("id", history_id).path();
        let mut rows: Vec<MedicalHistory> = self.store.request(Method::GET, &path, None).await?;

        if rows.is_empty() {
            return Err(PatientError::HistoryNotFound);
        }
        Ok(rows.remove(0))
    }

    pub async fn list_history(
        &self,
        query: MedicalHistoryQuery,
    ) -> Result<Vec<MedicalHistory>, PatientError> {
        let mut q = TableQuery::new("medical_history");

        if let Some(patient_id) = query.patient_id {
            q = q.eq("patient_id", patient_id);
        }
        if let Some(status) = query.status {
            q = q.eq("status", status);
        }

        let (limit, offset) = page_bounds(query.limit, query.offset);
        let path = q.order("diagnosis_date.desc").paginate(limit, offset).path();

        let rows: Vec<MedicalHistory> = self.store.request(Method::GET, &path, None).await?;
        Ok(rows)
    }

    pub async fn get_history_for_patient(
        &self,
        patient_id: i64,
    ) -> Result<Vec<MedicalHistory>, PatientError> {
        let path = TableQuery::new("medical_history")
            .eq("patient_id", patient_id)
            .order("diagnosis_date.desc")
            .path();
        let rows: Vec<MedicalHistory> = self.store.request(Method::GET, &path, None).await?;
        Ok(rows)
    }

    pub async fn update_history(
        &self,
        history_id: i64,
        request: UpdateMedicalHistoryRequest,
    ) -> Result<MedicalHistory, PatientError> {
        let mut update = Map::new();

        if let Some(condition) = request.condition {
            update.insert("condition".to_string(), json!(condition));
        }
        if let Some(icd_code) = request.icd_code {
            update.insert("icd_code".to_string(), json!(icd_code));
        }
        if let Some(diagnosis_date) = request.diagnosis_date {
            update.insert("diagnosis_date".to_string(), json!(diagnosis_date));
        }
        if let Some(status) = request.status {
            update.insert("status".to_string(), json!(status));
        }
        if let Some(notes) = request.notes {
            update.insert("notes".to_string(), json!(notes));
        }
        update.insert("updated_at".to_string(), json!(Utc::now().to_rfc3339()));

        let path = TableQuery::new("medical_history").eq("id", history_id).path();
        let mut result: Vec<MedicalHistory> = self
            .store
            .mutate(Method::PATCH, &path, Some(Value::Object(update)))
            .await?;

        if result.is_empty() {
            return Err(PatientError::HistoryNotFound);
        }
        Ok(result.remove(0))
    }

    pub async fn delete_history(&self, history_id: i64) -> Result<(), PatientError> {
        let path = TableQuery::new("medical_history").eq("id", history_id).path();
        let deleted: Vec<Value> = self.store.mutate(Method::DELETE, &path, None).await?;

        if deleted.is_empty() {
            return Err(PatientError::HistoryNotFound);
        }
        Ok(())
    }
}
