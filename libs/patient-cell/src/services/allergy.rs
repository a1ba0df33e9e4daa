use chrono::Utc;
use reqwest::Method;
use serde_json::{json, Map, Value};

use shared_database::{AppState, PostgrestClient, TableQuery};
use shared_utils::pagination::page_bounds;

use crate::models::{Allergy, AllergyQuery, CreateAllergyRequest, PatientError, UpdateAllergyRequest};

pub struct AllergyService {
    store: PostgrestClient,
}

impl AllergyService {
    pub fn new(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
        }
    }

    pub async fn create_allergy(
        &self,
        request: CreateAllergyRequest,
    ) -> Result<Allergy, PatientError> {
        let now = Utc::now().to_rfc3339();
        let row = json!({
            "patient_id": request.patient_id,
            "allergen": request.allergen,
            "reaction": request.reaction,
            "severity": request.severity,
            "onset_date": request.onset_date,
            "is_active": request.is_active.unwrap_or(true),
            "notes": request.notes,
            "created_at": now,
            "updated_at": now,
        });

        let mut result: Vec<Allergy> = self
            .store
            .mutate(Method::POST, &TableQuery::new("allergies").path(), Some(row))
            .await?;

        if result.is_empty() {
            return Err(PatientError::Database("Failed to create allergy".to_string()));
        }
        Ok(result.remove(0))
    }

    pub async fn get_allergy(&self, allergy_id: i64) -> Result<Allergy, PatientError> {
        let path = TableQuery::new("allergies").eq("id", allergy_id).path();
        let mut rows: Vec<Allergy> = self.store.request(Method::GET, &path, None).await?;

        if rows.is_empty() {
            return Err(PatientError::AllergyNotFound);
        }
        Ok(rows.remove(0))
    }

    pub async fn list_allergies(&self, query: AllergyQuery) -> Result<Vec<Allergy>, PatientError> {
        let mut q = TableQuery::new("allergies");

        if let Some(patient_id) = query.patient_id {
            q = q.eq("patient_id", patient_id);
        }
        if let Some(severity) = query.severity {
            q = q.eq("severity", severity);
        }
        if let Some(is_active) = query.is_active {
            q = q.eq("is_active", is_active);
        }

        let (limit, offset) = page_bounds(query.limit, query.offset);
        let path = q.paginate(limit, offset).path();

        let rows: Vec<Allergy> = self.store.request(Method::GET, &path, None).await?;
        Ok(rows)
    }

    pub async fn get_allergies_for_patient(
        &self,
        patient_id: i64,
        active_only: bool,
    ) -> Result<Vec<Allergy>, PatientError> {
        let mut q = TableQuery::new("allergies").eq("patient_id", patient_id);
        if active_only {
            q = q.eq("is_active", true);
        }

        let rows: Vec<Allergy> = self.store.request(Method::GET, &q.path(), None).await?;
        Ok(rows)
    }

    pub async fn update_allergy(
        &self,
        allergy_id: i64,
        request: UpdateAllergyRequest,
    ) -> Result<Allergy, PatientError> {
        let mut update = Map::new();

        if let Some(allergen) = request.allergen {
            update.insert("allergen".to_string(), json!(allergen));
        }
        if let Some(reaction) = request.reaction {
            update.insert("reaction".to_string(), json!(reaction));
        }
        if let Some(severity) = request.severity {
            update.insert("severity".to_string(), json!(severity));
        }
        if let Some(onset_date) = request.onset_date {
            update.insert("onset_date".to_string(), json!(onset_date));
        }
        if let Some(is_active) = request.is_active {
            update.insert("is_active".to_string(), json!(is_active));
        }
        if let Some(notes) = request.notes {
            update.insert("notes".to_string(), json!(notes));
        }
        update.insert("updated_at".to_string(), json!(Utc::now().to_rfc3339()));

        let path = TableQuery::new("allergies").eq("id", allergy_id).path();
        let mut result: Vec<Allergy> = self
            .store
            .mutate(Method::PATCH, &path, Some(Value::Object(update)))
            .await?;

        if result.is_empty() {
            return Err(PatientError::AllergyNotFound);
        }
        Ok(result.remove(0))
    }

    pub async fn delete_allergy(&self, allergy_id: i64) -> Result<(), PatientError> {
        let path = TableQuery::new("allergies").eq("id", allergy_id).path();
        let deleted: Vec<Value> = self.store.mutate(Method::DELETE, &path, None).await?;

        if deleted.is_empty() {
            return Err(PatientError::AllergyNotFound);
        }
        Ok(())
    }
}
