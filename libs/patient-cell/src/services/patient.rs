use chrono::Utc;
use regex::Regex;
use reqwest::Method;
use serde_json::{json, Map, Value};
use tracing::debug;

use shared_database::{AppState, PostgrestClient, TableQuery};
use shared_utils::pagination::page_bounds;

use crate::models::{
    CreatePatientRequest, Patient, PatientError, PatientSearchQuery, UpdatePatientRequest,
};

const EMAIL_PATTERN: &str = r"^[^@\s]+@[^@\s]+\.[^@\s]+$";

pub struct PatientService {
    store: PostgrestClient,
}

impl PatientService {
    pub fn new(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
        }
    }

    fn validate_email(email: &str) -> Result<(), PatientError> {
        let pattern = Regex::new(EMAIL_PATTERN)
            .map_err(|e| PatientError::Database(format!("Invalid email pattern: {}", e)))?;
        if !pattern.is_match(email) {
            return Err(PatientError::Validation(format!(
                "Invalid email address: {}",
                email
            )));
        }
        Ok(())
    }

    pub async fn create_patient(
        &self,
        request: CreatePatientRequest,
    ) -> Result<Patient, PatientError> {
        debug!("Creating patient record: {}", request.medical_record_number);

        if let Some(email) = &request.email {
            Self::validate_email(email)?;
        }

        let existing_path = TableQuery::new("patients")
            .eq("medical_record_number", &request.medical_record_number)
            .path();
        let existing: Vec<Value> = self.store.request(Method::GET, &existing_path, None).await?;
        if !existing.is_empty() {
            return Err(PatientError::MrnAlreadyExists {
                mrn: request.medical_record_number,
            });
        }

        let now = Utc::now().to_rfc3339();
        let row = json!({
            "first_name": request.first_name,
            "last_name": request.last_name,
            "date_of_birth": request.date_of_birth,
            "gender": request.gender,
            "phone_number": request.phone_number,
            "email": request.email,
            "address": request.address,
            "medical_record_number": request.medical_record_number,
            "created_at": now,
            "updated_at": now,
        });

        let mut result: Vec<Patient> = self
            .store
            .mutate(Method::POST, &TableQuery::new("patients").path(), Some(row))
            .await?;

        if result.is_empty() {
            return Err(PatientError::Database("Failed to create patient".to_string()));
        }
        Ok(result.remove(0))
    }

    pub async fn get_patient(&self, patient_id: i64) -> Result<Patient, PatientError> {
        let path = TableQuery::new("patients").eq("id", patient_id).path();
        let mut rows: Vec<Patient> = self.store.request(Method::GET, &path, None).await?;

        if rows.is_empty() {
            return Err(PatientError::NotFound);
        }
        Ok(rows.remove(0))
    }

    pub async fn get_patient_by_mrn(&self, mrn: &str) -> Result<Patient, PatientError> {
        let path = TableQuery::new("patients")
            .eq("medical_record_number", mrn)
            .path();
        let mut rows: Vec<Patient> = self.store.request(Method::GET, &path, None).await?;

        if rows.is_empty() {
            return Err(PatientError::NotFound);
        }
        Ok(rows.remove(0))
    }

    pub async fn search_patients(
        &self,
        query: PatientSearchQuery,
    ) -> Result<Vec<Patient>, PatientError> {
        let mut q = TableQuery::new("patients");

        if let Some(name) = query.name {
            let needle = urlencoding::encode(&format!("%{}%", name)).into_owned();
            q = q.or(&format!(
                "first_name.ilike.{},last_name.ilike.{}",
                needle, needle
            ));
        }
        if let Some(email) = query.email {
            q = q.contains("email", &email);
        }
        if let Some(phone) = query.phone {
            q = q.contains("phone_number", &phone);
        }
        if let Some(mrn) = query.mrn {
            q = q.eq("medical_record_number", mrn);
        }

        let (limit, offset) = page_bounds(query.limit, query.offset);
        let path = q.order("last_name.asc,first_name.asc").paginate(limit, offset).path();

        let rows: Vec<Patient> = self.store.request(Method::GET, &path, None).await?;
        Ok(rows)
    }

    pub async fn update_patient(
        &self,
        patient_id: i64,
        request: UpdatePatientRequest,
    ) -> Result<Patient, PatientError> {
        if let Some(email) = &request.email {
            Self::validate_email(email)?;
        }

        let mut update = Map::new();

        if let Some(first_name) = request.first_name {
            update.insert("first_name".to_string(), json!(first_name));
        }
        if let Some(last_name) = request.last_name {
            update.insert("last_name".to_string(), json!(last_name));
        }
        if let Some(date_of_birth) = request.date_of_birth {
            update.insert("date_of_birth".to_string(), json!(date_of_birth));
        }
        if let Some(gender) = request.gender {
            update.insert("gender".to_string(), json!(gender));
        }
        if let Some(phone_number) = request.phone_number {
            update.insert("phone_number".to_string(), json!(phone_number));
        }
        if let Some(email) = request.email {
            update.insert("email".to_string(), json!(email));
        }
        if let Some(address) = request.address {
            update.insert("address".to_string(), json!(address));
        }
        update.insert("updated_at".to_string(), json!(Utc::now().to_rfc3339()));

        let path = TableQuery::new("patients").eq("id", patient_id).path();
        let mut result: Vec<Patient> = self
            .store
            .mutate(Method::PATCH, &path, Some(Value::Object(update)))
            .await?;

        if result.is_empty() {
            return Err(PatientError::NotFound);
        }
        Ok(result.remove(0))
    }

    pub async fn delete_patient(&self, patient_id: i64) -> Result<(), PatientError> {
        let path = TableQuery::new("patients").eq("id", patient_id).path();
        let deleted: Vec<Value> = self.store.mutate(Method::DELETE, &path, None).await?;

        if deleted.is_empty() {
            return Err(PatientError::NotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_email() {
        assert!(PatientService::validate_email("jane.doe@example.org").is_ok());
    }

    #[test]
    fn rejects_email_without_domain() {
        assert!(PatientService::validate_email("jane.doe@").is_err());
        assert!(PatientService::validate_email("not-an-email").is_err());
    }
}
