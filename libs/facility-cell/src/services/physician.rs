use chrono::Utc;
use reqwest::Method;
use serde_json::{json, Map, Value};

use shared_database::{AppState, PostgrestClient, TableQuery};
use shared_utils::pagination::page_bounds;

use crate::models::{
    CreatePhysicianRequest, FacilityError, PhysicianQuery, ReferringPhysician,
    UpdatePhysicianRequest,
};

pub struct PhysicianService {
    store: PostgrestClient,
}

impl PhysicianService {
    pub fn new(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
        }
    }

    pub async fn create_physician(
        &self,
        request: CreatePhysicianRequest,
    ) -> Result<ReferringPhysician, FacilityError> {
        // email and license_number are both unique
        let needle_email = urlencoding::encode(&request.email).into_owned();
        let needle_license = urlencoding::encode(&request.license_number).into_owned();
        let existing_path = TableQuery::new("referring_physicians")
            .or(&format!(
                "email.eq.{},license_number.eq.{}",
                needle_email, needle_license
            ))
            .path();
        let existing: Vec<Value> = self.store.request(Method::GET, &existing_path, None).await?;
        if !existing.is_empty() {
            return Err(FacilityError::PhysicianAlreadyExists);
        }

        let now = Utc::now().to_rfc3339();
        let row = json!({
            "first_name": request.first_name,
            "last_name": request.last_name,
            "specialization": request.specialization,
            "contact_number": request.contact_number,
            "email": request.email,
            "address": request.address,
            "hospital_affiliation": request.hospital_affiliation,
            "license_number": request.license_number,
            "is_active": request.is_active.unwrap_or(true),
            "created_at": now,
            "updated_at": now,
        });

        let mut result: Vec<ReferringPhysician> = self
            .store
            .mutate(Method::POST, &TableQuery::new("referring_physicians").path(), Some(row))
            .await?;

        if result.is_empty() {
            return Err(FacilityError::Database(
                "Failed to create referring physician".to_string(),
            ));
        }
        Ok(result.remove(0))
    }

    pub async fn get_physician(&self, physician_id: i64) -> Result<ReferringPhysician, FacilityError> {
        let path = TableQuery::new("referring_physicians").eq("id", physician_id).path();
        let mut rows: Vec<ReferringPhysician> = self.store.request(Method::GET, &path, None).await?;

        if rows.is_empty() {
            return Err(FacilityError::PhysicianNotFound);
        }
        Ok(rows.remove(0))
    }

    pub async fn list_physicians(
        &self,
        query: PhysicianQuery,
    ) -> Result<Vec<ReferringPhysician>, FacilityError> {
        let mut q = TableQuery::new("referring_physicians");

        if let Some(specialization) = query.specialization {
            q = q.eq("specialization", specialization);
        }
        if let Some(is_active) = query.is_active {
            q = q.eq("is_active", is_active);
        }

        let (limit, offset) = page_bounds(query.limit, query.offset);
        let path = q.order("last_name.asc").paginate(limit, offset).path();

        let rows: Vec<ReferringPhysician> = self.store.request(Method::GET, &path, None).await?;
        Ok(rows)
    }

    pub async fn update_physician(
        &self,
        physician_id: i64,
        request: UpdatePhysicianRequest,
    ) -> Result<ReferringPhysician, FacilityError> {
        let mut update = Map::new();

        if let Some(first_name) = request.first_name {
            update.insert("first_name".to_string(), json!(first_name));
        }
        if let Some(last_name) = request.last_name {
            update.insert("last_name".to_string(), json!(last_name));
        }
        if let Some(specialization) = request.specialization {
            update.insert("specialization".to_string(), json!(specialization));
        }
        if let Some(contact_number) = request.contact_number {
            update.insert("contact_number".to_string(), json!(contact_number));
        }
        if let Some(email) = request.email {
            update.insert("email".to_string(), json!(email));
        }
        if let Some(address) = request.address {
            update.insert("address".to_string(), json!(address));
        }
        if let Some(hospital_affiliation) = request.hospital_affiliation {
            update.insert("hospital_affiliation".to_string(), json!(hospital_affiliation));
        }
        if let Some(license_number) = request.license_number {
            update.insert("license_number".to_string(), json!(license_number));
        }
        if let Some(is_active) = request.is_active {
            update.insert("is_active".to_string(), json!(is_active));
        }
        update.insert("updated_at".to_string(), json!(Utc::now().to_rfc3339()));

        let path = TableQuery::new("referring_physicians").eq("id", physician_id).path();
        let mut result: Vec<ReferringPhysician> = self
            .store
            .mutate(Method::PATCH, &path, Some(Value::Object(update)))
            .await?;

        if result.is_empty() {
            return Err(FacilityError::PhysicianNotFound);
        }
        Ok(result.remove(0))
    }

    pub async fn delete_physician(&self, physician_id: i64) -> Result<(), FacilityError> {
        let path = TableQuery::new("referring_physicians").eq("id", physician_id).path();
        let deleted: Vec<Value> = self.store.mutate(Method::DELETE, &path, None).await?;

        if deleted.is_empty() {
            return Err(FacilityError::PhysicianNotFound);
        }
        Ok(())
    }
}
