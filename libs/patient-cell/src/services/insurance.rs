use chrono::Utc;
use reqwest::Method;
use serde_json::{json, Map, Value};

use shared_database::{AppState, PostgrestClient, TableQuery};
use shared_utils::pagination::page_bounds;

use crate::models::{
    CreateInsurancePolicyRequest, InsurancePolicy, InsuranceQuery, PatientError,
    UpdateInsurancePolicyRequest,
};

pub struct InsuranceService {
    store: PostgrestClient,
}

impl InsuranceService {
    pub fn new(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
        }
    }

    pub async fn create_policy(
        &self,
        request: CreateInsurancePolicyRequest,
    ) -> Result<InsurancePolicy, PatientError> {
        let now = Utc::now().to_rfc3339();
        let row = json!({
            "patient_id": request.patient_id,
            "provider_name": request.provider_name,
            "policy_number": request.policy_number,
            "coverage_details": request.coverage_details,
            "start_date": request.start_date,
            "end_date": request.end_date,
            "is_primary": request.is_primary.unwrap_or(false),
            "status": request.status.unwrap_or_else(|| "active".to_string()),
            "created_at": now,
            "updated_at": now,
        });

        let mut result: Vec<InsurancePolicy> = self
            .store
            .mutate(
                Method::POST,
                &TableQuery::new("insurance_policies").path(),
                Some(row),
            )
            .await?;

        if result.is_empty() {
            return Err(PatientError::Database(
                "Failed to create insurance policy".to_string(),
            ));
        }
        Ok(result.remove(0))
    }

    pub async fn get_policy(&self, policy_id: i64) -> Result<InsurancePolicy, PatientError> {
        let path = TableQuery::new("insurance_policies").eq("id", policy_id).path();
        let mut rows: Vec<InsurancePolicy> = self.store.request(Method::GET, &path, None).await?;

        if rows.is_empty() {
            return Err(PatientError::InsuranceNotFound);
        }
        Ok(rows.remove(0))
    }

    pub async fn list_policies(
        &self,
        query: InsuranceQuery,
    ) -> Result<Vec<InsurancePolicy>, PatientError> {
        let mut q = TableQuery::new("insurance_policies");

        if let Some(patient_id) = query.patient_id {
            q = q.eq("patient_id", patient_id);
        }
        if let Some(status) = query.status {
            q = q.eq("status", status);
        }

        let (limit, offset) = page_bounds(query.limit, query.offset);
        let path = q.paginate(limit, offset).path();

        let rows: Vec<InsurancePolicy> = self.store.request(Method::GET, &path, None).await?;
        Ok(rows)
    }

    pub async fn get_policies_for_patient(
        &self,
        patient_id: i64,
    ) -> Result<Vec<InsurancePolicy>, PatientError> {
        let path = TableQuery::new("insurance_policies")
            .eq("patient_id", patient_id)
            .order("is_primary.desc")
            .path();
        let rows: Vec<InsurancePolicy> = self.store.request(Method::GET, &path, None).await?;
        Ok(rows)
    }

    pub async fn update_policy(
        &self,
        policy_id: i64,
        request: UpdateInsurancePolicyRequest,
    ) -> Result<InsurancePolicy, PatientError> {
        let mut update = Map::new();

        if let Some(provider_name) = request.provider_name {
            update.insert("provider_name".to_string(), json!(provider_name));
        }
        if let Some(policy_number) = request.policy_number {
            update.insert("policy_number".to_string(), json!(policy_number));
        }
        if let Some(coverage_details) = request.coverage_details {
            update.insert("coverage_details".to_string(), json!(coverage_details));
        }
        if let Some(start_date) = request.start_date {
            update.insert("start_date".to_string(), json!(start_date));
        }
        if let Some(end_date) = request.end_date {
            update.insert("end_date".to_string(), json!(end_date));
        }
        if let Some(is_primary) = request.is_primary {
            update.insert("is_primary".to_string(), json!(is_primary));
        }
        if let Some(status) = request.status {
            update.insert("status".to_string(), json!(status));
        }
        update.insert("updated_at".to_string(), json!(Utc::now().to_rfc3339()));

        let path = TableQuery::new("insurance_policies").eq("id", policy_id).path();
        let mut result: Vec<InsurancePolicy> = self
            .store
            .mutate(Method::PATCH, &path, Some(Value::Object(update)))
            .await?;

        if result.is_empty() {
            return Err(PatientError::InsuranceNotFound);
        }
        Ok(result.remove(0))
    }

    pub async fn delete_policy(&self, policy_id: i64) -> Result<(), PatientError> {
        let path = TableQuery::new("insurance_policies").eq("id", policy_id).path();
        let deleted: Vec<Value> = self.store.mutate(Method::DELETE, &path, None).await?;

        if deleted.is_empty() {
            return Err(PatientError::InsuranceNotFound);
        }
        Ok(())
    }
}
