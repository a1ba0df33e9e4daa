use chrono::Utc;
use reqwest::Method;
use serde_json::{json, Map, Value};

use shared_database::{AppState, PostgrestClient, TableQuery};
use shared_utils::pagination::page_bounds;

use crate::models::{BillingError, CreateInvoiceRequest, Invoice, InvoiceQuery, UpdateInvoiceRequest};

pub struct InvoiceService {
    store: PostgrestClient,
}

impl InvoiceService {
    pub fn new(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
        }
    }

    pub async fn create_invoice(&self, request: CreateInvoiceRequest) -> Result<Invoice, BillingError> {
        let now = Utc::now().to_rfc3339();
        let row = json!({
            "patient_id": request.patient_id,
            "study_id": request.study_id,
            "insurance_id": request.insurance_id,
            "amount": request.amount,
            "description": request.description,
            "billing_date": request.billing_date,
            "due_date": request.due_date,
            "is_paid": request.is_paid.unwrap_or(false),
            "created_at": now,
            "updated_at": now,
        });

        let mut result: Vec<Invoice> = self
            .store
            .mutate(Method::POST, &TableQuery::new("invoices").path(), Some(row))
            .await?;

        if result.is_empty() {
            return Err(BillingError::Database("Failed to create invoice".to_string()));
        }
        Ok(result.remove(0))
    }

    pub async fn get_invoice(&self, invoice_id: i64) -> Result<Invoice, BillingError> {
        let path = TableQuery::new("invoices").eq("id", invoice_id).path();
        let mut rows: Vec<Invoice> = self.store.request(Method::GET, &path, None).await?;

        if rows.is_empty() {
            return Err(BillingError::InvoiceNotFound);
        }
        Ok(rows.remove(0))
    }

    pub async fn list_invoices(&self, query: InvoiceQuery) -> Result<Vec<Invoice>, BillingError> {
        let mut q = TableQuery::new("invoices");

        if let Some(patient_id) = query.patient_id {
            q = q.eq("patient_id", patient_id);
        }
        if let Some(study_id) = query.study_id {
            q = q.eq("study_id", study_id);
        }
        if let Some(insurance_id) = query.insurance_id {
            q = q.eq("insurance_id", insurance_id);
        }
        if let Some(is_paid) = query.is_paid {
            q = q.eq("is_paid", is_paid);
        }
        if let Some(start_date) = query.start_date {
            q = q.gte("billing_date", start_date);
        }
        if let Some(end_date) = query.end_date {
            q = q.lte("billing_date", end_date);
        }

        let (limit, offset) = page_bounds(query.limit, query.offset);
        let path = q.order("billing_date.desc").paginate(limit, offset).path();

        let rows: Vec<Invoice> = self.store.request(Method::GET, &path, None).await?;
        Ok(rows)
    }

    pub async fn get_invoices_for_patient(&self, patient_id: i64) -> Result<Vec<Invoice>, BillingError> {
        let path = TableQuery::new("invoices")
            .eq("patient_id", patient_id)
            .order("billing_date.desc")
            .path();
        let rows: Vec<Invoice> = self.store.request(Method::GET, &path, None).await?;
        Ok(rows)
    }

    pub async fn get_unpaid_invoices_for_patient(
        &self,
        patient_id: i64,
    ) -> Result<Vec<Invoice>, BillingError> {
        let path = TableQuery::new("invoices")
            .eq("patient_id", patient_id)
            .eq("is_paid", false)
            .order("due_date.asc")
            .path();
        let rows: Vec<Invoice> = self.store.request(Method::GET, &path, None).await?;
        Ok(rows)
    }

    pub async fn update_invoice(
        &self,
        invoice_id: i64,
        request: UpdateInvoiceRequest,
    ) -> Result<Invoice, BillingError> {
        let mut update = Map::new();

        if let Some(study_id) = request.study_id {
            update.insert("study_id".to_string(), json!(study_id));
        }
        if let Some(insurance_id) = request.insurance_id {
            update.insert("insurance_id".to_string(), json!(insurance_id));
        }
        if let Some(amount) = request.amount {
            update.insert("amount".to_string(), json!(amount));
        }
        if let Some(description) = request.description {
            update.insert("description".to_string(), json!(description));
        }
        if let Some(billing_date) = request.billing_date {
            update.insert("billing_date".to_string(), json!(billing_date));
        }
        if let Some(due_date) = request.due_date {
            update.insert("due_date".to_string(), json!(due_date));
        }
        if let Some(is_paid) = request.is_paid {
            update.insert("is_paid".to_string(), json!(is_paid));
        }
        update.insert("updated_at".to_string(), json!(Utc::now().to_rfc3339()));

        let path = TableQuery::new("invoices").eq("id", invoice_id).path();
        let mut result: Vec<Invoice> = self
            .store
            .mutate(Method::PATCH, &path, Some(Value::Object(update)))
            .await?;

        if result.is_empty() {
            return Err(BillingError::InvoiceNotFound);
        }
        Ok(result.remove(0))
    }

    pub async fn delete_invoice(&self, invoice_id: i64) -> Result<(), BillingError> {
        let path = TableQuery::new("invoices").eq("id", invoice_id).path();
        let deleted: Vec<Value> = self.store.mutate(Method::DELETE, &path, None).await?;

        if deleted.is_empty() {
            return Err(BillingError::InvoiceNotFound);
        }
        Ok(())
    }
}
