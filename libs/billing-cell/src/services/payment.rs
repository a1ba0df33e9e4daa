use chrono::Utc;
use reqwest::Method;
use serde_json::{json, Map, Value};

use shared_database::{AppState, PostgrestClient, TableQuery};
use shared_utils::pagination::page_bounds;

use crate::models::{BillingError, CreatePaymentRequest, Payment, PaymentQuery, UpdatePaymentRequest};

pub struct PaymentService {
    store: PostgrestClient,
}

impl PaymentService {
    pub fn new(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
        }
    }

    pub async fn create_payment(&self, request: CreatePaymentRequest) -> Result<Payment, BillingError> {
        let now = Utc::now().to_rfc3339();
        let row = json!({
            "invoice_id": request.invoice_id,
            "patient_id": request.patient_id,
            "amount": request.amount,
            "payment_method": request.payment_method,
            "status": request.status.unwrap_or_else(|| "completed".to_string()),
            "payment_date": request.payment_date,
            "reference": request.reference,
            "created_at": now,
            "updated_at": now,
        });

        let mut result: Vec<Payment> = self
            .store
            .mutate(Method::POST, &TableQuery::new("payments").path(), Some(row))
            .await?;

        if result.is_empty() {
            return Err(BillingError::Database("Failed to create payment".to_string()));
        }
        Ok(result.remove(0))
    }

    pub async fn get_payment(&self, payment_id: i64) -> Result<Payment, BillingError> {
        let path = TableQuery::new("payments").eq("id", payment_id).path();
        let mut rows: Vec<Payment> = self.store.request(Method::GET, &path, None).await?;

        if rows.is_empty() {
            return Err(BillingError::PaymentNotFound);
        }
        Ok(rows.remove(0))
    }

    pub async fn list_payments(&self, query: PaymentQuery) -> Result<Vec<Payment>, BillingError> {
        let mut q = TableQuery::new("payments");

        if let Some(invoice_id) = query.invoice_id {
            q = q.eq("invoice_id", invoice_id);
        }
        if let Some(payment_method) = query.payment_method {
            q = q.eq("payment_method", payment_method);
        }
        if let Some(status) = query.status {
            q = q.eq("status", status);
        }
        if let Some(start_date) = query.start_date {
            q = q.gte("payment_date", start_date);
        }
        if let Some(end_date) = query.end_date {
            q = q.lte("payment_date", end_date);
        }

        let (limit, offset) = page_bounds(query.limit, query.offset);
        let path = q.order("payment_date.desc").paginate(limit, offset).path();

        let rows: Vec<Payment> = self.store.request(Method::GET, &path, None).await?;
        Ok(rows)
    }

    pub async fn get_payments_for_invoice(&self, invoice_id: i64) -> Result<Vec<Payment>, BillingError> {
        let path = TableQuery::new("payments")
            .eq("invoice_id", invoice_id)
            .order("payment_date.desc")
            .path();
        let rows: Vec<Payment> = self.store.request(Method::GET, &path, None).await?;
        Ok(rows)
    }

    pub async fn get_payments_for_patient(&self, patient_id: i64) -> Result<Vec<Payment>, BillingError> {
        let path = TableQuery::new("payments")
            .eq("patient_id", patient_id)
            .order("payment_date.desc")
            .path();
        let rows: Vec<Payment> = self.store.request(Method::GET, &path, None).await?;
        Ok(rows)
    }

    pub async fn update_payment(
        &self,
        payment_id: i64,
        request: UpdatePaymentRequest,
    ) -> Result<Payment, BillingError> {
        let mut update = Map::new();

        if let Some(amount) = request.amount {
            update.insert("amount".to_string(), json!(amount));
        }
        if let Some(payment_method) = request.payment_method {
            update.insert("payment_method".to_string(), json!(payment_method));
        }
        if let Some(status) = request.status {
            update.insert("status".to_string(), json!(status));
        }
        if let Some(payment_date) = request.payment_date {
            update.insert("payment_date".to_string(), json!(payment_date));
        }
        if let Some(reference) = request.reference {
            update.insert("reference".to_string(), json!(reference));
        }
        update.insert("updated_at".to_string(), json!(Utc::now().to_rfc3339()));

        let path = TableQuery::new("payments").eq("id", payment_id).path();
        let mut result: Vec<Payment> = self
            .store
            .mutate(Method::PATCH, &path, Some(Value::Object(update)))
            .await?;

        if result.is_empty() {
            return Err(BillingError::PaymentNotFound);
        }
        Ok(result.remove(0))
    }

    pub async fn delete_payment(&self, payment_id: i64) -> Result<(), BillingError> {
        let path = TableQuery::new("payments").eq("id", payment_id).path();
        let deleted: Vec<Value> = self.store.mutate(Method::DELETE, &path, None).await?;

        if deleted.is_empty() {
            return Err(BillingError::PaymentNotFound);
        }
        Ok(())
    }
}
