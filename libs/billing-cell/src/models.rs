use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use shared_models::error::AppError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    pub id: i64,
    pub patient_id: i64,
    pub study_id: Option<i64>,
    pub insurance_id: Option<i64>,
    pub amount: Decimal,
    pub description: Option<String>,
    pub billing_date: NaiveDate,
    pub due_date: Option<NaiveDate>,
    pub is_paid: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateInvoiceRequest {
    pub patient_id: i64,
    pub study_id: Option<i64>,
    pub insurance_id: Option<i64>,
    pub amount: Decimal,
    pub description: Option<String>,
    pub billing_date: NaiveDate,
    pub due_date: Option<NaiveDate>,
    pub is_paid: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateInvoiceRequest {
    pub study_id: Option<i64>,
    pub insurance_id: Option<i64>,
    pub amount: Option<Decimal>,
    pub description: Option<String>,
    pub billing_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub is_paid: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InvoiceQuery {
    pub patient_id: Option<i64>,
    pub study_id: Option<i64>,
    pub insurance_id: Option<i64>,
    pub is_paid: Option<bool>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    pub id: i64,
    pub invoice_id: i64,
    pub patient_id: i64,
    pub amount: Decimal,
    pub payment_method: String,
    pub status: String,
    pub payment_date: NaiveDate,
    pub reference: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatePaymentRequest {
    pub invoice_id: i64,
    pub patient_id: i64,
    pub amount: Decimal,
    pub payment_method: String,
    pub status: Option<String>,
    pub payment_date: NaiveDate,
    pub reference: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdatePaymentRequest {
    pub amount: Option<Decimal>,
    pub payment_method: Option<String>,
    pub status: Option<String>,
    pub payment_date: Option<NaiveDate>,
    pub reference: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PaymentQuery {
    pub invoice_id: Option<i64>,
    pub payment_method: Option<String>,
    pub status: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, thiserror::Error)]
pub enum BillingError {
    #[error("Invoice not found")]
    InvoiceNotFound,

    #[error("Payment not found")]
    PaymentNotFound,

    #[error("Database error: {0}")]
    Database(String),
}

impl From<BillingError> for AppError {
    fn from(err: BillingError) -> Self {
        match err {
            BillingError::InvoiceNotFound | BillingError::PaymentNotFound => {
                AppError::NotFound(err.to_string())
            }
            BillingError::Database(msg) => AppError::Database(msg),
        }
    }
}

impl From<anyhow::Error> for BillingError {
    fn from(err: anyhow::Error) -> Self {
        BillingError::Database(err.to_string())
    }
}
