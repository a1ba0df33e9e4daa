use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde_json::{json, Value};

use shared_database::AppState;
use shared_models::error::AppError;

use crate::models::{
    CreateInvoiceRequest, CreatePaymentRequest, InvoiceQuery, PaymentQuery, UpdateInvoiceRequest,
    UpdatePaymentRequest,
};
use crate::services::{InvoiceService, PaymentService};

// --- Invoices ---

#[axum::debug_handler]
pub async fn create_invoice(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateInvoiceRequest>,
) -> Result<Json<Value>, AppError> {
    let service = InvoiceService::new(&state);

    let invoice = service.create_invoice(request).await?;

    Ok(Json(json!(invoice)))
}

#[axum::debug_handler]
pub async fn get_invoice(
    State(state): State<Arc<AppState>>,
    Path(invoice_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let service = InvoiceService::new(&state);

    let invoice = service.get_invoice(invoice_id).await?;

    Ok(Json(json!(invoice)))
}

#[axum::debug_handler]
pub async fn list_invoices(
    State(state): State<Arc<AppState>>,
    Query(query): Query<InvoiceQuery>,
) -> Result<Json<Value>, AppError> {
    let service = InvoiceService::new(&state);

    let invoices = service.list_invoices(query).await?;

    Ok(Json(json!(invoices)))
}

#[axum::debug_handler]
pub async fn get_invoices_for_patient(
    State(state): State<Arc<AppState>>,
    Path(patient_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let service = InvoiceService::new(&state);

    let invoices = service.get_invoices_for_patient(patient_id).await?;

    Ok(Json(json!(invoices)))
}

#[axum::debug_handler]
pub async fn get_unpaid_invoices_for_patient(
    State(state): State<Arc<AppState>>,
    Path(patient_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let service = InvoiceService::new(&state);

    let invoices = service.get_unpaid_invoices_for_patient(patient_id).await?;

    Ok(Json(json!(invoices)))
}

#[axum::debug_handler]
pub async fn update_invoice(
    State(state): State<Arc<AppState>>,
    Path(invoice_id): Path<i64>,
    Json(request): Json<UpdateInvoiceRequest>,
) -> Result<Json<Value>, AppError> {
    let service = InvoiceService::new(&state);

    let invoice = service.update_invoice(invoice_id, request).await?;

    Ok(Json(json!(invoice)))
}

#[axum::debug_handler]
pub async fn delete_invoice(
    State(state): State<Arc<AppState>>,
    Path(invoice_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let service = InvoiceService::new(&state);

    service.delete_invoice(invoice_id).await?;

    Ok(Json(json!({ "message": "Invoice deleted successfully" })))
}

// --- Payments ---

#[axum::debug_handler]
pub async fn create_payment(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreatePaymentRequest>,
) -> Result<Json<Value>, AppError> {
    let service = PaymentService::new(&state);

    let payment = service.create_payment(request).await?;

    Ok(Json(json!(payment)))
}

#[axum::debug_handler]
pub async fn get_payment(
    State(state): State<Arc<AppState>>,
    Path(payment_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let service = PaymentService::new(&state);

    let payment = service.get_payment(payment_id).await?;

    Ok(Json(json!(payment)))
}

#[axum::debug_handler]
pub async fn list_payments(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PaymentQuery>,
) -> Result<Json<Value>, AppError> {
    let service = PaymentService::new(&state);

    let payments = service.list_payments(query).await?;

    Ok(Json(json!(payments)))
}

#[axum::debug_handler]
pub async fn get_payments_for_invoice(
    State(state): State<Arc<AppState>>,
    Path(invoice_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let service = PaymentService::new(&state);

    let payments = service.get_payments_for_invoice(invoice_id).await?;

    Ok(Json(json!(payments)))
}

#[axum::debug_handler]
pub async fn get_payments_for_patient(
    State(state): State<Arc<AppState>>,
    Path(patient_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let service = PaymentService::new(&state);

    let payments = service.get_payments_for_patient(patient_id).await?;

    Ok(Json(json!(payments)))
}

#[axum::debug_handler]
pub async fn update_payment(
    State(state): State<Arc<AppState>>,
    Path(payment_id): Path<i64>,
    Json(request): Json<UpdatePaymentRequest>,
) -> Result<Json<Value>, AppError> {
    let service = PaymentService::new(&state);

    let payment = service.update_payment(payment_id, request).await?;

    Ok(Json(json!(payment)))
}

#[axum::debug_handler]
pub async fn delete_payment(
    State(state): State<Arc<AppState>>,
    Path(payment_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let service = PaymentService::new(&state);

    service.delete_payment(payment_id).await?;

    Ok(Json(json!({ "message": "Payment deleted successfully" })))
}
