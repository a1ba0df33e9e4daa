use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use shared_models::error::AppError;

/// Derived stock state. Never set directly by clients; recomputed from
/// the quantity and the minimum threshold on every write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SupplyStatus {
    InStock,
    LowStock,
    OutOfStock,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    Received,
    Issued,
    Adjusted,
    Returned,
    Expired,
    Damaged,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertType {
    LowStock,
    OutOfStock,
    Expiring,
    Expired,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Supply {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub department_id: Option<i64>,
    pub current_quantity: Decimal,
    pub minimum_quantity: Decimal,
    pub maximum_quantity: Decimal,
    pub unit: String,
    pub unit_cost: Option<Decimal>,
    pub expiration_date: Option<NaiveDate>,
    pub status: SupplyStatus,
    pub location: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateSupplyRequest {
    pub name: String,
    pub category: String,
    pub department_id: Option<i64>,
    pub current_quantity: Decimal,
    pub minimum_quantity: Decimal,
    pub maximum_quantity: Decimal,
    pub unit: String,
    pub unit_cost: Option<Decimal>,
    pub expiration_date: Option<NaiveDate>,
    pub location: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateSupplyRequest {
    pub name: Option<String>,
    pub category: Option<String>,
    pub department_id: Option<i64>,
    pub current_quantity: Option<Decimal>,
    pub minimum_quantity: Option<Decimal>,
    pub maximum_quantity: Option<Decimal>,
    pub unit: Option<String>,
    pub unit_cost: Option<Decimal>,
    pub expiration_date: Option<NaiveDate>,
    pub location: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SupplyQuery {
    pub category: Option<String>,
    pub status: Option<SupplyStatus>,
    pub department_id: Option<i64>,
    pub search: Option<String>,
    pub low_stock: Option<bool>,
    pub expiring_soon: Option<bool>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryTransaction {
    pub id: i64,
    pub supply_id: i64,
    pub transaction_type: TransactionType,
    pub quantity: Decimal,
    pub department_id: Option<i64>,
    pub performed_by: Option<i64>,
    pub transaction_date: DateTime<Utc>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateTransactionRequest {
    pub supply_id: i64,
    pub transaction_type: TransactionType,
    pub quantity: Decimal,
    pub department_id: Option<i64>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TransactionQuery {
    pub supply_id: Option<i64>,
    pub transaction_type: Option<TransactionType>,
    pub department_id: Option<i64>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryAlert {
    pub id: i64,
    pub supply_id: i64,
    pub alert_type: AlertType,
    pub message: String,
    pub is_active: bool,
    pub acknowledged_at: Option<DateTime<Utc>>,
    pub acknowledged_by: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateAlertRequest {
    pub supply_id: i64,
    pub alert_type: AlertType,
    pub message: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AlertQuery {
    pub supply_id: Option<i64>,
    pub alert_type: Option<AlertType>,
    pub is_active: Option<bool>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl SupplyStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SupplyStatus::InStock => "in_stock",
            SupplyStatus::LowStock => "low_stock",
            SupplyStatus::OutOfStock => "out_of_stock",
        }
    }
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Received => "received",
            TransactionType::Issued => "issued",
            TransactionType::Adjusted => "adjusted",
            TransactionType::Returned => "returned",
            TransactionType::Expired => "expired",
            TransactionType::Damaged => "damaged",
        }
    }
}

impl AlertType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertType::LowStock => "low_stock",
            AlertType::OutOfStock => "out_of_stock",
            AlertType::Expiring => "expiring",
            AlertType::Expired => "expired",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum InventoryError {
    #[error("Insufficient stock: {available} available, {requested} requested")]
    InsufficientStock {
        available: Decimal,
        requested: Decimal,
    },

    #[error("Supply not found")]
    SupplyNotFound,

    #[error("Alert not found")]
    AlertNotFound,

    #[error("Database error: {0}")]
    Database(String),
}

impl From<InventoryError> for AppError {
    fn from(err: InventoryError) -> Self {
        match err {
            InventoryError::InsufficientStock { .. } => AppError::BadRequest(err.to_string()),
            InventoryError::SupplyNotFound | InventoryError::AlertNotFound => {
                AppError::NotFound(err.to_string())
            }
            InventoryError::Database(msg) => AppError::Database(msg),
        }
    }
}

impl From<anyhow::Error> for InventoryError {
    fn from(err: anyhow::Error) -> Self {
        InventoryError::Database(err.to_string())
    }
}
