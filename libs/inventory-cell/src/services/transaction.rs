use chrono::Utc;
use reqwest::Method;
use serde_json::{json, Value};
use tracing::debug;

use shared_database::{AppState, PostgrestClient, TableQuery};
use shared_utils::pagination::page_bounds;

use crate::models::{
    CreateTransactionRequest, InventoryError, InventoryTransaction, Supply, TransactionQuery,
};
use crate::services::ledger::apply_transaction;

pub struct TransactionService {
    store: PostgrestClient,
}

impl TransactionService {
    pub fn new(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
        }
    }

    /// Posts a stock transaction: fetch the supply, run the ledger rules
    /// in memory, and only then write the transaction row and the updated
    /// quantity/status. Nothing is persisted when the ledger rejects the
    /// posting.
    pub async fn post_transaction(
        &self,
        request: CreateTransactionRequest,
        performed_by: i64,
    ) -> Result<InventoryTransaction, InventoryError> {
        let path = TableQuery::new("supplies").eq("id", request.supply_id).path();
        let mut supplies: Vec<Supply> = self.store.request(Method::GET, &path, None).await?;
        if supplies.is_empty() {
            return Err(InventoryError::SupplyNotFound);
        }
        let supply = supplies.remove(0);

        let (quantity_after, status_after) = apply_transaction(
            supply.current_quantity,
            supply.minimum_quantity,
            request.transaction_type,
            request.quantity,
        )?;

        debug!(
            "Posting {} transaction of {} against supply {} ({} -> {})",
            request.transaction_type.as_str(),
            request.quantity,
            supply.id,
            supply.current_quantity,
            quantity_after
        );

        let now = Utc::now().to_rfc3339();
        let row = json!({
            "supply_id": request.supply_id,
            "transaction_type": request.transaction_type.as_str(),
            "quantity": request.quantity,
            "department_id": request.department_id,
            "performed_by": performed_by,
            "transaction_date": now,
            "notes": request.notes,
            "created_at": now,
            "updated_at": now,
        });

        let mut created: Vec<InventoryTransaction> = self
            .store
            .mutate(
                Method::POST,
                &TableQuery::new("inventory_transactions").path(),
                Some(row),
            )
            .await?;

        if created.is_empty() {
            return Err(InventoryError::Database(
                "Failed to record inventory transaction".to_string(),
            ));
        }

        let supply_path = TableQuery::new("supplies").eq("id", supply.id).path();
        let _: Vec<Value> = self
            .store
            .mutate(
                Method::PATCH,
                &supply_path,
                Some(json!({
                    "current_quantity": quantity_after,
                    "status": status_after.as_str(),
                    "updated_at": Utc::now().to_rfc3339(),
                })),
            )
            .await?;

        Ok(created.remove(0))
    }

    pub async fn list_transactions(
        &self,
        query: TransactionQuery,
    ) -> Result<Vec<InventoryTransaction>, InventoryError> {
        let mut q = TableQuery::new("inventory_transactions");

        if let Some(supply_id) = query.supply_id {
            q = q.eq("supply_id", supply_id);
        }
        if let Some(transaction_type) = query.transaction_type {
            q = q.eq("transaction_type", transaction_type.as_str());
        }
        if let Some(department_id) = query.department_id {
            q = q.eq("department_id", department_id);
        }
        if let Some(start_date) = query.start_date {
            q = q.gte("transaction_date", start_date);
        }
        if let Some(end_date) = query.end_date {
            q = q.lte("transaction_date", format!("{}T23:59:59Z", end_date));
        }

        let (limit, offset) = page_bounds(query.limit, query.offset);
        let path = q.order("transaction_date.desc").paginate(limit, offset).path();

        let rows: Vec<InventoryTransaction> = self.store.request(Method::GET, &path, None).await?;
        Ok(rows)
    }
}
