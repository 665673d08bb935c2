//! Transaction repository

use std::sync::Arc;

use finai_types::{is_amount_in_range, NewTransaction, Transaction, MAX_ABS_AMOUNT};
use tokio::sync::RwLock;

use crate::{StoreError, StoreResult};

#[derive(Debug, Default)]
struct Table {
    next_id: i64,
    rows: Vec<Transaction>,
}

/// Transaction repository
#[derive(Debug, Clone, Default)]
pub struct TransactionRepo {
    table: Arc<RwLock<Table>>,
}

impl TransactionRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// All transactions, newest date first (ties: newest id first)
    pub async fn list(&self) -> Vec<Transaction> {
        let table = self.table.read().await;
        let mut rows = table.rows.clone();
        rows.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
        rows
    }

    /// Find transaction by ID
    pub async fn find_by_id(&self, id: i64) -> Option<Transaction> {
        let table = self.table.read().await;
        table.rows.iter().find(|t| t.id == id).cloned()
    }

    /// Insert a transaction with the next ID
    pub async fn create(&self, new: NewTransaction) -> StoreResult<Transaction> {
        validate(&new)?;

        let mut table = self.table.write().await;
        table.next_id += 1;
        let transaction = Transaction::from_new(table.next_id, new);
        table.rows.push(transaction.clone());

        tracing::debug!(id = transaction.id, "Transaction created");
        Ok(transaction)
    }

    /// Replace every field of an existing transaction
    pub async fn update(&self, id: i64, new: NewTransaction) -> StoreResult<Transaction> {
        validate(&new)?;

        let mut table = self.table.write().await;
        let row = table
            .rows
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| not_found(id))?;
        *row = Transaction::from_new(id, new);

        tracing::debug!(id, "Transaction updated");
        Ok(row.clone())
    }

    /// Remove a transaction, returning it
    pub async fn delete(&self, id: i64) -> StoreResult<Transaction> {
        let mut table = self.table.write().await;
        let index = table
            .rows
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| not_found(id))?;
        let removed = table.rows.remove(index);

        tracing::debug!(id, "Transaction deleted");
        Ok(removed)
    }

    pub async fn count(&self) -> usize {
        self.table.read().await.rows.len()
    }
}

fn not_found(id: i64) -> StoreError {
    StoreError::NotFound(format!("Transaction {}", id))
}

fn validate(new: &NewTransaction) -> StoreResult<()> {
    if new.description.trim().is_empty() {
        return Err(StoreError::InvalidInput("description must not be empty".into()));
    }
    if new.category.trim().is_empty() {
        return Err(StoreError::InvalidInput("category must not be empty".into()));
    }
    if !is_amount_in_range(new.amount) {
        return Err(StoreError::InvalidInput(format!(
            "amount must be between -{0} and {0}",
            MAX_ABS_AMOUNT
        )));
    }
    Ok(())
}
