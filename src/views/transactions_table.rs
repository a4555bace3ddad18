use std::sync::Arc;

use time::macros::format_description;

use crate::models::{Summary, Transaction, TransactionType};
use crate::storage::TransactionRepository;
use crate::store::{Selector, TransactionStore};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRow {
    pub description: String,
    /// Outcome amounts are prefixed with "- ".
    pub price: String,
    pub category: String,
    /// Creation date as dd/mm/yyyy.
    pub date: String
}

impl TransactionRow {
    fn from_transaction(transaction: &Transaction) -> Self {
        let price = match transaction.transaction_type {
            TransactionType::Income => transaction.price.to_string(),
            TransactionType::Outcome => format!("- {}", transaction.price)
        };

        let date = transaction.created_at
            .format(&format_description!("[day]/[month]/[year]"))
            .unwrap_or_default();

        Self {
            description: transaction.description.clone(),
            price,
            category: transaction.category.clone(),
            date
        }
    }
}

/// The searchable list and the summary cards above it.
///
/// Reads only the transaction slice of the store; it re-renders when that
/// slice changes and never because of a query or form update.
pub struct TransactionsTable {
    transactions: Selector<Arc<[Transaction]>>,
    renders: usize
}

impl TransactionsTable {
    pub fn subscribe<R: TransactionRepository>(store: &TransactionStore<R>) -> Self {
        Self {
            transactions: store.select(|state| state.transactions()),
            renders: 1
        }
    }

    /// Re-renders if the list changed since the last render.
    pub fn refresh(&mut self) -> bool {
        let changed = self.transactions.try_changed().is_some();

        if changed {
            self.renders += 1;
        }

        changed
    }

    /// Waits for the next list change. Returns false once the store is gone.
    pub async fn wait_for_change(&mut self) -> bool {
        let changed = self.transactions.changed().await.is_some();

        if changed {
            self.renders += 1;
        }

        changed
    }

    pub fn render_count(&self) -> usize {
        self.renders
    }

    /// The records of the last render, most-recent-first.
    pub fn transactions(&self) -> Arc<[Transaction]> {
        self.transactions.current().clone()
    }

    pub fn rows(&self) -> Vec<TransactionRow> {
        self.transactions.current().iter().map(TransactionRow::from_transaction).collect()
    }

    pub fn summary(&self) -> Summary {
        Summary::from_transactions(self.transactions.current())
    }
}
