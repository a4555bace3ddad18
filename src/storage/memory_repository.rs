use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use time::OffsetDateTime;
use tokio::time::sleep;
use tracing::debug;

use crate::models::{sort_most_recent_first, NewTransaction, Transaction};
use crate::schema::SearchQuery;
use crate::storage::{CollaboratorError, TransactionRepository};
use crate::types::TransactionId;

/// Process-local persistence, optionally slowed down to behave like a remote backend.
pub struct InMemoryRepository {
    records: Arc<DashMap<TransactionId, Transaction>>,
    next_id: AtomicU32,
    latency: Option<Duration>
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self {
            records: Arc::new(DashMap::new()),
            next_id: AtomicU32::new(1),
            latency: None
        }
    }

    #[cfg(test)]
    pub(crate) fn with_next_id(self, next_id: TransactionId) -> Self {
        self.next_id.store(next_id, Ordering::Relaxed);
        self
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    async fn simulate_latency(&self) {
        if let Some(latency) = self.latency {
            sleep(latency).await;
        }
    }
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl TransactionRepository for InMemoryRepository {
    async fn list(&self, query: &SearchQuery) -> Result<Vec<Transaction>, CollaboratorError> {
        self.simulate_latency().await;

        let needle = query.text().unwrap_or_default();
        let mut transactions: Vec<Transaction> = self.records.iter()
            .filter(|record| record.value().matches_query(needle))
            .map(|record| record.value().clone())
            .collect();

        sort_most_recent_first(&mut transactions);

        debug!("Listed [{}] transactions for query [{:?}]", transactions.len(), query.text());

        Ok(transactions)
    }

    async fn create(&self, payload: &NewTransaction) -> Result<Transaction, CollaboratorError> {
        self.simulate_latency().await;

        //NOTE: The counter stops at the last id instead of wrapping onto stored records
        let id = self.next_id
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |id| id.checked_add(1))
            .map_err(|_| CollaboratorError::Unavailable("Transaction ids are exhausted".to_string()))?;

        let transaction = Transaction::from_payload(id, payload, OffsetDateTime::now_utc());
        self.records.insert(id, transaction.clone());

        debug!("Stored transaction [{}]:[{}]", transaction.id, transaction.transaction_type);

        Ok(transaction)
    }
}
