use std::collections::HashSet;
use std::iter::once;
use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use crate::models::{sort_most_recent_first, NewTransaction, Transaction};
use crate::schema::SearchQuery;
use crate::storage::{CollaboratorError, TransactionRepository};
use crate::store::{Selector, StoreError};
use crate::types::TransactionId;

/// What subscribers of the store can observe.
///
/// Besides the published slices the state carries the bookkeeping that orders
/// fetches against creates. Bookkeeping updates never notify subscribers.
#[derive(Debug, Default)]
pub struct StoreState {
    transactions: Arc<[Transaction]>,
    query: SearchQuery,
    fetch_generation: u64,
    fetches_in_flight: usize,
    create_sequence: u64,
    recent_creates: Vec<(u64, Transaction)>
}

impl StoreState {
    /// The current list, most-recent-first.
    pub fn transactions(&self) -> Arc<[Transaction]> {
        self.transactions.clone()
    }

    /// The filter of the last applied fetch.
    pub fn query(&self) -> SearchQuery {
        self.query.clone()
    }

    #[cfg(test)]
    pub(crate) fn fetches_in_flight(&self) -> usize {
        self.fetches_in_flight
    }

    #[cfg(test)]
    pub(crate) fn pending_creates(&self) -> usize {
        self.recent_creates.len()
    }

    fn forget_creates_if_idle(&mut self) {
        if self.fetches_in_flight == 0 {
            self.recent_creates.clear();
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The answer replaced the list, which now holds this many records.
    Applied(usize),
    /// A newer fetch was issued while this one was in flight, so its answer was dropped.
    Superseded
}

/// The single owner of the session's transaction list.
///
/// Views subscribe through `select`; forms only call `create_transaction` and
/// `fetch_transactions`, which never change and therefore never wake them up.
pub struct TransactionStore<R: TransactionRepository> {
    repository: Arc<R>,
    state: watch::Sender<StoreState>
}

impl<R: TransactionRepository> TransactionStore<R> {
    pub fn new(repository: Arc<R>) -> Self {
        let (state, _) = watch::channel(StoreState::default());

        Self { repository, state }
    }

    pub fn transactions(&self) -> Arc<[Transaction]> {
        self.state.borrow().transactions()
    }

    pub fn query(&self) -> SearchQuery {
        self.state.borrow().query()
    }

    pub fn subscribe(&self) -> watch::Receiver<StoreState> {
        self.state.subscribe()
    }

    pub fn select<T: Clone + PartialEq>(&self, project: fn(&StoreState) -> T) -> Selector<T> {
        Selector::new(self.subscribe(), project)
    }

    /// Persists a new transaction and puts it at the head of the list.
    ///
    /// # Errors
    /// - `StoreError::Domain` when the payload breaks the creation invariant, the collaborator is not called.
    /// - `StoreError::Collaborator` when persistence fails or answers with a different record.
    ///
    /// The list is untouched on every error path.
    pub async fn create_transaction(&self, payload: NewTransaction) -> Result<Transaction, StoreError> {
        if let Err(error) = payload.check() {
            error!("Rejected a payload that bypassed validation: {error}");
            return Err(error.into());
        }

        let transaction = match self.repository.create(&payload).await {
            Ok(transaction) => transaction,
            Err(error) => {
                warn!("Could not create transaction: {error}");
                return Err(error.into());
            }
        };

        if !transaction.matches_payload(&payload) {
            let error = CollaboratorError::InvalidResponse(
                format!("Transaction [{}] does not carry the submitted fields", transaction.id)
            );
            warn!("{error}");
            return Err(error.into());
        }

        self.state.send_if_modified(|state| {
            state.create_sequence += 1;

            if state.fetches_in_flight > 0 {
                state.recent_creates.push((state.create_sequence, transaction.clone()));
            }

            state.transactions = once(transaction.clone())
                .chain(state.transactions.iter().cloned())
                .collect();

            true
        });

        info!("Transaction [{}]:[{}] created", transaction.id, transaction.transaction_type);

        Ok(transaction)
    }

    /// Replaces the list with the collaborator's answer for `query`.
    ///
    /// Only the most recently issued fetch may replace the list. Records
    /// created after this fetch was issued are kept when the answer misses them.
    ///
    /// # Errors
    /// Returns `StoreError::Collaborator` if persistence fails or answers with
    /// records that do not belong to the query. The list is untouched.
    pub async fn fetch_transactions(&self, query: SearchQuery) -> Result<FetchOutcome, StoreError> {
        //NOTE: The ticket leaves the in-flight count on drop, so a caller that stops polling
        //      this future (a timeout, an aborted task) does not pin recent creates forever.
        let ticket = FetchTicket::issue(&self.state);

        let answer = self.repository.list(&query).await
            .and_then(|transactions| verify_answer(&query, transactions));

        let transactions = match answer {
            Ok(transactions) => transactions,
            Err(error) => {
                warn!("Could not fetch transactions: {error}");
                return Err(error.into());
            }
        };

        let mut outcome = FetchOutcome::Superseded;

        self.state.send_if_modified(|state| {
            if ticket.generation != state.fetch_generation {
                return false;
            }

            let mut merged = transactions;
            let known: HashSet<TransactionId> = merged.iter().map(|transaction| transaction.id).collect();
            let needle = query.text().unwrap_or_default();

            let missing = state.recent_creates.iter()
                .filter(|(sequence, transaction)| {
                    *sequence > ticket.issued_after && !known.contains(&transaction.id) && transaction.matches_query(needle)
                })
                .map(|(_, transaction)| transaction.clone());

            merged.extend(missing);
            sort_most_recent_first(&mut merged);

            outcome = FetchOutcome::Applied(merged.len());
            state.transactions = merged.into();
            state.query = query.clone();
            true
        });

        drop(ticket);

        match outcome {
            FetchOutcome::Applied(count) => debug!("Fetched [{count}] transactions for query [{:?}]", query.text()),
            FetchOutcome::Superseded => debug!("Dropped a superseded answer for query [{:?}]", query.text())
        }

        Ok(outcome)
    }
}

/// Marks a fetch as in flight from issue until it is dropped.
struct FetchTicket<'a> {
    state: &'a watch::Sender<StoreState>,
    generation: u64,
    issued_after: u64
}

impl<'a> FetchTicket<'a> {
    fn issue(state: &'a watch::Sender<StoreState>) -> Self {
        let mut generation = 0;
        let mut issued_after = 0;

        state.send_if_modified(|state| {
            state.fetch_generation += 1;
            state.fetches_in_flight += 1;
            generation = state.fetch_generation;
            issued_after = state.create_sequence;
            false
        });

        Self { state, generation, issued_after }
    }
}

impl Drop for FetchTicket<'_> {
    fn drop(&mut self) {
        self.state.send_if_modified(|state| {
            state.fetches_in_flight -= 1;
            state.forget_creates_if_idle();
            false
        });
    }
}

fn verify_answer(query: &SearchQuery, transactions: Vec<Transaction>) -> Result<Vec<Transaction>, CollaboratorError> {
    let needle = query.text().unwrap_or_default();

    let invalid = transactions.iter().find(|transaction| {
        transaction.description.trim().is_empty()
            || transaction.category.trim().is_empty()
            || !transaction.matches_query(needle)
    });

    match invalid {
        Some(transaction) => Err(CollaboratorError::InvalidResponse(
            format!("Transaction [{}] does not belong to the answer for query [{needle}]", transaction.id)
        )),
        None => Ok(transactions)
    }
}
