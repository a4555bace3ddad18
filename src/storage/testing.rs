//! Collaborator doubles for exercising the store and the forms.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use tokio::sync::Notify;

use crate::models::{NewTransaction, Transaction};
use crate::schema::SearchQuery;
use crate::storage::{CollaboratorError, InMemoryRepository, TransactionRepository};

/// Holds calls back until released, while closed.
#[derive(Default)]
pub struct Gate {
    closed: AtomicBool,
    waiting: AtomicUsize,
    notify: Notify
}

impl Gate {
    pub fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }

    pub fn open(&self) {
        self.closed.store(false, Ordering::SeqCst);
    }

    pub fn release_one(&self) {
        self.notify.notify_one();
    }

    pub fn waiting(&self) -> usize {
        self.waiting.load(Ordering::SeqCst)
    }

    async fn pass(&self) {
        if self.closed.load(Ordering::SeqCst) {
            self.waiting.fetch_add(1, Ordering::SeqCst);
            self.notify.notified().await;
            self.waiting.fetch_sub(1, Ordering::SeqCst);
        }
    }
}

/// Wraps the in-memory collaborator with call counting, gates and failure injection.
#[derive(Default)]
pub struct ScriptedRepository {
    inner: InMemoryRepository,
    pub list_gate: Gate,
    pub create_gate: Gate,
    list_calls: AtomicUsize,
    create_calls: AtomicUsize,
    fail_lists: AtomicBool,
    fail_creates: AtomicBool,
    corrupt_creates: AtomicBool
}

impl ScriptedRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    pub fn fail_lists(&self, fail: bool) {
        self.fail_lists.store(fail, Ordering::SeqCst);
    }

    pub fn fail_creates(&self, fail: bool) {
        self.fail_creates.store(fail, Ordering::SeqCst);
    }

    pub fn corrupt_creates(&self, corrupt: bool) {
        self.corrupt_creates.store(corrupt, Ordering::SeqCst);
    }

    /// Stores a record directly, bypassing counters and gates.
    pub async fn seed(&self, payload: &NewTransaction) -> Result<Transaction, CollaboratorError> {
        self.inner.create(payload).await
    }
}

impl TransactionRepository for ScriptedRepository {
    async fn list(&self, query: &SearchQuery) -> Result<Vec<Transaction>, CollaboratorError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);

        //NOTE: The answer is computed before the gate so a held call returns a stale snapshot
        let answer = self.inner.list(query).await;
        self.list_gate.pass().await;

        if self.fail_lists.load(Ordering::SeqCst) {
            return Err(CollaboratorError::Unavailable("list failed".to_string()));
        }

        answer
    }

    async fn create(&self, payload: &NewTransaction) -> Result<Transaction, CollaboratorError> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        self.create_gate.pass().await;

        if self.fail_creates.load(Ordering::SeqCst) {
            return Err(CollaboratorError::Unavailable("create failed".to_string()));
        }

        let mut transaction = self.inner.create(payload).await?;

        if self.corrupt_creates.load(Ordering::SeqCst) {
            transaction.description = format!("{} (edited)", transaction.description);
        }

        Ok(transaction)
    }
}
